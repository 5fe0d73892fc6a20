//! End-to-end scatter tests against the in-memory reference host.

use approx::assert_relative_eq;
use floret_curve::{CurveError, CurveObject};
use floret_kernel::{scatter_petals, ScatterConfig, ScatterError, ScatterTemplates};
use floret_math::{Aabb, Placement, Point3};
use floret_scene::{
    GroupId, MemoryScene, MeshData, ObjectData, ObjectId, SceneError, SceneHost,
};
use floret_tessellate::TessellationParams;

/// A petal whose body peaks at x = `reach / 2` (quadratic through the
/// origin-side endpoints).
fn petal(reach: f64) -> CurveObject {
    CurveObject::petal(
        [
            Point3::new(0.0, 0.1, 0.0),
            Point3::new(reach, 0.0, 0.0),
            Point3::new(0.0, -0.1, 0.0),
        ],
        0.02,
    )
    .unwrap()
}

fn baked_bounds(scene: &MemoryScene, id: ObjectId) -> Aabb {
    match &scene.object(id).unwrap().data {
        ObjectData::Baked(mesh) => {
            let positions: Vec<Point3> = (0..mesh.num_vertices()).map(|i| mesh.vertex(i)).collect();
            Aabb::from_points(positions.iter()).unwrap()
        }
        other => panic!("expected a baked mesh, got {other:?}"),
    }
}

#[test]
fn test_square_sheet_grows_eight_petals() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    let template = scene.add_curve("Petal", petal(0.6));
    let sheet_placement = Placement::new(Point3::new(0.0, 0.0, 2.0), 0.25);
    scene.set_placement(sheet, sheet_placement).unwrap();

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };
    let outcome = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();

    assert_eq!(outcome.qualifying_edges, 4);
    assert_eq!(outcome.baked.len(), 8);
    assert_eq!(outcome.skipped_short_edges, 0);
    assert_eq!(outcome.skipped_degenerate_edges, 0);

    // The transient instance group is gone, the output group is retained
    assert!(scene.find_group("PetalCollection").is_none());
    assert_eq!(
        scene.find_group("MeshPetalCollection"),
        Some(outcome.output_group)
    );
    assert_eq!(scene.group_members(outcome.output_group).unwrap(), outcome.baked);

    // Sheet, template, and the eight baked meshes; nothing else survived
    assert_eq!(scene.object_count(), 10);

    // Every baked mesh carries the sheet owner's world placement
    for &id in &outcome.baked {
        let pl = scene.placement(id).unwrap();
        assert_relative_eq!(pl.euler_z, sheet_placement.euler_z);
        assert_relative_eq!(pl.position.z, 2.0);
    }
}

#[test]
fn test_threshold_boundary_value_does_not_populate() {
    // Unit edges: half-length 0.5. Petal extent 0.2 plus margin 0.3 is
    // exactly 0.5, so the strict inequality must reject all four edges.
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(1.0));
    let template = scene.add_curve("Petal", petal(0.4));

    let config = ScatterConfig {
        margin: 0.3,
        ..ScatterConfig::default()
    };
    let outcome = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();

    assert_eq!(outcome.baked.len(), 0);
    assert_eq!(outcome.qualifying_edges, 0);
    assert_eq!(outcome.skipped_short_edges, 4);
    assert_eq!(scene.object_count(), 2);

    // Nudging the margin below the boundary populates again
    let config = ScatterConfig {
        margin: 0.29,
        ..config
    };
    let outcome = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();
    assert_eq!(outcome.baked.len(), 8);
}

#[test]
fn test_mirrored_pairs_share_midpoint() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    let template = scene.add_curve("Petal", petal(0.6));

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };
    let outcome = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();

    // Edge order of the quad: midpoints of bottom, right, top, left
    let midpoints = [
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
    ];

    for (pair, midpoint) in outcome.baked.chunks(2).zip(midpoints) {
        let a = baked_bounds(&scene, pair[0]);
        let b = baked_bounds(&scene, pair[1]);
        // The second petal is the first rotated by π about the midpoint,
        // so the pair's bound centers are point reflections of each other
        let center_a = (a.min.coords + a.max.coords) / 2.0;
        let center_b = (b.min.coords + b.max.coords) / 2.0;
        let sum = center_a + center_b;
        assert_relative_eq!(sum.x, 2.0 * midpoint.x, epsilon = 1e-5);
        assert_relative_eq!(sum.y, 2.0 * midpoint.y, epsilon = 1e-5);
    }
}

#[test]
fn test_sheet_recommit_is_identity() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    let template = scene.add_curve("Petal", petal(0.6));
    let before = scene.read_mesh(sheet).unwrap();

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };
    scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();

    assert_eq!(scene.read_mesh(sheet).unwrap(), before);
}

#[test]
fn test_degenerate_edge_is_skipped_not_fatal() {
    let mut scene = MemoryScene::new();
    let mut mesh = MeshData::quad(2.0);
    mesh.edges.push([1, 1]);
    let sheet = scene.add_mesh("Sheet", mesh);
    let template = scene.add_curve("Petal", petal(0.6));

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };
    let outcome = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap();

    assert_eq!(outcome.baked.len(), 8);
    assert_eq!(outcome.skipped_degenerate_edges, 1);
}

#[test]
fn test_boundary_template_drives_boundary_edges() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    // The interior template is far too long for these edges; only the
    // boundary template fits. Every edge of a single-face sheet is a
    // boundary edge, so classification decides whether anything grows.
    let interior = scene.add_curve("Petal", petal(10.0));
    let boundary = scene.add_curve("PetalOpen", petal(0.6));

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };

    let none = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(interior),
        &config,
    )
    .unwrap();
    assert_eq!(none.baked.len(), 0);

    let templates = ScatterTemplates {
        interior,
        boundary: Some(boundary),
    };
    let outcome = scatter_petals(&mut scene, sheet, &templates, &config).unwrap();
    assert_eq!(outcome.baked.len(), 8);
}

#[test]
fn test_nonplanar_sheet_fails_before_mutation() {
    let mut scene = MemoryScene::new();
    let mut mesh = MeshData::quad(2.0);
    mesh.vertices[0].z = 0.5;
    let sheet = scene.add_mesh("Sheet", mesh);
    let template = scene.add_curve("Petal", petal(0.6));

    let err = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &ScatterConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScatterError::SheetNotPlanar(s) if (s - 0.5).abs() < 1e-12));
    assert_eq!(scene.object_count(), 2);
    assert_eq!(scene.group_count(), 0);
}

#[test]
fn test_malformed_template_rejected() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    let two_splines = {
        let single = petal(0.6);
        CurveObject::new(
            [single.splines(), single.splines()].concat(),
        )
    };
    let template = scene.add_curve("Petal", two_splines);

    let err = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &ScatterConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ScatterError::InvalidTemplate(CurveError::TemplateSplineCount(2))
    );
}

#[test]
fn test_backward_facing_template_rejected() {
    let mut scene = MemoryScene::new();
    let sheet = scene.add_mesh("Sheet", MeshData::quad(2.0));
    let template = scene.add_curve("Petal", petal(-0.6));

    let err = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &ScatterConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScatterError::TemplateFacesBackward(_)));
    assert_eq!(scene.group_count(), 0);
}

/// Wraps the reference host and fails `bake_to_mesh` after a fixed number
/// of successes, to exercise the mid-loop rollback path.
struct FailingScene {
    inner: MemoryScene,
    bakes_left: usize,
}

impl SceneHost for FailingScene {
    fn read_mesh(&self, object: ObjectId) -> Result<MeshData, SceneError> {
        self.inner.read_mesh(object)
    }

    fn commit_mesh(&mut self, object: ObjectId, data: MeshData) -> Result<(), SceneError> {
        self.inner.commit_mesh(object, data)
    }

    fn bounding_box(&self, object: ObjectId) -> Result<[Point3; 8], SceneError> {
        self.inner.bounding_box(object)
    }

    fn read_curve(&self, object: ObjectId) -> Result<CurveObject, SceneError> {
        self.inner.read_curve(object)
    }

    fn duplicate_object(&mut self, object: ObjectId) -> Result<ObjectId, SceneError> {
        self.inner.duplicate_object(object)
    }

    fn set_curve_control_point(
        &mut self,
        object: ObjectId,
        spline: usize,
        point: usize,
        position: Point3,
    ) -> Result<(), SceneError> {
        self.inner
            .set_curve_control_point(object, spline, point, position)
    }

    fn placement(&self, object: ObjectId) -> Result<Placement, SceneError> {
        self.inner.placement(object)
    }

    fn set_placement(
        &mut self,
        object: ObjectId,
        placement: Placement,
    ) -> Result<(), SceneError> {
        self.inner.set_placement(object, placement)
    }

    fn freeze_transform(&mut self, object: ObjectId) -> Result<(), SceneError> {
        self.inner.freeze_transform(object)
    }

    fn bake_to_mesh(
        &mut self,
        curve: ObjectId,
        params: &TessellationParams,
    ) -> Result<ObjectId, SceneError> {
        if self.bakes_left == 0 {
            return Err(SceneError::UnknownObject);
        }
        self.bakes_left -= 1;
        self.inner.bake_to_mesh(curve, params)
    }

    fn create_group(&mut self, name: &str) -> GroupId {
        self.inner.create_group(name)
    }

    fn delete_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        self.inner.delete_group(group)
    }

    fn add_to_group(&mut self, group: GroupId, object: ObjectId) -> Result<(), SceneError> {
        self.inner.add_to_group(group, object)
    }

    fn group_members(&self, group: GroupId) -> Result<Vec<ObjectId>, SceneError> {
        self.inner.group_members(group)
    }

    fn remove_object(&mut self, object: ObjectId) -> Result<(), SceneError> {
        self.inner.remove_object(object)
    }
}

#[test]
fn test_mid_loop_failure_restores_scene() {
    let mut inner = MemoryScene::new();
    let sheet = inner.add_mesh("Sheet", MeshData::quad(2.0));
    let template = inner.add_curve("Petal", petal(0.6));
    let mut scene = FailingScene {
        inner,
        bakes_left: 3,
    };

    let config = ScatterConfig {
        margin: 0.1,
        ..ScatterConfig::default()
    };
    let err = scatter_petals(
        &mut scene,
        sheet,
        &ScatterTemplates::single(template),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ScatterError::Scene(_)));

    // Three petals were baked before the failure; rollback removed them
    // with the transient instances and both groups
    assert_eq!(scene.inner.object_count(), 2);
    assert_eq!(scene.inner.group_count(), 0);
    assert!(scene.inner.find_group("PetalCollection").is_none());
    assert!(scene.inner.find_group("MeshPetalCollection").is_none());
}
