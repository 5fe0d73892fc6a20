//! The scatter pipeline: qualify edges, instantiate petal pairs, bake,
//! collect, clean up.

use std::f64::consts::PI;

use floret_math::{Placement, Point3, Tolerance, Vec3};
use floret_scene::{GroupId, ObjectId, SceneHost};
use floret_tessellate::TessellationParams;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScatterError};
use crate::plan::{plan_edges, ClassExtents, EdgeClass, EdgePlan};
use crate::queries::bounding_x_extent;

/// Debug logging macro - only prints when debug-scatter feature is enabled
#[allow(unused_macros)]
#[cfg(feature = "debug-scatter")]
macro_rules! debug_scatter {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

/// No-op version when debug-scatter feature is disabled
#[allow(unused_macros)]
#[cfg(not(feature = "debug-scatter"))]
macro_rules! debug_scatter {
    ($($arg:tt)*) => {};
}

/// Operator-facing scatter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Clearance added to the petal overhang in the length test (world
    /// units).
    pub margin: f64,
    /// Axis petals are measured against; rotation zero aligns a petal with
    /// this direction.
    pub reference_axis: [f64; 3],
    /// Baking quality.
    pub tessellation: TessellationParams,
    /// Name of the transient group holding live petal instances.
    pub instance_group: String,
    /// Name of the retained group holding baked petal meshes.
    pub output_group: String,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            margin: 0.5,
            reference_axis: [1.0, 0.0, 0.0],
            tessellation: TessellationParams::default(),
            instance_group: "PetalCollection".to_string(),
            output_group: "MeshPetalCollection".to_string(),
        }
    }
}

/// Template references, resolved by the caller before invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterTemplates {
    /// Template for interior edges (and for boundary edges when no
    /// boundary template is configured).
    pub interior: ObjectId,
    /// Optional template for boundary edges (edges linked to at most one
    /// face).
    pub boundary: Option<ObjectId>,
}

impl ScatterTemplates {
    /// Use one template for every edge.
    pub fn single(template: ObjectId) -> Self {
        Self {
            interior: template,
            boundary: None,
        }
    }
}

/// What a successful scatter produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOutcome {
    /// The retained output group.
    pub output_group: GroupId,
    /// Baked petal mesh objects, two per qualifying edge, in edge order.
    pub baked: Vec<ObjectId>,
    /// Edges that passed the length test.
    pub qualifying_edges: usize,
    /// Edges skipped by the length test.
    pub skipped_short_edges: usize,
    /// Zero-length edges skipped as degenerate.
    pub skipped_degenerate_edges: usize,
}

/// Scatter mirrored petal pairs over every qualifying edge of a sheet.
///
/// For each sheet edge whose half-length strictly exceeds the petal
/// overhang plus the margin, two petal instances are placed at the edge
/// midpoint with opposing rotations, baked into triangle meshes, and
/// collected into the output group. Transient curve instances are removed
/// on every exit path; on failure the partial output is removed as well,
/// leaving the scene as it was before the call.
///
/// # Errors
///
/// Fails fast (before any scene mutation) on precondition violations:
/// a non-planar sheet, a template that is not a single 3-point spline, a
/// template that does not extend along +X, or a zero reference axis. Any
/// host operation failure mid-loop aborts the whole operation after
/// rollback.
pub fn scatter_petals(
    scene: &mut dyn SceneHost,
    sheet: ObjectId,
    templates: &ScatterTemplates,
    config: &ScatterConfig,
) -> Result<ScatterOutcome> {
    let tol = Tolerance::DEFAULT;
    let reference_axis = Vec3::from(config.reference_axis);
    if tol.is_zero(reference_axis.norm()) {
        return Err(ScatterError::ZeroReferenceAxis);
    }

    // Precondition pass: nothing below may mutate the scene until all of
    // these hold.
    let mesh = scene.read_mesh(sheet)?;
    if let Some(bounds) = mesh.bounds() {
        let spread = bounds.z_extent();
        if spread > tol.linear {
            return Err(ScatterError::SheetNotPlanar(spread));
        }
    }
    let sheet_placement = scene.placement(sheet)?;

    let extents = ClassExtents {
        interior: validate_template(&*scene, templates.interior)?,
        boundary: match templates.boundary {
            Some(id) => Some(validate_template(&*scene, id)?),
            None => None,
        },
    };

    let summary = plan_edges(&mesh, &extents, config.margin, &reference_axis, &tol);
    let qualifying_edges = summary.plans.len();
    debug_scatter!(
        "planned {} petal pairs ({} short, {} degenerate)",
        qualifying_edges,
        summary.skipped_short,
        summary.skipped_degenerate
    );

    let instance_group = scene.create_group(&config.instance_group);
    let output_group = scene.create_group(&config.output_group);

    let placed = place_all(
        scene,
        templates,
        config,
        &summary.plans,
        sheet_placement,
        instance_group,
        output_group,
    );

    // The transient instances go away on every exit path.
    let released = release_group(scene, instance_group);

    let failure = match (placed, released) {
        (Ok(baked), Ok(())) => match scene.commit_mesh(sheet, mesh) {
            Ok(()) => {
                return Ok(ScatterOutcome {
                    output_group,
                    baked,
                    qualifying_edges,
                    skipped_short_edges: summary.skipped_short,
                    skipped_degenerate_edges: summary.skipped_degenerate,
                });
            }
            Err(err) => err.into(),
        },
        (Err(err), _) => err,
        (Ok(_), Err(err)) => err,
    };

    // Roll the partial output back; the primary failure wins over any
    // error the rollback itself produces.
    let _ = release_group(scene, output_group);
    Err(failure)
}

/// Read a template, check the petal convention, and return its overhang.
fn validate_template(scene: &dyn SceneHost, template: ObjectId) -> Result<f64> {
    let curve = scene.read_curve(template)?;
    curve.validate_petal_template()?;
    let corners = scene.bounding_box(template)?;
    let max_x = bounding_x_extent(&corners);
    if max_x <= 0.0 {
        return Err(ScatterError::TemplateFacesBackward(max_x));
    }
    Ok(max_x)
}

/// Instantiate and bake both petals of every planned edge.
fn place_all(
    scene: &mut dyn SceneHost,
    templates: &ScatterTemplates,
    config: &ScatterConfig,
    plans: &[EdgePlan],
    sheet_placement: Placement,
    instance_group: GroupId,
    output_group: GroupId,
) -> Result<Vec<ObjectId>> {
    let mut baked = Vec::with_capacity(plans.len() * 2);
    for plan in plans {
        let template = match plan.class {
            EdgeClass::Boundary => templates.boundary.unwrap_or(templates.interior),
            EdgeClass::Interior => templates.interior,
        };
        for rotation in [plan.rotation, plan.rotation + PI] {
            let mesh = instantiate_petal(
                scene,
                template,
                plan,
                rotation,
                config,
                sheet_placement,
                instance_group,
            )?;
            scene.add_to_group(output_group, mesh)?;
            baked.push(mesh);
        }
    }
    Ok(baked)
}

/// Duplicate a template, collapse its anchors, place, freeze, and bake it.
///
/// Returns the id of the baked mesh object; the transient curve instance
/// stays linked in `instance_group` for the collector to release.
fn instantiate_petal(
    scene: &mut dyn SceneHost,
    template: ObjectId,
    plan: &EdgePlan,
    rotation: f64,
    config: &ScatterConfig,
    sheet_placement: Placement,
    instance_group: GroupId,
) -> Result<ObjectId> {
    let instance = scene.duplicate_object(template)?;
    scene.add_to_group(instance_group, instance)?;

    // Both free endpoints collapse to the mirrored anchor offset.
    let anchor = Point3::new(-plan.anchor_offset, 0.0, 0.0);
    scene.set_curve_control_point(instance, 0, 0, anchor)?;
    scene.set_curve_control_point(instance, 0, 2, anchor)?;

    scene.set_placement(instance, Placement::new(plan.midpoint, rotation))?;
    // Baking operates on world-space geometry; the wrapper object is gone
    // before the output mesh is consumed.
    scene.freeze_transform(instance)?;

    let baked = scene.bake_to_mesh(instance, &config.tessellation)?;
    scene.set_placement(baked, sheet_placement)?;
    Ok(baked)
}

/// Remove every member of a group, then the group itself.
fn release_group(scene: &mut dyn SceneHost, group: GroupId) -> Result<()> {
    for member in scene.group_members(group)? {
        scene.remove_object(member)?;
    }
    scene.delete_group(group)?;
    Ok(())
}
