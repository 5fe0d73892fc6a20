//! Per-edge placement planning.

use floret_math::{Point3, Tolerance, Vec3};
use floret_scene::MeshData;

use crate::queries::{edge_midpoint, edge_rotation};

/// Whether an edge sits on the sheet boundary or in its interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// Linked to two or more faces.
    Interior,
    /// Linked to at most one face.
    Boundary,
}

/// A planned petal pair for one qualifying edge.
///
/// The pair shares the midpoint and anchor offset; the second instance is
/// rotated by an additional π.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePlan {
    /// Edge midpoint, the placement position for both instances.
    pub midpoint: Point3,
    /// Signed rotation of the first instance about Z.
    pub rotation: f64,
    /// Distance from the midpoint to the edge start vertex; the free
    /// endpoints of each instance collapse to `(-anchor_offset, 0, 0)`
    /// local.
    pub anchor_offset: f64,
    /// Boundary classification of the source edge.
    pub class: EdgeClass,
}

/// Planning result: the qualifying edges plus skip diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSummary {
    /// One plan per qualifying edge, in edge order.
    pub plans: Vec<EdgePlan>,
    /// Edges skipped by the length test.
    pub skipped_short: usize,
    /// Zero-length edges skipped as degenerate.
    pub skipped_degenerate: usize,
}

/// The petal overhang for each edge class.
///
/// With no boundary template configured, boundary edges fall back to the
/// interior extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassExtents {
    /// Max X extent of the interior template.
    pub interior: f64,
    /// Max X extent of the boundary template, when one is configured.
    pub boundary: Option<f64>,
}

impl ClassExtents {
    fn for_class(&self, class: EdgeClass) -> f64 {
        match class {
            EdgeClass::Interior => self.interior,
            EdgeClass::Boundary => self.boundary.unwrap_or(self.interior),
        }
    }
}

/// The length test: half the edge must clear the petal overhang plus the
/// configured margin, strictly.
pub fn qualifies(edge_length: f64, petal_max_x: f64, margin: f64) -> bool {
    edge_length / 2.0 > petal_max_x + margin
}

/// Plan petal pairs for every qualifying edge of a sheet.
///
/// Degenerate edges (zero length within tolerance) and edges failing the
/// length test are counted and skipped. Edges whose vertex indices are out
/// of range are treated as degenerate.
pub fn plan_edges(
    mesh: &MeshData,
    extents: &ClassExtents,
    margin: f64,
    reference_axis: &Vec3,
    tol: &Tolerance,
) -> PlanSummary {
    let mut summary = PlanSummary::default();

    for index in 0..mesh.edges.len() {
        let Some((v0, v1)) = mesh.edge_endpoints(index) else {
            summary.skipped_degenerate += 1;
            continue;
        };
        let Some(rotation) = edge_rotation(&v0, &v1, reference_axis, tol) else {
            summary.skipped_degenerate += 1;
            continue;
        };

        let class = if mesh.edge_face_count(index) > 1 {
            EdgeClass::Interior
        } else {
            EdgeClass::Boundary
        };

        let edge_length = (v1 - v0).norm();
        if !qualifies(edge_length, extents.for_class(class), margin) {
            summary.skipped_short += 1;
            continue;
        }

        let midpoint = edge_midpoint(&v0, &v1);
        summary.plans.push(EdgePlan {
            midpoint,
            rotation,
            anchor_offset: (midpoint - v0).norm(),
            class,
        });
    }

    summary
}
