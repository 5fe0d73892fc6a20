#![warn(missing_docs)]

//! Curve-to-mesh baking for the floret petal-scattering kernel.
//!
//! Bakes a beveled Bezier spline into a discrete triangle mesh by sampling
//! the curve into a polyline, computing rotation-minimizing sweep frames,
//! and sweeping a circular cross-section of the bevel radius along it. The
//! resulting tube is capped at both ends.

mod frame;

pub use frame::{sweep_frames, SweepFrame};

use std::f64::consts::PI;

use floret_curve::{BezierSpline, CurveObject};
use floret_math::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from curve baking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TessellationError {
    /// The curve has a zero bevel radius; there is no surface to bake.
    #[error("cannot bake a wire curve: bevel radius {0} is not positive")]
    WireCurve(f64),

    /// The sampled curve has no measurable length.
    #[error("curve is degenerate: sampled length {0:.3e} below tolerance")]
    DegenerateCurve(f64),

    /// Too few segments along the curve.
    #[error("need at least 1 curve segment, got {0}")]
    TooFewCurveSegments(u32),

    /// Too few segments around the bevel circle.
    #[error("need at least 3 bevel segments, got {0}")]
    TooFewBevelSegments(u32),

    /// The curve object has no splines.
    #[error("curve object has no splines to bake")]
    EmptyCurve,
}

/// Output triangle mesh for baked petals.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same
    /// length as `vertices`.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3] as f64,
            self.vertices[i * 3 + 1] as f64,
            self.vertices[i * 3 + 2] as f64,
        )
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    fn push_vertex(&mut self, p: Point3, n: floret_math::Vec3) {
        self.vertices
            .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        self.normals
            .extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Baking parameters controlling mesh quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellationParams {
    /// Number of polyline segments along the curve.
    pub curve_segments: u32,
    /// Number of segments around the circular bevel profile.
    pub bevel_segments: u32,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            curve_segments: 16,
            bevel_segments: 8,
        }
    }
}

/// Bake a single beveled spline into a capped tube mesh.
///
/// # Errors
///
/// Returns an error if the bevel radius is not positive, the params are
/// below their minimums, or the sampled curve has no measurable length.
pub fn bake_spline(
    spline: &BezierSpline,
    params: &TessellationParams,
) -> Result<TriangleMesh, TessellationError> {
    let radius = spline.bevel_radius();
    if radius <= 0.0 {
        return Err(TessellationError::WireCurve(radius));
    }
    if params.curve_segments < 1 {
        return Err(TessellationError::TooFewCurveSegments(params.curve_segments));
    }
    if params.bevel_segments < 3 {
        return Err(TessellationError::TooFewBevelSegments(params.bevel_segments));
    }

    let samples = spline.sample(params.curve_segments as usize);
    let length: f64 = samples.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    if length < 1e-12 {
        return Err(TessellationError::DegenerateCurve(length));
    }

    let frames = sweep_frames(&samples);
    let n_rings = samples.len();
    let n_segs = params.bevel_segments as usize;

    let mut mesh = TriangleMesh::new();

    // Rings of the tube wall
    for (point, frame) in samples.iter().zip(frames.iter()) {
        for seg in 0..n_segs {
            let angle = 2.0 * PI * seg as f64 / n_segs as f64;
            let (sin_a, cos_a) = angle.sin_cos();
            let radial = cos_a * frame.normal.as_ref() + sin_a * frame.binormal.as_ref();
            mesh.push_vertex(point + radius * radial, radial);
        }
    }

    for ring in 0..n_rings - 1 {
        for seg in 0..n_segs {
            let curr = (ring * n_segs + seg) as u32;
            let next_seg = (ring * n_segs + (seg + 1) % n_segs) as u32;
            let next_ring = ((ring + 1) * n_segs + seg) as u32;
            let next_both = ((ring + 1) * n_segs + (seg + 1) % n_segs) as u32;

            mesh.indices.extend_from_slice(&[curr, next_ring, next_seg]);
            mesh.indices
                .extend_from_slice(&[next_seg, next_ring, next_both]);
        }
    }

    // End caps: a center vertex fanned to its ring
    let start_center = mesh.num_vertices() as u32;
    mesh.push_vertex(samples[0], -frames[0].tangent.as_ref());
    for seg in 0..n_segs {
        let a = seg as u32;
        let b = ((seg + 1) % n_segs) as u32;
        mesh.indices.extend_from_slice(&[start_center, b, a]);
    }

    let end_center = mesh.num_vertices() as u32;
    let last_ring = ((n_rings - 1) * n_segs) as u32;
    mesh.push_vertex(
        samples[n_rings - 1],
        *frames[n_rings - 1].tangent.as_ref(),
    );
    for seg in 0..n_segs {
        let a = last_ring + seg as u32;
        let b = last_ring + ((seg + 1) % n_segs) as u32;
        mesh.indices.extend_from_slice(&[end_center, a, b]);
    }

    Ok(mesh)
}

/// Bake every spline of a curve object and merge the results.
///
/// # Errors
///
/// Returns an error if the object has no splines or any spline fails to
/// bake.
pub fn bake_curve_object(
    object: &CurveObject,
    params: &TessellationParams,
) -> Result<TriangleMesh, TessellationError> {
    if object.splines().is_empty() {
        return Err(TessellationError::EmptyCurve);
    }
    let mut mesh = TriangleMesh::new();
    for spline in object.splines() {
        mesh.merge(&bake_spline(spline, params)?);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floret_math::{Aabb, Point3};

    fn petal_spline() -> BezierSpline {
        BezierSpline::new(
            vec![
                Point3::new(-0.5, 0.0, 0.0),
                Point3::new(0.4, 0.0, 0.0),
                Point3::new(-0.5, 0.0, 0.0),
            ],
            0.05,
        )
        .unwrap()
    }

    #[test]
    fn test_bake_counts() {
        let params = TessellationParams {
            curve_segments: 4,
            bevel_segments: 6,
        };
        let mesh = bake_spline(&petal_spline(), &params).unwrap();
        // 5 rings of 6 plus two cap centers
        assert_eq!(mesh.num_vertices(), 5 * 6 + 2);
        // 4 quad bands of 6 quads (2 tris each) plus two 6-tri caps
        assert_eq!(mesh.num_triangles(), 4 * 6 * 2 + 2 * 6);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
    }

    #[test]
    fn test_bake_stays_near_curve() {
        let spline = petal_spline();
        let params = TessellationParams::default();
        let mesh = bake_spline(&spline, &params).unwrap();
        let positions: Vec<Point3> = (0..mesh.num_vertices()).map(|i| mesh.vertex(i)).collect();
        let bb = Aabb::from_points(positions.iter()).unwrap();
        // Tube must stay within curve bounds inflated by the bevel radius
        let curve_bb = Aabb::from_points(spline.sample(64).iter()).unwrap();
        let r = spline.bevel_radius() + 1e-6;
        assert!(bb.max.x <= curve_bb.max.x + r);
        assert!(bb.min.x >= curve_bb.min.x - r);
        assert!(bb.max.z <= curve_bb.max.z + r);
    }

    #[test]
    fn test_wire_curve_rejected() {
        let spline = BezierSpline::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            0.0,
        )
        .unwrap();
        assert!(matches!(
            bake_spline(&spline, &TessellationParams::default()),
            Err(TessellationError::WireCurve(_))
        ));
    }

    #[test]
    fn test_degenerate_curve_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let spline = BezierSpline::new(vec![p, p, p], 0.1).unwrap();
        assert!(matches!(
            bake_spline(&spline, &TessellationParams::default()),
            Err(TessellationError::DegenerateCurve(_))
        ));
    }

    #[test]
    fn test_bad_params_rejected() {
        let spline = petal_spline();
        let too_few_bevel = TessellationParams {
            curve_segments: 4,
            bevel_segments: 2,
        };
        assert!(matches!(
            bake_spline(&spline, &too_few_bevel),
            Err(TessellationError::TooFewBevelSegments(2))
        ));
        let too_few_curve = TessellationParams {
            curve_segments: 0,
            bevel_segments: 8,
        };
        assert!(matches!(
            bake_spline(&spline, &too_few_curve),
            Err(TessellationError::TooFewCurveSegments(0))
        ));
    }

    #[test]
    fn test_bake_object_merges_splines() {
        let s = petal_spline();
        let params = TessellationParams {
            curve_segments: 4,
            bevel_segments: 6,
        };
        let single = bake_curve_object(&CurveObject::new(vec![s.clone()]), &params).unwrap();
        let double = bake_curve_object(&CurveObject::new(vec![s.clone(), s]), &params).unwrap();
        assert_eq!(double.num_vertices(), 2 * single.num_vertices());
        assert_eq!(double.num_triangles(), 2 * single.num_triangles());
    }

    #[test]
    fn test_empty_object_rejected() {
        assert!(matches!(
            bake_curve_object(&CurveObject::new(vec![]), &TessellationParams::default()),
            Err(TessellationError::EmptyCurve)
        ));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let params = TessellationParams {
            curve_segments: 2,
            bevel_segments: 3,
        };
        let part = bake_spline(&petal_spline(), &params).unwrap();
        let mut merged = part.clone();
        merged.merge(&part);
        let max_index = *merged.indices.iter().max().unwrap() as usize;
        assert!(max_index < merged.num_vertices());
        assert!(max_index >= part.num_vertices());
    }
}
