#![warn(missing_docs)]

//! Math types for the floret petal-scattering kernel.
//!
//! Thin wrappers around nalgebra providing the domain-specific types the
//! pipeline needs: points, vectors, axis-aligned bounds, the planar
//! placement transform (translation + rotation about Z), and tolerance
//! constants.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A world placement: translation plus a rotation about the world Z axis.
///
/// Sheets are planar and orthogonal to Z, so the only transform the
/// scattering pipeline ever applies is "spin about Z, then move". Applying
/// a placement rotates first, then translates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World position of the object origin.
    pub position: Point3,
    /// Rotation about the world Z axis, in radians.
    pub euler_z: f64,
}

impl Placement {
    /// The identity placement: origin position, no rotation.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            euler_z: 0.0,
        }
    }

    /// Placement at `position` with rotation `euler_z` about Z.
    pub fn new(position: Point3, euler_z: f64) -> Self {
        Self { position, euler_z }
    }

    /// Whether this placement leaves geometry unchanged.
    pub fn is_identity(&self) -> bool {
        self.euler_z == 0.0 && self.position == Point3::origin()
    }

    /// Apply this placement to a point in local coordinates.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let (s, c) = self.euler_z.sin_cos();
        Point3::new(
            c * p.x - s * p.y + self.position.x,
            s * p.x + c * p.y + self.position.y,
            p.z + self.position.z,
        )
    }

    /// Apply only the rotational part to a vector.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let (s, c) = self.euler_z.sin_cos();
        Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Bounding box of a set of points. Returns `None` for an empty set.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = *first;
        let mut max = *first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self { min, max })
    }

    /// The eight corner points, in `(x, y, z)` bit order: index bit 0 picks
    /// max X, bit 1 max Y, bit 2 max Z.
    pub fn corners(&self) -> [Point3; 8] {
        let mut out = [Point3::origin(); 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        out
    }

    /// Extent along Z (`max.z - min.z`).
    pub fn z_extent(&self) -> f64 {
        self.max.z - self.min.z
    }
}

/// Tolerance constants for geometric comparisons, in world units.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_placement() {
        let pl = Placement::identity();
        assert!(pl.is_identity());
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!((pl.apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn test_placement_rotates_then_translates() {
        // 90° about Z takes (1,0,0) to (0,1,0); then shift by (10,0,0).
        let pl = Placement::new(Point3::new(10.0, 0.0, 0.0), PI / 2.0);
        let p = pl.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_placement_preserves_z() {
        let pl = Placement::new(Point3::new(0.0, 0.0, 5.0), PI / 3.0);
        let p = pl.apply_point(&Point3::new(2.0, -1.0, 1.5));
        assert!((p.z - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_apply_vec_ignores_translation() {
        let pl = Placement::new(Point3::new(100.0, 200.0, 300.0), PI);
        let v = pl.apply_vec(&Vec3::new(1.0, 0.0, 0.0));
        assert!((v.x + 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
    }

    #[test]
    fn test_aabb_from_points() {
        let pts = [
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(3.0, -4.0, 1.0),
            Point3::new(0.0, 0.0, -2.0),
        ];
        let bb = Aabb::from_points(pts.iter()).unwrap();
        assert_eq!(bb.min, Point3::new(-1.0, -4.0, -2.0));
        assert_eq!(bb.max, Point3::new(3.0, 2.0, 1.0));
        assert!((bb.z_extent() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_aabb_empty() {
        assert!(Aabb::from_points(std::iter::empty::<&Point3>()).is_none());
    }

    #[test]
    fn test_aabb_corners_cover_extremes() {
        let bb = Aabb {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(1.0, 2.0, 3.0),
        };
        let corners = bb.corners();
        let max_x = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
        assert!((max_x - 1.0).abs() < 1e-12);
        assert!(corners.iter().any(|c| *c == bb.min));
        assert!(corners.iter().any(|c| *c == bb.max));
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        assert!(tol.points_equal(&a, &Point3::new(1.0 + 1e-12, 2.0, 3.0)));
        assert!(!tol.points_equal(&a, &Point3::new(1.001, 2.0, 3.0)));
        assert!(tol.is_zero(-1e-10));
        assert!(!tol.is_zero(1e-6));
    }
}
