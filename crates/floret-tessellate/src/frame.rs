//! Sweep frames along a polyline.

use floret_math::{Dir3, Point3, Vec3};

/// An orthonormal frame at a polyline sample, used to orient the circular
/// bevel profile during sweeping.
#[derive(Debug, Clone)]
pub struct SweepFrame {
    /// Unit tangent along the polyline.
    pub tangent: Dir3,
    /// Unit normal (profile local X).
    pub normal: Dir3,
    /// Unit binormal (profile local Y, tangent × normal).
    pub binormal: Dir3,
}

/// Compute rotation-minimizing frames along a polyline.
///
/// The first frame picks an arbitrary perpendicular normal; subsequent
/// frames propagate it with the double-reflection method so the profile
/// does not spin around the curve. Zero-length segments reuse the previous
/// frame. Returns one frame per input point; empty for fewer than two
/// points.
pub fn sweep_frames(points: &[Point3]) -> Vec<SweepFrame> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut frames = Vec::with_capacity(points.len());
    frames.push(initial_frame(points));

    for i in 1..points.len() {
        let prev: &SweepFrame = &frames[i - 1];

        let v1 = points[i] - points[i - 1];
        let c1 = v1.dot(&v1);
        if c1 < 1e-24 {
            frames.push(prev.clone());
            continue;
        }

        // Reflect previous tangent and normal across the chord midplane
        let ri_l = prev.normal.as_ref() - (2.0 / c1) * v1.dot(prev.normal.as_ref()) * v1;
        let ti_l = prev.tangent.as_ref() - (2.0 / c1) * v1.dot(prev.tangent.as_ref()) * v1;

        let ti = tangent_at(points, i);

        // Second reflection to align with the actual tangent
        let v2 = ti.as_ref() - ti_l;
        let c2 = v2.dot(&v2);
        let ri = if c2 < 1e-24 {
            ri_l
        } else {
            ri_l - (2.0 / c2) * v2.dot(&ri_l) * v2
        };

        let normal = Dir3::new_normalize(ri);
        let binormal = Dir3::new_normalize(ti.as_ref().cross(normal.as_ref()));
        frames.push(SweepFrame {
            tangent: ti,
            normal,
            binormal,
        });
    }

    frames
}

/// Unit tangent at sample `i`: central difference at interior points,
/// one-sided at the ends, falling back over zero-length segments.
fn tangent_at(points: &[Point3], i: usize) -> Dir3 {
    let n = points.len();
    let raw = if i == 0 {
        points[1] - points[0]
    } else if i == n - 1 {
        points[n - 1] - points[n - 2]
    } else {
        points[i + 1] - points[i - 1]
    };
    if raw.norm() < 1e-12 {
        // Collapsed neighborhood; any consistent direction will do
        Dir3::new_normalize(Vec3::x())
    } else {
        Dir3::new_normalize(raw)
    }
}

fn initial_frame(points: &[Point3]) -> SweepFrame {
    let tangent = tangent_at(points, 0);
    let arbitrary = if tangent.as_ref().x.abs() < 0.9 {
        Vec3::x()
    } else {
        Vec3::y()
    };
    let normal = Dir3::new_normalize(arbitrary.cross(tangent.as_ref()));
    let binormal = Dir3::new_normalize(tangent.as_ref().cross(normal.as_ref()));
    SweepFrame {
        tangent,
        normal,
        binormal,
    }
}
