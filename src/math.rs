//! Small vector helpers shared by the generators.
//!
//! Dot, cross and normalization come from nalgebra; this module adds the
//! handful of comparisons and reductions the mesh algorithms need on top.

use nalgebra::{Point3, Vector3};

/// Flat normal of the triangle `(p0, p1, p2)` assuming counter-clockwise winding.
///
/// Zero-area triangles produce a non-finite result; callers must not pass
/// degenerate triangles.
#[inline]
pub fn triangle_normal(p0: &Point3<f32>, p1: &Point3<f32>, p2: &Point3<f32>) -> Vector3<f32> {
    let u = p1 - p0;
    let v = p2 - p0;
    let n = u.cross(&v);
    n / n.norm()
}

/// Box-metric comparison: true when every axis differs by less than `epsilon`.
///
/// Axes that are exactly equal always compare equal, so `epsilon == 0`
/// matches exact duplicates only.
#[inline]
pub fn within_box(u: &Point3<f32>, v: &Point3<f32>, epsilon: f32) -> bool {
    (0..3).all(|i| {
        let d = (u[i] - v[i]).abs();
        d == 0.0 || d < epsilon
    })
}

/// Axis-aligned bounds of a set of points, or `None` when empty.
pub fn bounds<'a, I>(points: I) -> Option<(Point3<f32>, Point3<f32>)>
where
    I: IntoIterator<Item = &'a Point3<f32>>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (mut min, mut max) = (first, first);
    for p in iter {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    Some((min, max))
}
