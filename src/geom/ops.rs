//! Stateless geometric helpers shared by the rod model and panel layout.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use super::vector::Vector3;
use crate::error::{Error, Result};

/// Turning angle between the directions of two segments, in `[0, π]`.
///
/// The cosine is clamped before `acos` since rounding can push the dot
/// product of two unit vectors just past ±1.
///
/// # Errors
///
/// [`Error::ZeroLengthVector`] when either segment has zero length.
pub fn angle_between_segments(seg_a: (Vector3, Vector3), seg_b: (Vector3, Vector3)) -> Result<f64> {
    let dir_a = (seg_a.1 - seg_a.0).normalize()?;
    let dir_b = (seg_b.1 - seg_b.0).normalize()?;
    let cos = dir_a.dot(dir_b);

    if cos > 1.0 {
        Ok(0.0)
    } else if cos < -1.0 {
        Ok(PI)
    } else {
        Ok(cos.acos())
    }
}

/// Two independent standard-normal samples (Box–Muller transform).
pub fn gaussian_sample<R: Rng>(rng: &mut R) -> (f64, f64) {
    // (0, 1] keeps ln finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();

    let radius = (-2.0 * u1.ln()).sqrt();
    let (sin, cos) = (TAU * u2).sin_cos();
    (radius * cos, radius * sin)
}

/// Both roots of `a·x² + b·x + c = 0`, `+√Δ` root first.
///
/// # Errors
///
/// - [`Error::NotQuadratic`] when `a == 0`.
/// - [`Error::NoRealRoots`] when the discriminant is negative.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<[f64; 2]> {
    if a == 0.0 {
        return Err(Error::NotQuadratic);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Err(Error::NoRealRoots { discriminant });
    }
    let sqrt = discriminant.sqrt();
    Ok([(-b + sqrt) / (2.0 * a), (-b - sqrt) / (2.0 * a)])
}

/// Shortest distance from `point` to the segment `a`–`b`.
///
/// A zero-length segment is treated as the single point `a`.
pub fn point_to_segment_distance(point: Vector3, a: Vector3, b: Vector3) -> f64 {
    let ab = b - a;
    let ap = point - a;

    let Ok(direction) = ab.normalize() else {
        return point.distance(a);
    };
    let projection = ap.dot(direction);

    if projection >= ab.length() {
        point.distance(b)
    } else if projection <= 0.0 {
        point.distance(a)
    } else {
        // rounding can leave a tiny negative leg for points on the segment
        (ap.length_squared() - projection * projection).max(0.0).sqrt()
    }
}

/// Positions on the z = 0 plane at `dist_a` from `a` and `dist_b` from `b`.
///
/// `a` and `b` are expected to lie on the z = 0 plane already. Working
/// relative to `b` with `t = a - b`, a candidate `c` satisfies `|c| = dist_b`
/// and `c·t = (dist_b² - dist_a² + |t|²) / 2`. The linear constraint is
/// solved for the coordinate along the dominant axis of `t` and
/// substituted into the circle, giving a quadratic in the other one. When
/// `t.x` is exactly zero this is the direct `y`, then `x = ±sqrt(..)`
/// solution.
///
/// The two candidates are mirror images across the line through `a` and
/// `b`, ordered larger `y` first (larger `x` first when `a` and `b` share
/// an `x`). When `a` and `b` coincide the answer is not unique and the
/// points `b ± (dist_a, 0, 0)` are returned.
///
/// # Errors
///
/// [`Error::NoIntersection`] when no point satisfies both distances.
pub fn trilaterate(a: Vector3, b: Vector3, dist_a: f64, dist_b: f64) -> Result<[Vector3; 2]> {
    let t = a - b;
    let on_plane = |x: f64, y: f64| Vector3::new(x + b.x, y + b.y, 0.0);

    if t.x == 0.0 && t.y == 0.0 {
        return Ok([on_plane(dist_a, 0.0), on_plane(-dist_a, 0.0)]);
    }

    let rhs = (dist_b * dist_b - dist_a * dist_a + t.x * t.x + t.y * t.y) / 2.0;

    if t.x.abs() >= t.y.abs() {
        // x = r·y + beta
        let r = -t.y / t.x;
        let beta = rhs / t.x;
        let ys = solve_quadratic(1.0 + r * r, 2.0 * beta * r, beta * beta - dist_b * dist_b)
            .map_err(|_| Error::NoIntersection)?;

        Ok(ys.map(|y| on_plane(r * y + beta, y)))
    } else {
        // y = r·x + beta
        let r = -t.x / t.y;
        let beta = rhs / t.y;
        let xs = solve_quadratic(1.0 + r * r, 2.0 * beta * r, beta * beta - dist_b * dist_b)
            .map_err(|_| Error::NoIntersection)?;

        let mut candidates = xs.map(|x| on_plane(x, r * x + beta));
        if t.x != 0.0 && candidates[0].y < candidates[1].y {
            candidates.swap(0, 1);
        }
        Ok(candidates)
    }
}
