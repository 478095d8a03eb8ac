//! Rod state: polyline, anchors and the energy model.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::Stiffness;
use crate::error::{Error, Result};
use crate::geom::{angle_between_segments, gaussian_sample, point_to_segment_distance, Vector3};
use crate::sa::AnnealState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard deviation, in radians, of the bend applied by one neighbor move.
pub const NEIGHBOR_ANGLE_SCALE: f64 = 0.01;

/// A rod: an ordered polyline pulled towards a fixed set of anchors.
///
/// # Invariants
///
/// - at least one point
/// - no two consecutive points coincide, except in a single point
///   stretched by [`RodState::rescale`]
/// - stiffness coefficients are finite and non-negative
///
/// Rods with fewer than three points are valid; they just have no
/// interior joint, so their bending energy is zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RodState {
    points: Vec<Vector3>,
    anchors: Vec<Vector3>,
    stiffness: Stiffness,
}

impl RodState {
    /// Creates a rod, validating its invariants.
    ///
    /// # Errors
    ///
    /// - [`Error::TooFewPoints`] for an empty point list
    /// - [`Error::DegenerateSegment`] when two consecutive points coincide
    /// - [`Error::InvalidStiffness`] for negative or non-finite stiffness
    pub fn new(points: Vec<Vector3>, anchors: Vec<Vector3>, stiffness: Stiffness) -> Result<Self> {
        stiffness.validate()?;
        if points.is_empty() {
            return Err(Error::TooFewPoints {
                required: 1,
                actual: 0,
            });
        }
        if let Some(i) = points.windows(2).position(|w| w[0] == w[1]) {
            return Err(Error::DegenerateSegment(i));
        }
        Ok(Self {
            points,
            anchors,
            stiffness,
        })
    }

    /// A straight starting rod: `num_points` evenly spaced points on a
    /// line parallel to X at height `z`, running from `x = length/2`
    /// towards `x = -length/2` in steps of `length / num_points`.
    pub fn straight(
        num_points: usize,
        length: f64,
        z: f64,
        anchors: Vec<Vector3>,
        stiffness: Stiffness,
    ) -> Result<Self> {
        let step = length / num_points as f64;
        let points = (0..num_points)
            .map(|j| Vector3::new(0.5 * length - step * j as f64, 0.0, z))
            .collect();
        Self::new(points, anchors, stiffness)
    }

    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    pub fn anchors(&self) -> &[Vector3] {
        &self.anchors
    }

    pub fn stiffness(&self) -> Stiffness {
        self.stiffness
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Bending penalty: `rod_stiffness · θ²` summed over interior joints,
    /// where `θ` is the turning angle between the two adjoining segments.
    pub fn rod_energy(&self) -> f64 {
        self.points
            .windows(3)
            .map(|w| {
                // segments are non-degenerate by construction
                angle_between_segments((w[0], w[1]), (w[1], w[2]))
                    .map_or(0.0, |angle| self.stiffness.rod * angle * angle)
            })
            .sum()
    }

    /// Anchor penalty: `anchor_stiffness · d²` summed over anchors, where
    /// `d` is the anchor's distance to the nearest point of the rod.
    pub fn anchor_energy(&self) -> f64 {
        self.anchors
            .iter()
            .map(|&anchor| {
                let d = self.distance_to(anchor);
                self.stiffness.anchor * d * d
            })
            .sum()
    }

    /// Shortest distance from `point` to the polyline.
    pub fn distance_to(&self, point: Vector3) -> f64 {
        if let [only] = self.points.as_slice() {
            return point.distance(*only);
        }
        self.points
            .windows(2)
            .map(|w| point_to_segment_distance(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Index of the rod point closest to `target`; the first one on ties.
    pub fn closest_point_index(&self, target: Vector3) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let d = target.distance(*p);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best
    }

    /// Trims the rod to the span between its first and last anchor.
    ///
    /// Keeps the points from the one closest to the first anchor through
    /// the one closest to the last anchor (inclusive, in rod order).
    ///
    /// # Errors
    ///
    /// [`Error::NoAnchors`] when the rod has no anchors.
    pub fn clip_to_anchors(&self) -> Result<Self> {
        let (Some(&first), Some(&last)) = (self.anchors.first(), self.anchors.last()) else {
            return Err(Error::NoAnchors);
        };

        let start = self.closest_point_index(first);
        let end = self.closest_point_index(last);
        let (lo, hi) = (start.min(end), start.max(end));

        Ok(Self {
            points: self.points[lo..=hi].to_vec(),
            anchors: self.anchors.clone(),
            stiffness: self.stiffness,
        })
    }

    /// Resamples the polyline to exactly `num_points` points.
    ///
    /// Samples are spaced evenly in fractional point index and linearly
    /// interpolated, so the first and last points are kept.
    ///
    /// A single-point rod is stretched by repeating its point, which is
    /// the one way to obtain a rod with coincident consecutive points.
    ///
    /// # Errors
    ///
    /// [`Error::TooFewPoints`] when `num_points` is 0.
    pub fn rescale(&self, num_points: usize) -> Result<Self> {
        if num_points == 0 {
            return Err(Error::TooFewPoints {
                required: 1,
                actual: 0,
            });
        }

        let len = self.points.len();
        if len == 1 {
            // a single point stretches into a fan apex of repeated points
            return Ok(Self {
                points: vec![self.points[0]; num_points],
                anchors: self.anchors.clone(),
                stiffness: self.stiffness,
            });
        }

        let points = if num_points == 1 {
            vec![self.points[0]]
        } else {
            let last = (len - 1) as f64;
            let denom = (num_points - 1) as f64;
            (0..num_points)
                .map(|i| {
                    let pos = last * i as f64 / denom;
                    let idx = (pos.floor() as usize).min(len - 2);
                    self.points[idx].lerp(self.points[idx + 1], pos - idx as f64)
                })
                .collect()
        };

        Self::new(points, self.anchors.clone(), self.stiffness)
    }

    /// The rod and its anchors mirrored across the XZ plane.
    pub fn reflect_y(&self) -> Self {
        Self {
            points: self.points.iter().map(|p| p.reflect_y()).collect(),
            anchors: self.anchors.iter().map(|a| a.reflect_y()).collect(),
            stiffness: self.stiffness,
        }
    }
}

/// Unit vector in the XY plane perpendicular to `axis`.
///
/// Falls back to +X when `axis` is parallel to Z.
fn perpendicular_in_xy(axis: Vector3) -> Vector3 {
    Vector3::new(-axis.y, axis.x, 0.0)
        .normalize()
        .unwrap_or(Vector3::new(1.0, 0.0, 0.0))
}

impl AnnealState for RodState {
    /// Bends the rod at a random joint.
    ///
    /// Picks a pivot point and a direction (towards the tail or the
    /// head), then rigidly rotates every point past the pivot about it by
    /// a small Gaussian angle around a random axis perpendicular to the
    /// local tangent. Segment lengths are preserved; anchors and
    /// stiffness are carried over unchanged.
    fn neighbor<R: Rng>(&self, rng: &mut R) -> Result<Self> {
        let n = self.points.len();
        if n < 2 {
            return Err(Error::TooFewPoints {
                required: 2,
                actual: n,
            });
        }

        let tweak_angle = NEIGHBOR_ANGLE_SCALE * gaussian_sample(rng).0;
        let tweak_index = rng.random_range(0..n - 1);
        let pivot_forward = rng.random_bool(0.5);

        let pivot = self.points[tweak_index];
        let pivot_axis = self.points[tweak_index + 1] - pivot;
        let tweak_axis = perpendicular_in_xy(pivot_axis)
            .rotate_around_axis(pivot_axis, rng.random_range(0.0..TAU))?;

        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let moves = if pivot_forward {
                    i > tweak_index
                } else {
                    i < tweak_index
                };
                if moves {
                    p.rotate_about_point(pivot, tweak_axis, tweak_angle)
                } else {
                    Ok(p)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            points,
            anchors: self.anchors.clone(),
            stiffness: self.stiffness,
        })
    }

    fn energy(&self) -> f64 {
        self.rod_energy() + self.anchor_energy()
    }
}
