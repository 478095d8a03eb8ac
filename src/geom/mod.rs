//! 3D geometric primitives.
//!
//! [`Vector3`] carries the vector algebra and the Rodrigues rotation; the
//! free functions in this module cover the few derived algorithms the rod
//! model and the panel layout need: segment turning angle, point/segment
//! distance, Box–Muller sampling, quadratic roots and two-circle
//! trilateration on the z = 0 plane.
//!
//! Degenerate inputs (zero-length directions, circles that do not meet)
//! are reported through [`crate::Error`] rather than as NaN.

mod ops;
mod vector;

pub use ops::{
    angle_between_segments, gaussian_sample, point_to_segment_distance, solve_quadratic,
    trilaterate,
};
pub use vector::Vector3;
