//! Anchor-constrained rod model.
//!
//! A [`RodState`] is a polyline plus a set of anchor points. Its energy
//! combines a bending penalty (squared turning angle at every interior
//! joint) and an anchor penalty (squared distance from each anchor to
//! the nearest point of the rod), so minimizing it yields a smooth curve
//! passing close to every anchor.
//!
//! [`RodState`] implements [`AnnealState`](crate::sa::AnnealState): a
//! neighbor bends the rod by a small random angle at one joint, keeping
//! every segment length.

mod config;
mod state;

pub use config::Stiffness;
pub use state::{RodState, NEIGHBOR_ANGLE_SCALE};
