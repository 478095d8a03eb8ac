//! Anchor-constrained rod shaping by simulated annealing.
//!
//! A rod is a polyline of 3D points with a bending stiffness and a set of
//! anchor points it is pulled towards. Annealing bends the rod, one small
//! rotation at a time, into a low-energy shape. Two finished rods can then
//! be joined by a flat triangle strip whose triangles keep the side lengths
//! of the 3D strip between them.
//!
//! - [`geom`]: `Vector3` arithmetic, rotations, trilateration and other
//!   geometric helpers.
//! - [`sa`]: a generic simulated annealing engine with pluggable cooling
//!   schedules and acceptance rules.
//! - [`rod`]: the rod model, its energy and its random neighbor move.
//! - [`panel`]: the flat triangle strip between two rods.
//! - [`driver`]: anneals several rods together and builds panels from them.
//!
//! # Example
//!
//! ```
//! use u_rodsim::geom::Vector3;
//! use u_rodsim::panel::Panel;
//! use u_rodsim::rod::{RodState, Stiffness};
//! use u_rodsim::sa::{AnnealConfig, Annealer};
//!
//! let anchors = vec![
//!     Vector3::new(-30.0, 0.0, 0.0),
//!     Vector3::new(0.0, 8.0, 0.0),
//!     Vector3::new(30.0, 0.0, 0.0),
//! ];
//! let rod = RodState::straight(30, 80.0, 0.0, anchors.clone(), Stiffness::default())?;
//! let flat = RodState::straight(30, 80.0, 5.0, anchors, Stiffness::default())?;
//!
//! let config = AnnealConfig::default().with_max_steps(500).with_seed(7);
//! let mut annealer = Annealer::with_config(rod, &config)?;
//! let summary = annealer.run();
//!
//! let bent = summary.state.clip_to_anchors()?;
//! let flat = flat.clip_to_anchors()?;
//! let panel = Panel::build(&bent, &flat)?;
//! assert_eq!(panel.num_vertices(), 2 * bent.num_points().max(flat.num_points()));
//! # Ok::<(), u_rodsim::Error>(())
//! ```

pub mod driver;
pub mod error;
pub mod geom;
pub mod panel;
pub mod random;
pub mod rod;
pub mod sa;

pub use error::{Error, Result};
