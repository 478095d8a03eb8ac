//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search that accepts worsening moves with
//! a probability shrinking as the temperature falls, which lets it climb
//! out of local minima early and settle late.
//!
//! Unlike a batch runner, [`Annealer`] is advanced one [`step`] at a time
//! against a fixed step budget, so a caller can snapshot the state between
//! steps (for drawing, say) or interleave several annealers.
//!
//! The temperature is a function of the fraction of the budget spent
//! ([`Schedule`]), and the acceptance probability a function of the two
//! energies and the temperature ([`Acceptance`]). Both are injected at
//! construction; closures qualify.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"
//!
//! [`step`]: Annealer::step

mod config;
mod runner;
mod types;

pub use config::{Acceptance, AnnealConfig, CoolingSchedule, Metropolis, Schedule};
pub use runner::{AnnealStats, AnnealSummary, Annealer, StepOutcome};
pub use types::AnnealState;
