//! Core trait for annealed states.

use rand::Rng;

use crate::error::Result;

/// A state the [`Annealer`](super::Annealer) can search over.
///
/// The state itself knows how to propose a random nearby state and how
/// to score itself. The annealer handles temperature, acceptance and
/// bookkeeping, and never looks inside the state.
///
/// # Minimization
///
/// Lower energy is better. For maximization, negate the score.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_rodsim::sa::AnnealState;
///
/// #[derive(Clone)]
/// struct Parabola(f64);
///
/// impl AnnealState for Parabola {
///     fn neighbor<R: Rng>(&self, rng: &mut R) -> u_rodsim::Result<Self> {
///         Ok(Parabola(self.0 + rng.random_range(-1.0..1.0)))
///     }
///
///     fn energy(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
/// ```
pub trait AnnealState: Clone {
    /// Proposes a random neighbor of this state.
    ///
    /// The neighbor should be a small perturbation of `self`. A proposal
    /// that hits a geometric degeneracy may return an error; the annealer
    /// discards it and moves on to the next step.
    fn neighbor<R: Rng>(&self, rng: &mut R) -> Result<Self>;

    /// Energy of this state. Must be pure: same state, same value.
    fn energy(&self) -> f64;
}
