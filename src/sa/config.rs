//! Annealer configuration, cooling schedules and acceptance rules.

use crate::error::{Error, Result};

/// Maps search progress to a temperature.
///
/// `fraction_done` is `current_step / max_steps`, in `[0, 1)` while the
/// search runs. Any `Fn(f64) -> f64` closure is a schedule.
pub trait Schedule {
    fn temperature(&self, fraction_done: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Schedule for F {
    fn temperature(&self, fraction_done: f64) -> f64 {
        self(fraction_done)
    }
}

/// Probability of moving from energy `e_old` to `e_new` at `temperature`.
///
/// Any `Fn(f64, f64, f64) -> f64` closure taking
/// `(e_old, e_new, temperature)` is an acceptance rule.
pub trait Acceptance {
    fn probability(&self, e_old: f64, e_new: f64, temperature: f64) -> f64;
}

impl<F: Fn(f64, f64, f64) -> f64> Acceptance for F {
    fn probability(&self, e_old: f64, e_new: f64, temperature: f64) -> f64 {
        self(e_old, e_new, temperature)
    }
}

/// Built-in cooling schedules, all functions of the fraction of the step
/// budget already spent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CoolingSchedule {
    /// `T(f) = 1/f - 1`, infinite at `f = 0` and reaching 0 at `f = 1`.
    ///
    /// Every move is accepted on the first step; the search turns greedy
    /// as the budget runs out.
    #[default]
    Reciprocal,

    /// `T(f) = T0 · (1 - f)`.
    Linear {
        /// Temperature at the first step.
        initial_temperature: f64,
    },

    /// `T(f) = T0 · (Tf / T0)^f`, the budget-normalised form of
    /// geometric cooling.
    Exponential {
        /// Temperature at the first step.
        initial_temperature: f64,
        /// Temperature the schedule approaches at the end of the budget.
        final_temperature: f64,
    },
}

impl CoolingSchedule {
    /// Validates the schedule parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            CoolingSchedule::Reciprocal => Ok(()),
            CoolingSchedule::Linear {
                initial_temperature,
            } => {
                if initial_temperature <= 0.0 {
                    return Err(Error::ConfigError(format!(
                        "linear initial_temperature must be positive, got {initial_temperature}"
                    )));
                }
                Ok(())
            }
            CoolingSchedule::Exponential {
                initial_temperature,
                final_temperature,
            } => {
                if initial_temperature <= 0.0 || final_temperature <= 0.0 {
                    return Err(Error::ConfigError(
                        "exponential temperatures must be positive".into(),
                    ));
                }
                if final_temperature >= initial_temperature {
                    return Err(Error::ConfigError(
                        "final_temperature must be less than initial_temperature".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl Schedule for CoolingSchedule {
    fn temperature(&self, fraction_done: f64) -> f64 {
        match *self {
            CoolingSchedule::Reciprocal => {
                if fraction_done == 0.0 {
                    f64::INFINITY
                } else {
                    1.0 / fraction_done - 1.0
                }
            }
            CoolingSchedule::Linear {
                initial_temperature,
            } => initial_temperature * (1.0 - fraction_done),
            CoolingSchedule::Exponential {
                initial_temperature,
                final_temperature,
            } => initial_temperature * (final_temperature / initial_temperature).powf(fraction_done),
        }
    }
}

/// Metropolis acceptance.
///
/// - improvement, or infinite temperature: always accept
/// - zero temperature: never accept a non-improving move
/// - otherwise: `exp(-(e_new - e_old) / T)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metropolis;

impl Acceptance for Metropolis {
    fn probability(&self, e_old: f64, e_new: f64, temperature: f64) -> f64 {
        if e_new < e_old || temperature == f64::INFINITY {
            1.0
        } else if temperature == 0.0 {
            0.0
        } else {
            (-(e_new - e_old) / temperature).exp()
        }
    }
}

/// Configuration for an [`Annealer`](super::Annealer).
///
/// # Examples
///
/// ```
/// use u_rodsim::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_max_steps(5_000)
///     .with_seed(42)
///     .with_history_interval(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Step budget. The annealer is terminal once it has taken this many
    /// steps.
    pub max_steps: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Sample the current energy into the history (and log progress)
    /// every this many steps.
    pub history_interval: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            seed: None,
            history_interval: 100,
        }
    }
}

impl AnnealConfig {
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.history_interval == 0 {
            return Err(Error::ConfigError(
                "history_interval must be positive".into(),
            ));
        }
        Ok(())
    }
}
