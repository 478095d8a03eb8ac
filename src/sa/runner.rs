//! Step-wise simulated annealing driver.

use rand::rngs::StdRng;
use rand::Rng;

use super::config::{AnnealConfig, CoolingSchedule, Metropolis};
use super::config::{Acceptance, Schedule};
use super::types::AnnealState;
use crate::error::Result;
use crate::random::rng_from_seed;

/// What a single [`Annealer::step`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The candidate replaced the current state.
    Accepted,
    /// The candidate was drawn and rejected.
    Rejected,
    /// The neighbor proposal failed and was thrown away.
    Discarded,
    /// The step budget is spent; nothing happened.
    Finished,
}

/// Running counters kept by an [`Annealer`].
#[derive(Debug, Clone, Default)]
pub struct AnnealStats {
    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that lowered the energy.
    pub improving_moves: usize,

    /// Number of neighbor proposals that failed.
    pub discarded_proposals: usize,

    /// Current energy sampled every `history_interval` steps, starting
    /// with the initial energy.
    pub energy_history: Vec<f64>,
}

/// Result of running an annealer to the end of its budget.
#[derive(Debug, Clone)]
pub struct AnnealSummary<S> {
    /// The final accepted state.
    pub state: S,

    /// Energy of `state`.
    pub energy: f64,

    /// Steps taken in total.
    pub steps: usize,

    /// Counters collected along the way.
    pub stats: AnnealStats,
}

/// Simulated annealing over any [`AnnealState`], advanced one step at a time.
///
/// The cooling schedule and the acceptance rule are strategy objects
/// fixed at construction; [`CoolingSchedule::Reciprocal`] and
/// [`Metropolis`] are the defaults. The annealer owns its state and RNG
/// exclusively, so separate annealers can be advanced in any interleaving.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_rodsim::sa::{AnnealConfig, AnnealState, Annealer};
///
/// #[derive(Clone)]
/// struct Parabola(f64);
///
/// impl AnnealState for Parabola {
///     fn neighbor<R: Rng>(&self, rng: &mut R) -> u_rodsim::Result<Self> {
///         Ok(Parabola(self.0 + rng.random_range(-1.0..1.0)))
///     }
///     fn energy(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// let config = AnnealConfig::default().with_max_steps(100).with_seed(1);
/// let mut annealer = Annealer::with_config(Parabola(5.0), &config).unwrap();
/// while !annealer.is_finished() {
///     annealer.step();
/// }
/// assert_eq!(annealer.current_step(), 100);
/// ```
pub struct Annealer<S, C = CoolingSchedule, A = Metropolis> {
    state: S,
    state_energy: f64,
    current_step: usize,
    max_steps: usize,
    history_interval: usize,
    schedule: C,
    acceptance: A,
    rng: StdRng,
    stats: AnnealStats,
}

impl<S: AnnealState> Annealer<S> {
    /// Creates an annealer with the default schedule, acceptance rule and
    /// an unseeded RNG.
    pub fn new(initial: S, max_steps: usize) -> Self {
        let config = AnnealConfig::default().with_max_steps(max_steps);
        Self::build(initial, &config, CoolingSchedule::default(), Metropolis)
    }

    /// Creates an annealer with the default strategies from a config.
    pub fn with_config(initial: S, config: &AnnealConfig) -> Result<Self> {
        Self::with_strategies(initial, config, CoolingSchedule::default(), Metropolis)
    }
}

impl<S: AnnealState, C: Schedule, A: Acceptance> Annealer<S, C, A> {
    /// Creates an annealer with a custom cooling schedule and acceptance
    /// rule. Closures work for either.
    pub fn with_strategies(
        initial: S,
        config: &AnnealConfig,
        schedule: C,
        acceptance: A,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(initial, config, schedule, acceptance))
    }

    fn build(initial: S, config: &AnnealConfig, schedule: C, acceptance: A) -> Self {
        let state_energy = initial.energy();
        Self {
            state: initial,
            state_energy,
            current_step: 0,
            max_steps: config.max_steps,
            history_interval: config.history_interval,
            schedule,
            acceptance,
            rng: rng_from_seed(config.seed),
            stats: AnnealStats {
                energy_history: vec![state_energy],
                ..AnnealStats::default()
            },
        }
    }

    /// Advances the search by one step.
    ///
    /// A no-op returning [`StepOutcome::Finished`] once the budget is
    /// spent. Otherwise draws one neighbor, scores it and accepts it with
    /// the probability given by the acceptance rule at the current
    /// temperature. The step counter advances whether or not the
    /// candidate is accepted.
    pub fn step(&mut self) -> StepOutcome {
        if self.current_step >= self.max_steps {
            return StepOutcome::Finished;
        }

        let temperature = self.temperature();
        let outcome = match self.state.neighbor(&mut self.rng) {
            Ok(candidate) => {
                let candidate_energy = candidate.energy();
                let probability =
                    self.acceptance
                        .probability(self.state_energy, candidate_energy, temperature);

                if self.rng.random::<f64>() < probability {
                    if candidate_energy < self.state_energy {
                        self.stats.improving_moves += 1;
                    }
                    self.state = candidate;
                    self.state_energy = candidate_energy;
                    self.stats.accepted_moves += 1;
                    StepOutcome::Accepted
                } else {
                    StepOutcome::Rejected
                }
            }
            Err(err) => {
                log::trace!("step {}: neighbor discarded: {err}", self.current_step);
                self.stats.discarded_proposals += 1;
                StepOutcome::Discarded
            }
        };

        self.current_step += 1;

        if self.current_step.is_multiple_of(self.history_interval) {
            self.stats.energy_history.push(self.state_energy);
            log::debug!(
                "anneal step {}/{}: temp={:.4}, energy={:.4}",
                self.current_step,
                self.max_steps,
                temperature,
                self.state_energy
            );
        }

        outcome
    }

    /// Steps until the budget is spent and returns a summary.
    pub fn run(&mut self) -> AnnealSummary<S> {
        while self.step() != StepOutcome::Finished {}

        log::debug!(
            "anneal finished after {} steps: energy={:.4}, accepted={}, discarded={}",
            self.current_step,
            self.state_energy,
            self.stats.accepted_moves,
            self.stats.discarded_proposals
        );

        AnnealSummary {
            state: self.state.clone(),
            energy: self.state_energy,
            steps: self.current_step,
            stats: self.stats.clone(),
        }
    }

    /// Temperature the next step will use.
    pub fn temperature(&self) -> f64 {
        self.schedule.temperature(self.fraction_done())
    }
}

impl<S, C, A> Annealer<S, C, A> {
    /// The current accepted state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Cached energy of [`state`](Self::state).
    pub fn state_energy(&self) -> f64 {
        self.state_energy
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// `current_step / max_steps`; 1 for an empty budget.
    pub fn fraction_done(&self) -> f64 {
        if self.max_steps == 0 {
            1.0
        } else {
            self.current_step as f64 / self.max_steps as f64
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.max_steps
    }

    pub fn stats(&self) -> &AnnealStats {
        &self.stats
    }

    /// Consumes the annealer, returning its current state.
    pub fn into_state(self) -> S {
        self.state
    }
}
