//! Multi-rod simulation.
//!
//! [`RodSimulation`] owns one [`Annealer`] per rod and advances them in
//! lockstep. Annealers share nothing, so with the `parallel` feature each
//! step runs them on rayon's thread pool. Once the budgets are spent the
//! rods are clipped to their anchors and paired into [`Panel`]s.

use crate::error::{Error, Result};
use crate::panel::Panel;
use crate::rod::RodState;
use crate::sa::{Acceptance, AnnealConfig, Annealer, CoolingSchedule, Metropolis, Schedule};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A set of independently annealed rods.
///
/// # Examples
///
/// ```
/// use u_rodsim::driver::RodSimulation;
/// use u_rodsim::geom::Vector3;
/// use u_rodsim::rod::{RodState, Stiffness};
/// use u_rodsim::sa::AnnealConfig;
///
/// let anchors = vec![
///     Vector3::new(-40.0, 0.0, 0.0),
///     Vector3::new(0.0, 10.0, 0.0),
///     Vector3::new(40.0, 0.0, 0.0),
/// ];
/// let rod = RodState::straight(20, 100.0, 0.0, anchors, Stiffness::default()).unwrap();
///
/// let mut sim = RodSimulation::new();
/// sim.add_rod(rod, &AnnealConfig::default().with_max_steps(200).with_seed(1))
///     .unwrap();
/// sim.run();
/// assert!(sim.is_finished());
/// assert_eq!(sim.clipped_rods().unwrap().len(), 1);
/// ```
pub struct RodSimulation<C = CoolingSchedule, A = Metropolis> {
    annealers: Vec<Annealer<RodState, C, A>>,
}

impl RodSimulation {
    pub fn new() -> Self {
        Self {
            annealers: Vec::new(),
        }
    }

    /// Adds a rod annealed with the default schedule and acceptance rule.
    /// Returns the rod's index.
    pub fn add_rod(&mut self, rod: RodState, config: &AnnealConfig) -> Result<usize> {
        let annealer = Annealer::with_config(rod, config)?;
        Ok(self.push(annealer))
    }
}

impl Default for RodSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Schedule, A: Acceptance> RodSimulation<C, A> {
    /// Wraps annealers built with custom strategies.
    pub fn from_annealers(annealers: Vec<Annealer<RodState, C, A>>) -> Self {
        Self { annealers }
    }

    /// Adds an already constructed annealer. Returns its index.
    pub fn push(&mut self, annealer: Annealer<RodState, C, A>) -> usize {
        self.annealers.push(annealer);
        self.annealers.len() - 1
    }

    pub fn len(&self) -> usize {
        self.annealers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annealers.is_empty()
    }

    pub fn annealers(&self) -> &[Annealer<RodState, C, A>] {
        &self.annealers
    }

    /// The annealer driving rod `index`.
    pub fn get(&self, index: usize) -> Result<&Annealer<RodState, C, A>> {
        self.annealers.get(index).ok_or(Error::UnknownRod(index))
    }

    /// True once every annealer has spent its budget.
    pub fn is_finished(&self) -> bool {
        self.annealers.iter().all(|a| a.is_finished())
    }

    /// Runs every annealer to the end of its budget.
    pub fn run(&mut self) {
        while !self.is_finished() {
            self.step_all();
        }
        log::debug!(
            "simulation finished: energies {:?}",
            self.annealers
                .iter()
                .map(|a| a.state_energy())
                .collect::<Vec<_>>()
        );
    }

    /// Current rods, each clipped to its anchor span.
    ///
    /// # Errors
    ///
    /// [`Error::NoAnchors`] when a rod has no anchors.
    pub fn clipped_rods(&self) -> Result<Vec<RodState>> {
        self.annealers
            .iter()
            .map(|a| a.state().clip_to_anchors())
            .collect()
    }

    /// Panel between the clipped rods `i` and `j`.
    pub fn panel_between(&self, i: usize, j: usize) -> Result<Panel> {
        let rod_a = self.get(i)?.state().clip_to_anchors()?;
        let rod_b = self.get(j)?.state().clip_to_anchors()?;
        Panel::build(&rod_a, &rod_b)
    }

    /// Panel between the clipped rod `i` and its mirror image across the
    /// XZ plane.
    pub fn mirrored_panel(&self, i: usize) -> Result<Panel> {
        let rod = self.get(i)?.state().clip_to_anchors()?;
        Panel::build(&rod, &rod.reflect_y())
    }
}

#[cfg(not(feature = "parallel"))]
impl<C: Schedule, A: Acceptance> RodSimulation<C, A> {
    /// Advances every unfinished annealer by one step.
    pub fn step_all(&mut self) {
        for annealer in &mut self.annealers {
            annealer.step();
        }
    }
}

#[cfg(feature = "parallel")]
impl<C: Schedule + Send, A: Acceptance + Send> RodSimulation<C, A> {
    /// Advances every unfinished annealer by one step, in parallel.
    pub fn step_all(&mut self) {
        self.annealers.par_iter_mut().for_each(|annealer| {
            annealer.step();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector3;
    use crate::rod::Stiffness;
    use crate::sa::AnnealState;

    fn anchors(z: f64, bulge: f64) -> Vec<Vector3> {
        vec![
            Vector3::new(-30.0, 0.0, z),
            Vector3::new(0.0, bulge, z),
            Vector3::new(30.0, 0.0, z),
        ]
    }

    fn rod(z: f64, bulge: f64) -> RodState {
        RodState::straight(24, 80.0, z, anchors(z, bulge), Stiffness::new(70.0, 300.0)).unwrap()
    }

    fn config(steps: usize, seed: u64) -> AnnealConfig {
        AnnealConfig::default().with_max_steps(steps).with_seed(seed)
    }

    #[test]
    fn test_add_and_index() {
        let mut sim = RodSimulation::new();
        assert!(sim.is_empty());
        assert_eq!(sim.add_rod(rod(0.0, 5.0), &config(10, 1)).unwrap(), 0);
        assert_eq!(sim.add_rod(rod(5.0, 8.0), &config(10, 2)).unwrap(), 1);
        assert_eq!(sim.len(), 2);
        assert!(sim.get(1).is_ok());
        assert!(matches!(sim.get(2), Err(Error::UnknownRod(2))));
    }

    #[test]
    fn test_step_all_advances_every_rod() {
        let mut sim = RodSimulation::new();
        sim.add_rod(rod(0.0, 5.0), &config(3, 1)).unwrap();
        sim.add_rod(rod(5.0, 8.0), &config(5, 2)).unwrap();

        sim.step_all();
        assert!(sim.annealers().iter().all(|a| a.current_step() == 1));

        sim.run();
        assert!(sim.is_finished());
        assert_eq!(sim.annealers()[0].current_step(), 3);
        assert_eq!(sim.annealers()[1].current_step(), 5);
    }

    #[test]
    fn test_annealing_lowers_energy() {
        let start = rod(0.0, 6.0);
        let initial = start.energy();

        let mut sim = RodSimulation::new();
        sim.add_rod(start, &config(3_000, 42)).unwrap();
        sim.run();

        let annealer = sim.get(0).unwrap();
        assert!(annealer.state_energy() < initial);
        assert_eq!(annealer.state().num_points(), 24);
    }

    #[test]
    fn test_panels_from_finished_rods() {
        let mut sim = RodSimulation::new();
        sim.add_rod(rod(0.0, 6.0), &config(500, 1)).unwrap();
        sim.add_rod(rod(-8.0, 3.0), &config(500, 2)).unwrap();
        sim.run();

        let clipped = sim.clipped_rods().unwrap();
        assert_eq!(clipped.len(), 2);

        let panel = sim.panel_between(0, 1).unwrap();
        let n = clipped[0].num_points().max(clipped[1].num_points());
        assert_eq!(panel.num_vertices(), 2 * n);

        assert!(matches!(sim.panel_between(0, 9), Err(Error::UnknownRod(9))));
    }

    #[test]
    fn test_mirrored_panel() {
        let points: Vec<Vector3> = (0..10)
            .map(|i| Vector3::new(i as f64, 2.0 + 0.1 * i as f64, 1.0))
            .collect();
        let anchors = vec![Vector3::new(1.0, 2.0, 1.0), Vector3::new(7.0, 3.0, 1.0)];
        let rod = RodState::new(points, anchors, Stiffness::default()).unwrap();

        let mut sim = RodSimulation::new();
        sim.add_rod(rod, &config(0, 1)).unwrap();
        sim.run();

        let panel = sim.mirrored_panel(0).unwrap();
        assert_eq!(panel.num_vertices(), 14);
        // the first rung spans the rod and its reflection
        assert!((panel.vertices()[1].y - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_custom_strategies() {
        let greedy = |_: f64| 0.0;
        let start = rod(0.0, 6.0);
        let initial = start.energy();
        let annealer = Annealer::with_strategies(start, &config(300, 4), greedy, Metropolis).unwrap();

        let mut sim = RodSimulation::from_annealers(vec![annealer]);
        sim.run();
        assert!(sim.get(0).unwrap().state_energy() <= initial);
        assert_eq!(sim.get(0).unwrap().stats().improving_moves, sim.get(0).unwrap().stats().accepted_moves);
    }
}
