//! Three anchored rods annealed together, then joined into panels.

use u_rodsim::driver::RodSimulation;
use u_rodsim::geom::Vector3;
use u_rodsim::rod::{RodState, Stiffness};
use u_rodsim::sa::{AnnealConfig, AnnealState};
use u_rodsim::Error;

fn anchor_sets() -> Vec<Vec<Vector3>> {
    let raw = [
        [(-100.0, 0.0, 15.0), (0.0, 29.0, 10.0), (100.0, 0.0, 15.0)],
        [(-105.0, 0.0, 0.0), (0.0, 29.2, 0.0), (105.0, 0.0, 0.0)],
        [(-50.0, 0.0, -10.0), (0.0, 10.0, -10.0), (50.0, 0.0, -10.0)],
    ];
    raw.iter()
        .map(|set| {
            set.iter()
                .map(|&(x, y, z)| Vector3::new(x, y, z).scale(0.75))
                .collect()
        })
        .collect()
}

fn build_simulation(steps: usize) -> (RodSimulation, Vec<f64>) {
    let mut sim = RodSimulation::new();
    let mut initial_energies = Vec::new();

    for (i, anchors) in anchor_sets().into_iter().enumerate() {
        let z = anchors[0].z;
        let rod = RodState::straight(80, 200.0, z, anchors, Stiffness::new(70.0, 300.0)).unwrap();
        initial_energies.push(rod.energy());

        let config = AnnealConfig::default()
            .with_max_steps(steps)
            .with_seed(100 + i as u64);
        sim.add_rod(rod, &config).unwrap();
    }
    (sim, initial_energies)
}

#[test]
fn annealing_pulls_rods_towards_anchors() {
    let (mut sim, initial) = build_simulation(1000);
    sim.run();

    assert!(sim.is_finished());
    for (annealer, before) in sim.annealers().iter().zip(&initial) {
        let after = annealer.state_energy();
        assert!(after.is_finite());
        assert!(after < *before, "energy {after} not below {before}");
        assert!((annealer.state().energy() - after).abs() < 1e-6 * before.max(1.0));
        assert_eq!(annealer.state().num_points(), 80);
        assert_eq!(annealer.stats().energy_history.len(), 1 + 1000 / 100);
    }
}

#[test]
fn panels_between_neighbouring_rods() {
    let (mut sim, _) = build_simulation(600);
    sim.run();

    let clipped = sim.clipped_rods().unwrap();
    for (a, b) in [(1, 2), (0, 1)] {
        let panel = sim.panel_between(a, b).unwrap();
        let n = clipped[a].num_points().max(clipped[b].num_points());

        assert_eq!(panel.num_vertices(), 2 * n);
        assert_eq!(panel.triangles().count(), 2 * n - 2);
        assert!(panel
            .vertices()
            .iter()
            .all(|p| p.z == 0.0 && p.x.is_finite() && p.y.is_finite()));

        // resampling keeps end points, so the first rung is a0-b0
        let rung = clipped[a].points()[0].distance(clipped[b].points()[0]);
        assert!((panel.vertices()[1].y - rung).abs() < 1e-9);
    }
}

#[test]
fn clipping_keeps_the_anchored_span() {
    let (sim, _) = build_simulation(0);
    let clipped = sim.clipped_rods().unwrap();

    // x_j = 100 - 2.5 j. Anchors at ±78.75 fall halfway between two
    // points and resolve to the first, giving j = 8..=71.
    assert_eq!(clipped[1].num_points(), 64);
    assert_eq!(clipped[2].num_points(), 31);
    assert!((clipped[2].points()[0].x - 37.5).abs() < 1e-9);
}

#[test]
fn rod_without_anchors_cannot_be_clipped() {
    let mut sim = RodSimulation::new();
    let rod = RodState::straight(10, 10.0, 0.0, vec![], Stiffness::default()).unwrap();
    sim.add_rod(rod, &AnnealConfig::default().with_max_steps(5).with_seed(1))
        .unwrap();
    sim.run();

    assert_eq!(sim.clipped_rods(), Err(Error::NoAnchors));
    assert!(matches!(sim.panel_between(0, 0), Err(Error::NoAnchors)));
}
