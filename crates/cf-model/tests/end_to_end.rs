//! End-to-end runs of the circular-flow model over the full horizon.

use cf_model::rates::{CRISIS_START_TIME, effective_capacity};
use cf_model::{FlowParams, FlowState, Series, simulate, simulate_with};
use cf_sim::{GridOptions, IntegratorType};

fn params(crisis: bool) -> FlowParams {
    FlowParams::new(0.6, 10, crisis).expect("valid params")
}

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn baseline_run_shape() {
    let traj = simulate(&params(false)).expect("simulation should succeed");

    assert_eq!(traj.len(), 200);
    assert_eq!(traj.t[0], 0.0);
    assert_eq!(traj.t[199], 100.0);
    for series in Series::ALL {
        let values = traj.series(series);
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| v.is_finite()), "{}", series.label());
    }

    let first = traj.states[0];
    assert_close(first.raw_material, 100.0, 1e-6, "MP(0)");
    assert_close(first.product_inventory, 50.0, 1e-6, "IP(0)");
    assert_close(first.recyclable, 30.0, 1e-6, "MR(0)");
}

#[test]
fn baseline_run_approaches_equilibrium() {
    let traj = simulate(&params(false)).unwrap();
    let (t, x) = traj.final_state().unwrap();
    assert_eq!(t, 100.0);
    // Reference values from a fine fixed-step RK4 run.
    assert_close(x.raw_material, 213.332, 0.05, "MP(100)");
    assert_close(x.product_inventory, 177.742, 0.05, "IP(100)");
    assert_close(x.recyclable, 199.496, 0.05, "MR(100)");
    assert!(!traj.has_negative_stock());
}

#[test]
fn crisis_run_matches_baseline_before_forty_and_diverges_after() {
    let base = simulate(&params(false)).unwrap();
    let crisis = simulate(&params(true)).unwrap();
    assert_eq!(base.t, crisis.t);

    for (i, &t) in base.t.iter().enumerate() {
        let (b, c) = (base.states[i], crisis.states[i]);
        if t < CRISIS_START_TIME {
            for series in Series::ALL {
                assert_close(series.of(&c), series.of(&b), 1e-12, series.label());
            }
        } else if t > CRISIS_START_TIME {
            assert!(
                c.raw_material < b.raw_material,
                "t={t}: crisis MP {} should be below baseline {}",
                c.raw_material,
                b.raw_material
            );
            assert_ne!(c, b);
        }
    }

    let (_, x) = crisis.final_state().unwrap();
    assert_close(x.raw_material, 106.679, 0.05, "crisis MP(100)");
    assert_close(x.product_inventory, 89.141, 0.05, "crisis IP(100)");
    assert_close(x.recyclable, 42.753, 0.05, "crisis MR(100)");
}

#[test]
fn throughput_respects_capacity_along_trajectory() {
    for (eff, cap) in [(0.1, 5), (0.6, 10), (1.0, 5), (1.0, 30)] {
        let p = FlowParams::new(eff, cap, true).unwrap();
        let traj = simulate(&p).unwrap();
        for (rates, (t, x)) in traj.rates().iter().zip(traj.t.iter().zip(&traj.states)) {
            let bound = x.recyclable.min(effective_capacity(&p, *t)) * p.efficiency;
            assert!(rates.recycling_throughput <= bound + 1e-12);
            assert!(rates.recycling_throughput <= effective_capacity(&p, *t) * p.efficiency + 1e-12);
        }
    }
}

#[test]
fn integrators_agree() {
    let p = params(true);
    let adaptive = simulate(&p).unwrap();
    let rk4 = simulate_with(
        &p,
        &GridOptions {
            integrator: IntegratorType::RK4,
            dt: Some(0.01),
            ..GridOptions::default()
        },
    )
    .unwrap();

    for (a, b) in adaptive.states.iter().zip(&rk4.states) {
        for series in Series::ALL {
            assert_close(series.of(a), series.of(b), 1e-3, series.label());
        }
    }
}

#[test]
fn runs_are_deterministic() {
    let p = FlowParams::new(0.85, 17, true).unwrap();
    let a = simulate(&p).unwrap();
    let b = simulate(&p).unwrap();
    assert_eq!(a.states, b.states);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn extreme_corners_stay_finite() {
    for (eff, cap, crisis) in [(0.1, 5, true), (1.0, 30, false), (1.0, 5, true), (0.1, 30, false)] {
        let traj = simulate(&FlowParams::new(eff, cap, crisis).unwrap()).unwrap();
        assert_eq!(traj.len(), 200);
        assert!(traj.states.iter().all(FlowState::is_finite));
    }
}
