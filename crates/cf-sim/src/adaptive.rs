//! Adaptive Dormand-Prince 5(4) integrator.
//!
//! Seven-stage explicit Runge-Kutta pair: the 5th order solution is
//! propagated and the embedded 4th order solution supplies the local
//! error estimate used for step size control.

use cf_core::Tolerances;

use crate::error::SimResult;
use crate::model::TransientModel;

const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

#[rustfmt::skip]
const A: [&[f64]; 6] = [
    &[1.0 / 5.0],
    &[3.0 / 40.0, 9.0 / 40.0],
    &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
    &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
    &[9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0],
    &[35.0 / 384.0, 0.0, 500.0 / 1113.0, 125.0 / 192.0, -2187.0 / 6784.0, 11.0 / 84.0],
];

// 5th order weights (identical to the last row of A, FSAL).
#[rustfmt::skip]
const B: [f64; 6] = [35.0 / 384.0, 0.0, 500.0 / 1113.0, 125.0 / 192.0, -2187.0 / 6784.0, 11.0 / 84.0];

// b5 - b4
#[rustfmt::skip]
const E: [f64; 7] = [
    71.0 / 57600.0, 0.0, -71.0 / 16695.0, 71.0 / 1920.0,
    -17253.0 / 339200.0, 22.0 / 525.0, -1.0 / 40.0,
];

/// Outcome of one trial step.
#[derive(Clone, Debug)]
pub struct AdaptiveStep<S> {
    /// Candidate state at t + dt (5th order).
    pub x: S,
    /// Scaled error norm; <= 1.0 means the step is acceptable.
    pub error_norm: f64,
}

impl<S> AdaptiveStep<S> {
    pub fn accepted(&self) -> bool {
        self.error_norm <= 1.0
    }
}

/// Dormand-Prince 5(4) stepper with a standard step size controller.
#[derive(Clone, Debug)]
pub struct DormandPrince {
    pub tol: Tolerances,
    /// Safety factor applied to the optimal step estimate.
    pub safety: f64,
    /// Smallest allowed step shrink factor.
    pub min_factor: f64,
    /// Largest allowed step growth factor.
    pub max_factor: f64,
}

impl Default for DormandPrince {
    fn default() -> Self {
        Self::new(Tolerances {
            abs: 1e-8,
            rel: 1e-6,
        })
    }
}

impl DormandPrince {
    pub fn new(tol: Tolerances) -> Self {
        Self {
            tol,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 5.0,
        }
    }

    /// Attempt one step of size `dt` from `(t, x)` without committing to it.
    pub fn attempt<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<AdaptiveStep<M::State>> {
        let mut k: Vec<M::State> = Vec::with_capacity(7);
        k.push(model.rhs(t, x)?);

        for (stage, row) in A.iter().enumerate() {
            let xs = combine(model, x, dt, row, &k);
            k.push(model.rhs(t + C[stage + 1] * dt, &xs)?);
        }

        let x_new = combine(model, x, dt, &B, &k);

        let mut err = model.scale(&k[0], dt * E[0]);
        for (e, ki) in E.iter().zip(&k).skip(1) {
            if *e != 0.0 {
                err = model.add(&err, &model.scale(ki, dt * e));
            }
        }
        let error_norm = model.error_norm(&err, x, &x_new, self.tol);

        Ok(AdaptiveStep {
            x: x_new,
            error_norm,
        })
    }

    /// Factor to apply to the step size after a trial with the given error.
    pub fn step_factor(&self, error_norm: f64) -> f64 {
        if !error_norm.is_finite() {
            return self.min_factor;
        }
        if error_norm <= 0.0 {
            return self.max_factor;
        }
        let factor = self.safety * error_norm.powf(-1.0 / 5.0);
        if error_norm > 1.0 {
            factor.clamp(self.min_factor, 1.0)
        } else {
            factor.clamp(self.min_factor, self.max_factor)
        }
    }
}

/// x + dt * sum(coefs[i] * k[i])
fn combine<M: TransientModel>(
    model: &M,
    x: &M::State,
    dt: f64,
    coefs: &[f64],
    k: &[M::State],
) -> M::State {
    let mut acc = x.clone();
    for (c, ki) in coefs.iter().zip(k) {
        if *c != 0.0 {
            acc = model.add(&acc, &model.scale(ki, dt * c));
        }
    }
    acc
}
