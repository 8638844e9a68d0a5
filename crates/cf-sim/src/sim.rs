//! Grid runner and result recording.

use cf_core::{TimeGrid, Tolerances};
use tracing::{debug, trace};

use crate::adaptive::DormandPrince;
use crate::error::{SimError, SimResult};
use crate::events::{Segment, SegmentModel, segments};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Adaptive Dormand-Prince 5(4) (default).
    #[default]
    DormandPrince,
    /// 4th-order Runge-Kutta with a fixed step.
    RK4,
    /// Forward Euler with a fixed step (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for grid simulation runs.
#[derive(Clone, Debug)]
pub struct GridOptions {
    /// Integrator type (default: DormandPrince)
    pub integrator: IntegratorType,
    /// Fixed step for RK4/Euler, initial step for DormandPrince.
    /// `None` derives it from the grid spacing.
    pub dt: Option<f64>,
    /// Error tolerances for the adaptive integrator
    pub tolerances: Tolerances,
    /// Smallest step the adaptive integrator may shrink to
    pub min_dt: f64,
    /// Maximum number of step attempts (safety limit)
    pub max_steps: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::default(),
            dt: None,
            tolerances: DormandPrince::default().tol,
            min_dt: 1e-10,
            max_steps: 1_000_000,
        }
    }
}

impl GridOptions {
    fn validate(&self) -> SimResult<()> {
        if let Some(dt) = self.dt {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(SimError::InvalidArg {
                    what: "dt must be positive",
                });
            }
        }
        if !(self.min_dt.is_finite() && self.min_dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "min_dt must be positive",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if !(self.tolerances.abs >= 0.0 && self.tolerances.rel >= 0.0)
            || self.tolerances.abs + self.tolerances.rel <= 0.0
        {
            return Err(SimError::InvalidArg {
                what: "tolerances must be non-negative and not both zero",
            });
        }
        Ok(())
    }
}

/// Step accounting for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evals: usize,
}

/// Record of simulation results, one entry per grid time.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
    pub stats: SimStats,
}

/// Integrate `model` and sample its state at every time of `grid`.
///
/// The initial state is recorded at the first grid time. Steps are shortened
/// to land exactly on every grid time and on every model breakpoint, so no
/// step ever straddles a discontinuity and no output is interpolated.
pub fn run_on_grid<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &GridOptions,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;

    let times = grid.times();
    let mut x = model.initial_state();
    if !model.is_finite(&x) {
        return Err(SimError::NonPhysical {
            what: "non-finite initial state",
        });
    }

    let mut t_record = Vec::with_capacity(times.len());
    let mut x_record = Vec::with_capacity(times.len());
    t_record.push(times[0]);
    x_record.push(x.clone());

    let mut stats = SimStats::default();
    if times.len() == 1 {
        return Ok(SimRecord {
            t: t_record,
            x: x_record,
            stats,
        });
    }

    let mut dt = opts.dt.unwrap_or(match opts.integrator {
        IntegratorType::DormandPrince => grid.min_spacing(),
        IntegratorType::RK4 | IntegratorType::ForwardEuler => grid.min_spacing() / 4.0,
    });
    let dp = DormandPrince::new(opts.tolerances);
    let breakpoints = model.breakpoints();

    let mut t = times[0];
    let mut next = 1;
    for segment in segments(grid.start(), grid.end(), &breakpoints) {
        debug!(
            start = segment.start,
            end = segment.end,
            "integrating segment"
        );
        let mut seg_model = SegmentModel::new(model, &segment);

        while next < times.len() && t < segment.end {
            let target = times[next].min(segment.end);
            advance(
                &mut seg_model,
                &dp,
                opts,
                &segment,
                &mut t,
                &mut x,
                &mut dt,
                target,
                &mut stats,
            )?;
            if t >= times[next] {
                t_record.push(times[next]);
                x_record.push(x.clone());
                next += 1;
            }
        }
        stats.rhs_evals += seg_model.rhs_evals;
    }

    if next != times.len() {
        return Err(SimError::ConvergenceFailed {
            what: "integration ended before the last grid time",
        });
    }

    debug!(
        samples = t_record.len(),
        accepted = stats.accepted_steps,
        rejected = stats.rejected_steps,
        rhs_evals = stats.rhs_evals,
        "grid run complete"
    );

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stats,
    })
}

/// Step from `*t` to exactly `target`.
#[allow(clippy::too_many_arguments)]
fn advance<M: TransientModel>(
    model: &mut SegmentModel<'_, M>,
    dp: &DormandPrince,
    opts: &GridOptions,
    segment: &Segment,
    t: &mut f64,
    x: &mut M::State,
    dt: &mut f64,
    target: f64,
    stats: &mut SimStats,
) -> SimResult<()> {
    let landing_eps = 1e-12 * target.abs().max(1.0);

    while *t < target {
        if stats.accepted_steps + stats.rejected_steps >= opts.max_steps {
            return Err(SimError::ConvergenceFailed {
                what: "max_steps exceeded",
            });
        }

        let remaining = target - *t;
        let lands = *dt >= remaining - landing_eps;
        let h = if lands { remaining } else { *dt };

        match opts.integrator {
            IntegratorType::DormandPrince => {
                let step = dp.attempt(model, *t, x, h)?;
                let factor = dp.step_factor(step.error_norm);
                if step.accepted() {
                    *x = step.x;
                    *t = if lands { target } else { *t + h };
                    stats.accepted_steps += 1;
                    // A step clipped to the target says little about the natural step size.
                    *dt = if lands { dt.max(h * factor) } else { h * factor };
                } else {
                    stats.rejected_steps += 1;
                    *dt = h * factor;
                    trace!(t = *t, h, err = step.error_norm, "step rejected");
                    if *dt < opts.min_dt {
                        return Err(SimError::StepSizeUnderflow { t: *t, dt: *dt });
                    }
                }
            }
            IntegratorType::RK4 => {
                *x = RK4.step(model, *t, x, h)?;
                *t = if lands { target } else { *t + h };
                stats.accepted_steps += 1;
            }
            IntegratorType::ForwardEuler => {
                *x = ForwardEuler.step(model, *t, x, h)?;
                *t = if lands { target } else { *t + h };
                stats.accepted_steps += 1;
            }
        }

        if !model.is_finite(x) {
            return Err(SimError::NonPhysical {
                what: "non-finite state",
            });
        }
    }

    trace!(t = *t, segment_end = segment.end, "reached target");
    Ok(())
}
