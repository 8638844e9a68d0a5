//! Discontinuity handling for grid integration.

use cf_core::Tolerances;

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;

/// One smooth interval of integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Segment {
    pub start: f64,
    pub end: f64,
    /// `end` is a discontinuity of the vector field.
    pub ends_at_breakpoint: bool,
}

/// Split `[start, end]` at the breakpoints strictly inside it.
pub(crate) fn segments(start: f64, end: f64, breakpoints: &[f64]) -> Vec<Segment> {
    let mut cuts: Vec<f64> = breakpoints
        .iter()
        .copied()
        .filter(|b| b.is_finite() && *b > start && *b < end)
        .collect();
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();

    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut a = start;
    for b in cuts {
        out.push(Segment {
            start: a,
            end: b,
            ends_at_breakpoint: true,
        });
        a = b;
    }
    out.push(Segment {
        start: a,
        end,
        ends_at_breakpoint: false,
    });
    out
}

/// Model view that evaluates the field with the regime of one segment.
///
/// Stage times are clamped strictly below a closing breakpoint, so a step
/// that lands on the breakpoint sees the left-hand limit of the field.
pub(crate) struct SegmentModel<'a, M> {
    inner: &'a mut M,
    t_max: f64,
    pub rhs_evals: usize,
}

impl<'a, M: TransientModel> SegmentModel<'a, M> {
    pub fn new(inner: &'a mut M, segment: &Segment) -> Self {
        let t_max = if segment.ends_at_breakpoint {
            segment.end.next_down()
        } else {
            f64::INFINITY
        };
        Self {
            inner,
            t_max,
            rhs_evals: 0,
        }
    }
}

impl<M: TransientModel> TransientModel for SegmentModel<'_, M> {
    type State = M::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State> {
        self.rhs_evals += 1;
        let xdot = self.inner.rhs(t.min(self.t_max), x)?;
        if !self.inner.is_finite(&xdot) {
            return Err(SimError::NonPhysical {
                what: "non-finite state derivative",
            });
        }
        Ok(xdot)
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        self.inner.add(a, b)
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        self.inner.scale(a, scale)
    }

    fn error_norm(
        &self,
        err: &Self::State,
        x_old: &Self::State,
        x_new: &Self::State,
        tol: Tolerances,
    ) -> f64 {
        self.inner.error_norm(err, x_old, x_new, tol)
    }

    fn is_finite(&self, x: &Self::State) -> bool {
        self.inner.is_finite(x)
    }
}
