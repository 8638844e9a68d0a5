//! TransientModel trait for pluggable dynamic systems.

use cf_core::Tolerances;

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
/// - A scaled error norm, used by adaptive integrators
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at the start of the grid.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Takes &mut self to allow models to cache previous solutions.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Scaled norm of a local error estimate.
    ///
    /// A value <= 1.0 means the step that produced `x_new` from `x_old`
    /// meets the tolerances.
    fn error_norm(
        &self,
        err: &Self::State,
        x_old: &Self::State,
        x_new: &Self::State,
        tol: Tolerances,
    ) -> f64;

    /// Whether every component of the state is finite.
    fn is_finite(&self, x: &Self::State) -> bool;

    /// Times at which the vector field is discontinuous.
    ///
    /// Integrators never take a step across one of these times.
    fn breakpoints(&self) -> Vec<f64> {
        Vec::new()
    }
}
