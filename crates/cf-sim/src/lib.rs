//! Transient simulation framework for lumped ODE models.
//!
//! Provides:
//! - `TransientModel` trait for pluggable dynamic systems
//! - Fixed-step RK4 and forward Euler integrators
//! - Adaptive Dormand-Prince 5(4) integrator with embedded error control
//! - Grid runner that lands on every output time and never steps across
//!   a model's declared discontinuities

pub mod adaptive;
pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;

// Internal modules
mod events;

// Re-exports for public API
pub use adaptive::{AdaptiveStep, DormandPrince};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use sim::{GridOptions, IntegratorType, SimRecord, SimStats, run_on_grid};
