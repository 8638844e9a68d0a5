//! cf-core: shared foundation for the circular-flow simulator.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - grid (evenly spaced output time grids)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CfError, CfResult};
pub use grid::{TimeGrid, linspace};
pub use numeric::*;
