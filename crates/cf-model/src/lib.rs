//! cf-model: three-stock circular material-flow model.
//!
//! Raw material (MP) is transformed into product inventory (IP); sales and
//! losses feed a recyclable stock (MR) that is either reclaimed into raw
//! material, bounded by a recycling capacity, or disposed of. Virgin raw
//! material enters at a fixed rate that an optional crisis cuts back.

pub mod error;
pub mod model;
pub mod params;
pub mod rates;
pub mod scenario;
pub mod state;
pub mod trajectory;

pub use error::{ModelError, ModelResult};
pub use model::CircularFlowModel;
pub use params::{FlowParams, ParamDomain};
pub use rates::FlowRates;
pub use state::FlowState;
pub use trajectory::{Series, Trajectory, simulate, simulate_with, time_grid};
