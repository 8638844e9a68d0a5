//! Full simulation runs and their time series.

use cf_core::TimeGrid;
use cf_sim::{GridOptions, SimStats, run_on_grid};
use tracing::debug;

use crate::error::ModelResult;
use crate::model::CircularFlowModel;
use crate::params::FlowParams;
use crate::rates::FlowRates;
use crate::state::FlowState;

/// Simulated horizon start.
pub const T_START: f64 = 0.0;
/// Simulated horizon end.
pub const T_END: f64 = 100.0;
/// Number of output samples on `[T_START, T_END]`.
pub const SAMPLES: usize = 200;

pub const CHART_TITLE: &str = "Circular System Dynamics";
pub const X_AXIS_LABEL: &str = "Time";
pub const Y_AXIS_LABEL: &str = "Quantity";

/// One of the three plotted stocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Series {
    RawMaterial,
    ProductInventory,
    RecyclableMaterial,
}

impl Series {
    pub const ALL: [Series; 3] = [
        Series::RawMaterial,
        Series::ProductInventory,
        Series::RecyclableMaterial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Series::RawMaterial => "Raw Material",
            Series::ProductInventory => "Product Inventory",
            Series::RecyclableMaterial => "Recyclable Material",
        }
    }

    /// Short stock code.
    pub fn code(self) -> &'static str {
        match self {
            Series::RawMaterial => "MP",
            Series::ProductInventory => "IP",
            Series::RecyclableMaterial => "MR",
        }
    }

    pub fn of(self, x: &FlowState) -> f64 {
        match self {
            Series::RawMaterial => x.raw_material,
            Series::ProductInventory => x.product_inventory,
            Series::RecyclableMaterial => x.recyclable,
        }
    }
}

/// Sampled trajectory of one run.
#[derive(Clone, Debug)]
pub struct Trajectory {
    pub params: FlowParams,
    pub t: Vec<f64>,
    pub states: Vec<FlowState>,
    pub stats: SimStats,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Values of one stock, aligned with `t`.
    pub fn series(&self, series: Series) -> Vec<f64> {
        self.states.iter().map(|x| series.of(x)).collect()
    }

    /// `[t, value]` pairs of one stock, ready for plotting.
    pub fn points(&self, series: Series) -> Vec<[f64; 2]> {
        self.t
            .iter()
            .zip(self.series(series))
            .map(|(t, v)| [*t, v])
            .collect()
    }

    pub fn final_state(&self) -> Option<(f64, FlowState)> {
        Some((*self.t.last()?, *self.states.last()?))
    }

    /// Flow breakdown at every sample.
    pub fn rates(&self) -> Vec<FlowRates> {
        self.t
            .iter()
            .zip(&self.states)
            .map(|(t, x)| FlowRates::compute(&self.params, x, *t))
            .collect()
    }

    /// Whether any stock went negative.
    pub fn has_negative_stock(&self) -> bool {
        self.states
            .iter()
            .any(|x| x.as_array().iter().any(|v| *v < 0.0))
    }
}

/// Output grid: `SAMPLES` points evenly spaced on `[T_START, T_END]`.
pub fn time_grid() -> ModelResult<TimeGrid> {
    Ok(TimeGrid::uniform(T_START, T_END, SAMPLES)?)
}

/// Run the model with the default adaptive integrator.
pub fn simulate(params: &FlowParams) -> ModelResult<Trajectory> {
    simulate_with(params, &GridOptions::default())
}

/// Run the model with explicit integrator options.
pub fn simulate_with(params: &FlowParams, opts: &GridOptions) -> ModelResult<Trajectory> {
    params.validate()?;
    let grid = time_grid()?;
    let mut model = CircularFlowModel::new(*params);
    let record = run_on_grid(&mut model, &grid, opts)?;

    debug!(
        efficiency = params.efficiency,
        base_capacity = params.base_capacity,
        crisis = params.crisis_enabled,
        steps = record.stats.accepted_steps,
        "simulated circular flow"
    );

    Ok(Trajectory {
        params: *params,
        t: record.t,
        states: record.x,
        stats: record.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_labels() {
        let labels: Vec<_> = Series::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Raw Material", "Product Inventory", "Recyclable Material"]
        );
    }

    #[test]
    fn chart_labels() {
        assert_eq!(CHART_TITLE, "Circular System Dynamics");
        assert_eq!(X_AXIS_LABEL, "Time");
        assert_eq!(Y_AXIS_LABEL, "Quantity");
    }

    #[test]
    fn grid_shape() {
        let grid = time_grid().unwrap();
        assert_eq!(grid.len(), 200);
        assert_eq!(grid.start(), 0.0);
        assert_eq!(grid.end(), 100.0);
    }

    #[test]
    fn invalid_params_are_rejected_before_running() {
        let p = FlowParams {
            efficiency: 0.0,
            ..FlowParams::default()
        };
        assert!(simulate(&p).is_err());
    }

    #[test]
    fn points_align_with_time() {
        let traj = simulate(&FlowParams::default()).unwrap();
        let pts = traj.points(Series::ProductInventory);
        assert_eq!(pts.len(), traj.len());
        assert_eq!(pts[0], [0.0, 50.0]);
        assert_eq!(traj.rates().len(), traj.len());
    }
}
