use cf_model::{FlowParams, Trajectory, simulate};

use crate::views::{ControlsView, PlotView};

const HEADING: &str = "Circular Material Flow Simulator";
const DESCRIPTION: &str = "Explore a circular-economy system with raw material, product \
inventory and recyclable material. Adjust the recycling efficiency and capacity, and \
switch on a virgin raw-material crisis.";

/// Last computed trajectory, keyed by the parameters that produced it.
#[derive(Default)]
pub struct SimulationCache {
    params: Option<FlowParams>,
    result: Option<Result<Trajectory, String>>,
}

impl SimulationCache {
    /// Recompute only when the parameters changed since the last call.
    pub fn refresh(&mut self, params: &FlowParams) -> &Result<Trajectory, String> {
        if self.params.as_ref() != Some(params) || self.result.is_none() {
            self.params = Some(*params);
            self.result = Some(simulate(params).map_err(|e| e.to_string()));
        }
        self.result.get_or_insert_with(|| Err("no simulation run".to_string()))
    }
}

pub struct CircularFlowApp {
    params: FlowParams,
    cache: SimulationCache,
    controls_view: ControlsView,
    plot_view: PlotView,
}

impl CircularFlowApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            params: FlowParams::default(),
            cache: SimulationCache::default(),
            controls_view: ControlsView,
            plot_view: PlotView,
        }
    }
}

impl eframe::App for CircularFlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(HEADING);
            ui.label(DESCRIPTION);
            ui.separator();

            self.controls_view.show(ui, &mut self.params);
            ui.separator();

            match self.cache.refresh(&self.params) {
                Ok(trajectory) => self.plot_view.show(ui, trajectory),
                Err(message) => {
                    ui.colored_label(egui::Color32::RED, format!("Simulation failed: {}", message));
                }
            }
        });
    }
}
