use cf_model::FlowParams;

/// Parameter widgets. Slider ranges are the parameter domains, so every
/// value they produce is valid.
pub struct ControlsView;

impl ControlsView {
    pub fn show(&mut self, ui: &mut egui::Ui, params: &mut FlowParams) {
        let eff = FlowParams::EFFICIENCY;
        let cap = FlowParams::BASE_CAPACITY;

        ui.add(
            egui::Slider::new(&mut params.efficiency, eff.min..=eff.max)
                .step_by(eff.step)
                .text("Recycling efficiency"),
        );
        ui.add(
            egui::Slider::new(&mut params.base_capacity, cap.min as u32..=cap.max as u32)
                .text("Recycling capacity"),
        );
        ui.checkbox(
            &mut params.crisis_enabled,
            "Enable virgin raw-material crisis from t=40",
        );
    }
}
