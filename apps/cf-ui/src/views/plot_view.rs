use cf_model::trajectory::{CHART_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL};
use cf_model::{Series, Trajectory};
use egui_plot::{Legend, Line, Plot, PlotPoints};

pub struct PlotView;

impl PlotView {
    pub fn show(&mut self, ui: &mut egui::Ui, trajectory: &Trajectory) {
        ui.vertical_centered(|ui| ui.strong(CHART_TITLE));

        let lines: Vec<Line> = Series::ALL
            .iter()
            .map(|series| {
                let plot_points: PlotPoints = trajectory.points(*series).into();
                Line::new(plot_points).name(series.label())
            })
            .collect();

        Plot::new("circular_flow_plot")
            .legend(Legend::default())
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }
}
