mod controls_view;
mod plot_view;

pub use controls_view::ControlsView;
pub use plot_view::PlotView;
