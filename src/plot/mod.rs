mod plot_input;
mod plot_options;
mod projection;

pub use plot_input::PlotInput;
pub use plot_options::PlotOptions;
pub use projection::Projection;
