mod canvas;
mod canvas_manager;
mod legend;
mod pad;
mod text_box;

pub use canvas::Canvas;
pub use canvas_manager::{CanvasManager, CanvasState};
pub use legend::{Legend, LegendEntry};
pub use pad::Pad;
pub use text_box::TextBox;
