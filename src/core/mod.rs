pub mod histogram;
pub mod pad_options;
pub mod range;
pub mod rebin;
pub mod style;
pub mod types;

pub use histogram::{AxisText, BinAxis, Histogram};
pub use pad_options::PadOptions;
pub use range::Range;
pub use rebin::Rebin;
pub use style::{
    Color, DrawAttributes, FillStyle, LabelStyle, LineStyle, Marker, PlotStyle, Style,
    TextHAlign, TextStyle, TextVAlign, TitleStyle, palette_color, palette_marker,
};
pub use types::{Axis, Dimensions, Interval, Labels, Margin, Margins, Vertices};
