use serde::{Deserialize, Serialize};

use crate::core::Axis;
use crate::core::histogram::Histogram;
use crate::error::{PlotError, PlotResult};
use crate::layout::{Legend, TextBox};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const RED: Self = Self::rgb(0.8, 0.1, 0.1);
    pub const BLUE: Self = Self::rgb(0.1, 0.2, 0.8);
    pub const GREEN: Self = Self::rgb(0.1, 0.6, 0.2);
    pub const ORANGE: Self = Self::rgb(0.95, 0.55, 0.05);
    pub const MAGENTA: Self = Self::rgb(0.75, 0.1, 0.65);
    pub const CYAN: Self = Self::rgb(0.05, 0.65, 0.75);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Marker {
    Dot,
    #[default]
    FullCircle,
    FullSquare,
    FullTriangleUp,
    FullTriangleDown,
    FullDiamond,
    FullCross,
    FullStar,
    OpenCircle,
    OpenSquare,
    OpenTriangleUp,
    OpenDiamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillStyle {
    #[default]
    Hollow,
    Solid,
    Hatched,
    CrossHatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Line, marker and fill attributes carried by a drawn series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawAttributes {
    pub line_color: Color,
    pub line_style: LineStyle,
    pub line_width: f64,
    pub marker_color: Color,
    pub marker: Marker,
    pub marker_size: f64,
    pub fill_color: Color,
    pub fill_style: FillStyle,
}

impl Default for DrawAttributes {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_style: LineStyle::Solid,
            line_width: 1.0,
            marker_color: Color::BLACK,
            marker: Marker::FullCircle,
            marker_size: 1.0,
            fill_color: Color::WHITE,
            fill_style: FillStyle::Hollow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub font: u16,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 0.035,
            font: 42,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub size: f64,
    pub font: u16,
    pub color: Color,
    pub offset: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            size: 0.04,
            font: 42,
            color: Color::BLACK,
            offset: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    pub size: f64,
    pub font: u16,
    pub color: Color,
    pub center_x: bool,
    pub center_y: bool,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            size: 0.04,
            font: 42,
            color: Color::BLACK,
            center_x: false,
            center_y: false,
            offset_x: 1.0,
            offset_y: 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub color: Color,
    pub marker: Marker,
    pub marker_size: f64,
    pub line_style: LineStyle,
    pub line_width: f64,
    pub fill_style: FillStyle,
    pub fill_color: Color,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            marker: Marker::FullCircle,
            marker_size: 1.0,
            line_style: LineStyle::Solid,
            line_width: 1.0,
            fill_style: FillStyle::Hollow,
            fill_color: Color::WHITE,
        }
    }
}

impl PlotStyle {
    #[must_use]
    pub fn draw_attributes(&self) -> DrawAttributes {
        DrawAttributes {
            line_color: self.color,
            line_style: self.line_style,
            line_width: self.line_width,
            marker_color: self.color,
            marker: self.marker,
            marker_size: self.marker_size,
            fill_color: self.fill_color,
            fill_style: self.fill_style,
        }
    }
}

/// Grouped styling applied to histograms, legends and text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub text: TextStyle,
    pub label: LabelStyle,
    pub title: TitleStyle,
    pub plot: PlotStyle,
}

impl Style {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.plot.color = color;
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.plot.marker = marker;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill_style: FillStyle, fill_color: Color) -> Self {
        self.plot.fill_style = fill_style;
        self.plot.fill_color = fill_color;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line_style: LineStyle, line_width: f64) -> Self {
        self.plot.line_style = line_style;
        self.plot.line_width = line_width;
        self
    }

    /// Copies plot attributes onto the histogram and label/title styling onto
    /// each of its axes.
    pub fn apply_to_histogram(&self, hist: &mut Histogram) {
        hist.attributes = self.plot.draw_attributes();
        for axis in Axis::ALL {
            let text = &mut hist.axis_mut(axis).text;
            text.label_size = self.label.size;
            text.label_font = self.label.font;
            text.label_color = self.label.color;
            text.label_offset = self.label.offset;
            text.title_size = self.title.size;
            text.title_font = self.title.font;
            text.title_color = self.title.color;
            match axis {
                Axis::X => {
                    text.center_title = self.title.center_x;
                    text.title_offset = self.title.offset_x;
                }
                Axis::Y => {
                    text.center_title = self.title.center_y;
                    text.title_offset = self.title.offset_y;
                }
                Axis::Z => {}
            }
        }
    }

    pub fn apply_to_legend(&self, legend: &mut Legend) {
        legend.text = self.text;
    }

    pub fn apply_to_text_box(&self, text_box: &mut TextBox) {
        text_box.text = self.text;
    }
}

/// Deterministic color table for series indexed by bucket.
#[must_use]
pub fn palette_color(index: usize) -> Color {
    const TABLE: [Color; 6] = [
        Color::BLACK,
        Color::RED,
        Color::BLUE,
        Color::GREEN,
        Color::ORANGE,
        Color::MAGENTA,
    ];
    TABLE[index % TABLE.len()]
}

/// Deterministic marker table for series indexed by bucket.
#[must_use]
pub fn palette_marker(index: usize) -> Marker {
    const TABLE: [Marker; 6] = [
        Marker::FullCircle,
        Marker::FullSquare,
        Marker::FullTriangleUp,
        Marker::FullDiamond,
        Marker::OpenCircle,
        Marker::OpenSquare,
    ];
    TABLE[index % TABLE.len()]
}

#[cfg(test)]
mod tests {
    use super::{Color, Marker, Style, palette_color, palette_marker};
    use crate::core::histogram::Histogram;
    use crate::core::Axis;

    #[test]
    fn color_validation_rejects_out_of_range_channels() {
        assert!(Color::rgb(0.2, 0.4, 0.6).validate().is_ok());
        assert!(Color::rgba(1.2, 0.0, 0.0, 1.0).validate().is_err());
    }

    #[test]
    fn style_applies_plot_and_axis_text_attributes() {
        let mut hist = Histogram::new_1d("h", "", 4, 0.0, 4.0).expect("hist");
        let mut style = Style::default()
            .with_color(Color::RED)
            .with_marker(Marker::OpenSquare);
        style.title.offset_y = 1.7;
        style.label.size = 0.05;
        style.apply_to_histogram(&mut hist);

        assert_eq!(hist.attributes.line_color, Color::RED);
        assert_eq!(hist.attributes.marker, Marker::OpenSquare);
        let y_text = &hist.axis(Axis::Y).text;
        assert!((y_text.title_offset - 1.7).abs() <= 1e-12);
        assert!((hist.axis(Axis::X).text.label_size - 0.05).abs() <= 1e-12);
    }

    #[test]
    fn palettes_cycle() {
        assert_eq!(palette_color(0), palette_color(6));
        assert_eq!(palette_marker(1), palette_marker(7));
    }
}
