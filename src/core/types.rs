use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Closed interval `[low, high]` used for axis and projection ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> PlotResult<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(PlotError::InvalidData(format!(
                "interval bounds must be finite with low <= high (got {low}, {high})"
            )));
        }
        Ok(Self { low, high })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.high - self.low
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

/// Canvas size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(750, 750)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Margin {
    Top,
    Right,
    Bottom,
    Left,
}

impl Margin {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Margins in normalized pad coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn get(&self, margin: Margin) -> f64 {
        match margin {
            Margin::Top => self.top,
            Margin::Right => self.right,
            Margin::Bottom => self.bottom,
            Margin::Left => self.left,
        }
    }

    pub fn set(&mut self, margin: Margin, value: f64) {
        match margin {
            Margin::Top => self.top = value,
            Margin::Right => self.right = value,
            Margin::Bottom => self.bottom = value,
            Margin::Left => self.left = value,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        for margin in Margin::ALL {
            let value = self.get(margin);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidLayout(format!(
                    "margin {margin:?} must be finite and in [0, 1] (got {value})"
                )));
            }
        }
        if self.top + self.bottom >= 1.0 || self.left + self.right >= 1.0 {
            return Err(PlotError::InvalidLayout(
                "opposite margins must sum to less than 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.1, 0.1)
    }
}

/// Pad corners `[x0, y0, x1, y1]` in normalized canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertices {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Vertices {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn validate(&self) -> PlotResult<()> {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        if coords
            .iter()
            .any(|value| !value.is_finite() || !(0.0..=1.0).contains(value))
        {
            return Err(PlotError::InvalidLayout(format!(
                "vertices must be finite and in [0, 1] (got {coords:?})"
            )));
        }
        if self.x0 >= self.x1 || self.y0 >= self.y1 {
            return Err(PlotError::InvalidLayout(format!(
                "vertices must satisfy x0 < x1 and y0 < y1 (got {coords:?})"
            )));
        }
        Ok(())
    }
}

impl Default for Vertices {
    fn default() -> Self {
        Self::full()
    }
}

pub type Labels = Vec<String>;

#[cfg(test)]
mod tests {
    use super::{Interval, Margin, Margins, Vertices};

    #[test]
    fn interval_rejects_inverted_bounds() {
        assert!(Interval::new(2.0, 1.0).is_err());
        let interval = Interval::new(-1.0, 3.0).expect("valid interval");
        assert!((interval.width() - 4.0).abs() <= 1e-12);
        assert!(interval.contains(0.0));
    }

    #[test]
    fn margins_round_trip_by_enum() {
        let mut margins = Margins::default();
        margins.set(Margin::Left, 0.15);
        assert!((margins.get(Margin::Left) - 0.15).abs() <= 1e-12);
        assert!(margins.validate().is_ok());

        margins.set(Margin::Top, 0.6);
        margins.set(Margin::Bottom, 0.5);
        assert!(margins.validate().is_err());
    }

    #[test]
    fn vertices_area_and_validation() {
        let vertices = Vertices::new(0.0, 0.3, 1.0, 1.0);
        assert!((vertices.area() - 0.7).abs() <= 1e-12);
        assert!(vertices.validate().is_ok());
        assert!(Vertices::new(0.5, 0.0, 0.5, 1.0).validate().is_err());
    }
}
