use serde::{Deserialize, Serialize};

/// Flags applied to a drawable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadOptions {
    pub log_x: u8,
    pub log_y: u8,
    pub tick_x: u8,
    pub tick_y: u8,
    pub grid_x: u8,
    pub grid_y: u8,
    pub border_mode: u8,
    pub border_size: u8,
    pub frame_border_mode: u8,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            log_x: 0,
            log_y: 0,
            tick_x: 1,
            tick_y: 1,
            grid_x: 0,
            grid_y: 0,
            border_mode: 0,
            border_size: 2,
            frame_border_mode: 0,
        }
    }
}

impl PadOptions {
    #[must_use]
    pub fn with_log_x(mut self, enabled: bool) -> Self {
        self.log_x = u8::from(enabled);
        self
    }

    #[must_use]
    pub fn with_log_y(mut self, enabled: bool) -> Self {
        self.log_y = u8::from(enabled);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid_x: bool, grid_y: bool) -> Self {
        self.grid_x = u8::from(grid_x);
        self.grid_y = u8::from(grid_y);
        self
    }

    #[must_use]
    pub fn with_border(mut self, mode: u8, size: u8) -> Self {
        self.border_mode = mode;
        self.border_size = size;
        self
    }

    #[must_use]
    pub fn is_log_x(&self) -> bool {
        self.log_x > 0
    }

    #[must_use]
    pub fn is_log_y(&self) -> bool {
        self.log_y > 0
    }
}
