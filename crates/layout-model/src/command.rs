//! Typed commands emitted by UI controls.
//!
//! Each control (slider, layout selector, canvas pointer, keyboard) maps to
//! one variant, so the compositing logic never depends on a particular UI
//! toolkit. Commands serialize as tagged JSON objects, one per line in
//! replay scripts:
//!
//! ```json
//! {"type":"set_layout","mode":"1:1"}
//! {"type":"pointer_down","x":120.0,"y":300.0}
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::{Axis, LayoutMode};

/// A single UI command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Overlay width slider moved.
    SetOverlayWidth { value: i32 },

    /// Overlay height slider moved.
    SetOverlayHeight { value: i32 },

    /// Layout selector changed.
    SetLayout { mode: LayoutMode },

    /// Pointer pressed on the canvas (canvas pixel coordinates).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the canvas.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp,

    /// Pointer left the canvas.
    PointerLeave,

    /// Drag axis toggle set explicitly.
    SetAxisLock { allow_vertical_move: bool },

    /// Drag axis toggle flipped.
    ToggleAxisLock,

    /// Control panel shown/hidden.
    TogglePanel,

    /// Export filename field edited.
    SetFilename { value: String },

    /// Export button pressed.
    Export,

    /// Key pressed anywhere on the page.
    KeyDown {
        key: String,
        #[serde(default)]
        alt: bool,
    },
}

impl Command {
    /// Slider command for one overlay axis.
    pub fn overlay_dimension(axis: Axis, value: i32) -> Self {
        match axis {
            Axis::Width => Command::SetOverlayWidth { value },
            Axis::Height => Command::SetOverlayHeight { value },
        }
    }
}

/// Parse newline-delimited JSON commands, skipping blank and `#` lines.
pub fn parse_commands(jsonl: &str) -> Result<Vec<Command>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
