//! Layout modes and the mutable layout state of a compositing session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::{base_rect_for_layout, overlay_rect, CanvasSize, ImageSize, Rect};
use crate::persisted::LayoutSettings;

/// Named preset controlling the canvas size and how images are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Base image contain-fitted to the whole canvas, overlay centered
    /// above the bottom edge.
    #[default]
    #[serde(rename = "16:3")]
    Wide,
    /// Overlay fills the top band, base image covers the bottom band.
    #[serde(rename = "1:1")]
    Square,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 2] = [LayoutMode::Wide, LayoutMode::Square];

    /// Label used in persisted settings and on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            LayoutMode::Wide => "16:3",
            LayoutMode::Square => "1:1",
        }
    }

    /// Canvas pixel size for this layout.
    pub fn canvas_size(&self) -> CanvasSize {
        match self {
            LayoutMode::Square => CanvasSize::new(1000, 1200),
            LayoutMode::Wide => CanvasSize::new(800, 800),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout '{0}' (expected one of: 16:3, 1:1)")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutMode {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.label() == s.trim())
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

/// User-adjustable overlay size in pixels.
///
/// Values are passed through from the range controls without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayDimensions {
    pub width: i32,
    pub height: i32,
}

impl OverlayDimensions {
    pub const DEFAULT_WIDTH: i32 = 500;
    pub const DEFAULT_HEIGHT: i32 = 270;

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for OverlayDimensions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Which overlay dimension a slider controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Width,
    Height,
}

/// Layout state of one session: mode, canvas, overlay size and base placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    mode: LayoutMode,
    canvas: CanvasSize,
    overlay: OverlayDimensions,
    /// Base rect as fitted for the current canvas, before dragging.
    base_fit: Option<Rect>,
    /// Drag delta applied on top of `base_fit`'s origin.
    base_offset: (f64, f64),
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::from_settings(&LayoutSettings::default())
    }
}

impl LayoutState {
    /// Startup state built from persisted (or default) settings.
    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self {
            mode: settings.layout,
            canvas: settings.layout.canvas_size(),
            overlay: settings.overlay_dimensions(),
            base_fit: None,
            base_offset: (0.0, 0.0),
        }
    }

    /// Snapshot of the values that survive a restart.
    pub fn settings(&self) -> LayoutSettings {
        LayoutSettings {
            overlay_width: self.overlay.width,
            overlay_height: self.overlay.height,
            layout: self.mode,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn overlay_dimensions(&self) -> OverlayDimensions {
        self.overlay
    }

    /// Current drag delta of the base image.
    pub fn base_offset(&self) -> (f64, f64) {
        self.base_offset
    }

    /// Switch layouts.
    ///
    /// The canvas is resized for `mode` and the base rect is re-fitted.
    /// Entering "1:1" from another layout with a base image loaded snaps the
    /// overlay dimensions to the base rect as it was drawn before the switch.
    /// Staying in "1:1" keeps them; any other switch restores the defaults.
    pub fn set_layout(
        &mut self,
        mode: LayoutMode,
        base: Option<ImageSize>,
    ) -> Result<(), LayoutError> {
        let previous_mode = self.mode;
        let previous_base = self.base_rect();

        self.overlay = match (mode, previous_base) {
            (LayoutMode::Square, _) if previous_mode == LayoutMode::Square => self.overlay,
            (LayoutMode::Square, Some(rect)) if base.is_some() => OverlayDimensions::new(
                rect.width.round() as i32,
                rect.height.round() as i32,
            ),
            _ => OverlayDimensions::default(),
        };

        self.mode = mode;
        self.canvas = mode.canvas_size();
        match base {
            Some(image) => self.fit_base(image)?,
            None => self.clear_base(),
        }

        tracing::debug!(
            layout = %mode,
            canvas_width = self.canvas.width,
            canvas_height = self.canvas.height,
            overlay_width = self.overlay.width,
            overlay_height = self.overlay.height,
            "Layout changed"
        );
        Ok(())
    }

    /// Set one overlay dimension. No clamping is applied.
    pub fn set_overlay_dimension(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Width => self.overlay.width = value,
            Axis::Height => self.overlay.height = value,
        }
    }

    /// Fit a freshly loaded base image to the current canvas, dropping any drag.
    pub fn fit_base(&mut self, image: ImageSize) -> Result<(), LayoutError> {
        let rect = base_rect_for_layout(self.mode, self.canvas, image)?;
        self.base_fit = Some(rect);
        self.base_offset = (0.0, 0.0);
        Ok(())
    }

    /// Forget the base placement.
    pub fn clear_base(&mut self) {
        self.base_fit = None;
        self.base_offset = (0.0, 0.0);
    }

    /// Where the base image is drawn, including the drag offset.
    pub fn base_rect(&self) -> Option<Rect> {
        self.base_fit
            .map(|rect| rect.translate(self.base_offset.0, self.base_offset.1))
    }

    /// Where the overlay image is drawn.
    pub fn overlay_rect(&self) -> Rect {
        overlay_rect(self.mode, self.canvas, self.overlay)
    }

    /// Move the base image so its left edge sits at `x`.
    pub fn move_base_x(&mut self, x: f64) {
        if let Some(fit) = self.base_fit {
            self.base_offset.0 = x - fit.x;
        }
    }

    /// Move the base image so its top edge sits at `y`.
    pub fn move_base_y(&mut self, y: f64) {
        if let Some(fit) = self.base_fit {
            self.base_offset.1 = y - fit.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE: ImageSize = ImageSize {
        width: 1600,
        height: 900,
    };

    #[test]
    fn test_layout_labels_round_trip() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.label().parse::<LayoutMode>().unwrap(), mode);
        }
        assert!("4:3".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_layout_serializes_as_label() {
        assert_eq!(serde_json::to_string(&LayoutMode::Square).unwrap(), "\"1:1\"");
        let mode: LayoutMode = serde_json::from_str("\"16:3\"").unwrap();
        assert_eq!(mode, LayoutMode::Wide);
    }

    #[test]
    fn test_canvas_sizes() {
        assert_eq!(LayoutMode::Square.canvas_size(), CanvasSize::new(1000, 1200));
        assert_eq!(LayoutMode::Wide.canvas_size(), CanvasSize::new(800, 800));
    }

    #[test]
    fn test_default_state() {
        let state = LayoutState::default();
        assert_eq!(state.mode(), LayoutMode::Wide);
        assert_eq!(state.canvas(), CanvasSize::new(800, 800));
        assert_eq!(state.overlay_dimensions(), OverlayDimensions::new(500, 270));
        assert!(state.base_rect().is_none());
    }

    #[test]
    fn test_enter_square_snaps_overlay_to_base() {
        let mut state = LayoutState::default();
        state.fit_base(LANDSCAPE).unwrap();
        state.set_layout(LayoutMode::Square, Some(LANDSCAPE)).unwrap();

        assert_eq!(state.overlay_dimensions(), OverlayDimensions::new(800, 450));
        assert_eq!(state.canvas(), CanvasSize::new(1000, 1200));
        let base = state.base_rect().unwrap();
        assert!((base.y - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_enter_square_without_base_resets_overlay() {
        let mut state = LayoutState::default();
        state.set_overlay_dimension(Axis::Width, 640);
        state.set_layout(LayoutMode::Square, None).unwrap();
        assert_eq!(state.overlay_dimensions(), OverlayDimensions::default());
    }

    #[test]
    fn test_leaving_square_resets_overlay() {
        let mut state = LayoutState::default();
        state.fit_base(LANDSCAPE).unwrap();
        state.set_layout(LayoutMode::Square, Some(LANDSCAPE)).unwrap();
        state.set_layout(LayoutMode::Wide, Some(LANDSCAPE)).unwrap();
        assert_eq!(state.overlay_dimensions(), OverlayDimensions::default());
        let base = state.base_rect().unwrap();
        assert!((base.y - 175.0).abs() < 1e-9);
        assert!((base.height - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_layout_is_idempotent() {
        for mode in LayoutMode::ALL {
            let mut state = LayoutState::default();
            state.fit_base(LANDSCAPE).unwrap();
            state.set_layout(mode, Some(LANDSCAPE)).unwrap();
            let once = state.clone();
            state.set_layout(mode, Some(LANDSCAPE)).unwrap();
            assert_eq!(state, once, "layout {mode} changed on second call");
        }
    }

    #[test]
    fn test_layout_switch_clears_drag() {
        let mut state = LayoutState::default();
        state.fit_base(LANDSCAPE).unwrap();
        state.move_base_x(-120.0);
        assert_eq!(state.base_offset(), (-120.0, 0.0));

        state.set_layout(LayoutMode::Wide, Some(LANDSCAPE)).unwrap();
        assert_eq!(state.base_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_overlay_dimension_accepts_any_value() {
        let mut state = LayoutState::default();
        state.set_overlay_dimension(Axis::Width, -20);
        state.set_overlay_dimension(Axis::Height, 5000);
        assert_eq!(state.overlay_dimensions(), OverlayDimensions::new(-20, 5000));
    }

    #[test]
    fn test_move_base_without_base_is_noop() {
        let mut state = LayoutState::default();
        state.move_base_x(10.0);
        state.move_base_y(10.0);
        assert_eq!(state.base_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_settings_snapshot() {
        let mut state = LayoutState::default();
        state.set_overlay_dimension(Axis::Height, 300);
        let settings = state.settings();
        assert_eq!(settings.overlay_height, 300);
        assert_eq!(LayoutState::from_settings(&settings).overlay_dimensions().height, 300);
    }
}
