//! Frame compositor: places the base and overlay images on a surface.
//!
//! A frame is always drawn in the same order:
//!
//! ```text
//! clear ── base image ── highlight band ── overlay image
//! ```
//!
//! so the overlay and its highlight always sit on top of the base.

use compositor_layout_model::layout::LayoutState;

use crate::surface::{Color, DrawingSurface};

/// Padding of the highlight band around the overlay, in pixels.
pub const HIGHLIGHT_PADDING: f64 = 5.0;

/// Default highlight band color (opaque yellow).
pub const HIGHLIGHT_COLOR: Color = [255, 255, 0, 255];

/// Visual parameters that are not part of the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub highlight_color: Color,
    pub highlight_padding: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            highlight_color: HIGHLIGHT_COLOR,
            highlight_padding: HIGHLIGHT_PADDING,
        }
    }
}

impl RenderStyle {
    pub fn with_highlight_color(color: Color) -> Self {
        Self {
            highlight_color: color,
            ..Self::default()
        }
    }
}

/// Draw one frame.
///
/// Missing images are skipped; neither is required.
pub fn render<S: DrawingSurface>(
    surface: &mut S,
    layout: &LayoutState,
    base: Option<&S::Image>,
    overlay: Option<&S::Image>,
    style: &RenderStyle,
) {
    let canvas = layout.canvas();
    surface.clear(canvas.width, canvas.height);

    if let (Some(image), Some(rect)) = (base, layout.base_rect()) {
        surface.draw_image(image, rect);
    }

    if let Some(image) = overlay {
        let rect = layout.overlay_rect();
        surface.fill_rect(rect.inflate(style.highlight_padding), style.highlight_color);
        surface.draw_image(image, rect);
    }

    tracing::trace!(
        layout = %layout.mode(),
        base = base.is_some(),
        overlay = overlay.is_some(),
        "Frame rendered"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, ImageStub, RecordingSurface};
    use compositor_layout_model::geometry::{ImageSize, Rect};
    use compositor_layout_model::layout::LayoutMode;

    fn base() -> ImageStub {
        ImageStub::new("base", 1600, 900)
    }

    fn overlay() -> ImageStub {
        ImageStub::new("overlay", 300, 300)
    }

    fn layout_with_base(mode: LayoutMode) -> LayoutState {
        let mut layout = LayoutState::default();
        layout.fit_base(ImageSize::new(1600, 900)).unwrap();
        layout.set_layout(mode, Some(ImageSize::new(1600, 900))).unwrap();
        layout
    }

    #[test]
    fn test_wide_frame_order() {
        let layout = layout_with_base(LayoutMode::Wide);
        let mut surface = RecordingSurface::new();
        render(&mut surface, &layout, Some(&base()), Some(&overlay()), &RenderStyle::default());

        let ops = surface.ops();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], DrawOp::Clear { width: 800, height: 800 });
        assert!(matches!(&ops[1], DrawOp::Image { label, .. } if label == "base"));
        assert_eq!(
            ops[2],
            DrawOp::Fill {
                rect: Rect::new(145.0, 485.0, 510.0, 280.0),
                color: HIGHLIGHT_COLOR,
            }
        );
        assert_eq!(
            ops[3],
            DrawOp::Image {
                label: "overlay".to_string(),
                rect: Rect::new(150.0, 490.0, 500.0, 270.0),
            }
        );
    }

    #[test]
    fn test_square_frame_puts_overlay_in_top_band() {
        let layout = layout_with_base(LayoutMode::Square);
        let mut surface = RecordingSurface::new();
        render(&mut surface, &layout, Some(&base()), Some(&overlay()), &RenderStyle::default());

        let ops = surface.ops();
        assert_eq!(ops[0], DrawOp::Clear { width: 1000, height: 1200 });
        match &ops[1] {
            DrawOp::Image { label, rect } => {
                assert_eq!(label, "base");
                assert!((rect.y - 540.0).abs() < 1e-9);
                assert!((rect.height - 660.0).abs() < 1e-9);
            }
            other => panic!("expected base image, got {other:?}"),
        }
        assert_eq!(
            ops[2],
            DrawOp::Fill {
                rect: Rect::new(-5.0, -5.0, 1010.0, 550.0),
                color: HIGHLIGHT_COLOR,
            }
        );
        match &ops[3] {
            DrawOp::Image { label, rect } => {
                assert_eq!(label, "overlay");
                assert!((rect.width - 1000.0).abs() < 1e-9);
                assert!((rect.height - 540.0).abs() < 1e-9);
            }
            other => panic!("expected overlay image, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_images_only_clear() {
        let layout = LayoutState::default();
        let mut surface = RecordingSurface::new();
        render(&mut surface, &layout, None, None, &RenderStyle::default());
        assert_eq!(surface.ops(), &[DrawOp::Clear { width: 800, height: 800 }]);
    }

    #[test]
    fn test_overlay_without_base() {
        let layout = LayoutState::default();
        let mut surface = RecordingSurface::new();
        render(&mut surface, &layout, None, Some(&overlay()), &RenderStyle::default());
        assert_eq!(surface.ops().len(), 3);
        assert!(matches!(surface.ops()[1], DrawOp::Fill { .. }));
    }

    #[test]
    fn test_custom_highlight_color() {
        let layout = LayoutState::default();
        let mut surface = RecordingSurface::new();
        let style = RenderStyle::with_highlight_color([255, 0, 255, 255]);
        render(&mut surface, &layout, None, Some(&overlay()), &style);
        assert!(matches!(surface.ops()[1], DrawOp::Fill { color: [255, 0, 255, 255], .. }));
    }
}
