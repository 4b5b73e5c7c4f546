//! Drawing surface abstraction.
//!
//! The renderer only needs three primitives: clear the canvas, draw an image
//! scaled into a rect, and fill a rect with a solid color. Exporting the
//! finished raster is a separate capability so that non-raster surfaces (the
//! [`RecordingSurface`] used for dry runs) need not fake it.

use compositor_common::error::CompositorResult;
use compositor_layout_model::geometry::{ImageSize, ImageSource, Rect};
use serde::Serialize;

/// RGBA color, 8 bits per channel.
pub type Color = [u8; 4];

/// Target of the renderer's draw calls.
pub trait DrawingSurface {
    /// Image handle type this surface can draw.
    type Image: ImageSource;

    /// Resize the canvas to `width x height` and make it fully transparent.
    fn clear(&mut self, width: u32, height: u32);

    /// Draw `image` scaled to fill `rect`. Parts outside the canvas are clipped.
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);

    /// Fill `rect` with a solid color. Parts outside the canvas are clipped.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Surfaces whose content can be encoded as PNG.
pub trait PngExport {
    fn encode_png(&self) -> CompositorResult<Vec<u8>>;
}

/// A named image stand-in for surfaces that never touch pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStub {
    pub label: String,
    pub size: ImageSize,
}

impl ImageStub {
    pub fn new(label: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            label: label.into(),
            size: ImageSize::new(width, height),
        }
    }
}

impl ImageSource for ImageStub {
    fn size(&self) -> ImageSize {
        self.size
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Clear { width: u32, height: u32 },
    Image { label: String, rect: Rect },
    Fill { rect: Rect, color: Color },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Draw calls since the most recent clear, including that clear.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear { .. }))
            .unwrap_or(0);
        &self.ops[start..]
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl DrawingSurface for RecordingSurface {
    type Image = ImageStub;

    fn clear(&mut self, width: u32, height: u32) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn draw_image(&mut self, image: &ImageStub, rect: Rect) {
        self.ops.push(DrawOp::Image {
            label: image.label.clone(),
            rect,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill { rect, color });
    }
}
