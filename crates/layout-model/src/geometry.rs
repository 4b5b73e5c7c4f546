//! Draw rectangles and the fitting rules that place images on the canvas.
//!
//! Everything here is pure: given a layout, a canvas size and intrinsic
//! image sizes, the functions return where each image is drawn.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{LayoutMode, OverlayDimensions};

/// Gap between the bottom of the overlay and the bottom canvas edge in "16:3".
pub const OVERLAY_BOTTOM_MARGIN: f64 = 40.0;

/// Fraction of the canvas height given to the overlay band in "1:1".
/// The base image fills the remaining bottom band.
pub const SQUARE_OVERLAY_BAND: f64 = 0.45;

/// An axis-aligned rectangle in canvas pixels.
///
/// Values may be fractional, and the origin may be negative while the user
/// drags an image partly off the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether a point lies inside the rectangle, edges included.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Grow the rectangle by `pad` on every side.
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    /// Move the rectangle by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Pixel size of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Intrinsic pixel size of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject sizes the fitting rules cannot work with.
    pub fn validate(self) -> Result<Self, LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::InvalidDimension {
                width: self.width as f64,
                height: self.height as f64,
            });
        }
        Ok(self)
    }
}

/// Anything with an intrinsic pixel size that can be placed on the canvas.
pub trait ImageSource {
    fn size(&self) -> ImageSize;
}

impl ImageSource for ImageSize {
    fn size(&self) -> ImageSize {
        *self
    }
}

fn check_positive(width: f64, height: f64) -> Result<(), LayoutError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimension { width, height })
    }
}

/// Largest rectangle with the image's aspect ratio that fits inside a
/// `box_width x box_height` area, centered on both axes.
///
/// The result touches the box on at least one axis, so either `x == 0` or
/// `y == 0`.
pub fn contain_rect(
    image_width: f64,
    image_height: f64,
    box_width: f64,
    box_height: f64,
) -> Result<Rect, LayoutError> {
    check_positive(image_width, image_height)?;
    check_positive(box_width, box_height)?;

    let image_aspect = image_width / image_height;
    let box_aspect = box_width / box_height;

    if image_aspect > box_aspect {
        let height = box_width / image_aspect;
        Ok(Rect::new(0.0, (box_height - height) / 2.0, box_width, height))
    } else {
        let width = box_height * image_aspect;
        Ok(Rect::new((box_width - width) / 2.0, 0.0, width, box_height))
    }
}

/// Scale an image to cover the bottom band of a "1:1" canvas.
///
/// The image keeps its aspect ratio and may overflow the band to the right
/// or below; it is never letterboxed.
pub fn cover_band_rect(image: ImageSize, canvas: CanvasSize) -> Result<Rect, LayoutError> {
    let image = image.validate()?;
    let canvas_w = canvas.width as f64;
    let canvas_h = canvas.height as f64;
    let band_top = canvas_h * SQUARE_OVERLAY_BAND;
    let band_h = canvas_h - band_top;
    check_positive(canvas_w, band_h)?;

    let image_w = image.width as f64;
    let image_h = image.height as f64;
    let scale = (canvas_w / image_w).max(band_h / image_h);

    Ok(Rect::new(0.0, band_top, image_w * scale, image_h * scale))
}

/// Where the base image is drawn before any drag is applied.
pub fn base_rect_for_layout(
    mode: LayoutMode,
    canvas: CanvasSize,
    image: ImageSize,
) -> Result<Rect, LayoutError> {
    match mode {
        LayoutMode::Square => cover_band_rect(image, canvas),
        LayoutMode::Wide => contain_rect(
            image.width as f64,
            image.height as f64,
            canvas.width as f64,
            canvas.height as f64,
        ),
    }
}

/// Where the overlay image is drawn.
pub fn overlay_rect(mode: LayoutMode, canvas: CanvasSize, overlay: OverlayDimensions) -> Rect {
    let canvas_w = canvas.width as f64;
    let canvas_h = canvas.height as f64;
    match mode {
        LayoutMode::Square => Rect::new(0.0, 0.0, canvas_w, canvas_h * SQUARE_OVERLAY_BAND),
        LayoutMode::Wide => {
            let width = overlay.width as f64;
            let height = overlay.height as f64;
            Rect::new(
                (canvas_w - width) / 2.0,
                canvas_h - height - OVERLAY_BOTTOM_MARGIN,
                width,
                height,
            )
        }
    }
}
