//! CPU raster surface backed by an `image::RgbaImage`.

use std::io::Cursor;
use std::path::Path;

use compositor_common::error::{CompositorError, CompositorResult};
use compositor_layout_model::geometry::{ImageSize, ImageSource, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;

use crate::surface::{Color, DrawingSurface, PngExport};

/// A decoded image ready to be drawn on a [`RasterSurface`].
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an image file (format guessed from its contents and extension).
    pub fn open(path: impl AsRef<Path>) -> CompositorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CompositorError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let pixels = image::open(path)
            .map_err(|e| CompositorError::image(format!("{}: {e}", path.display())))?
            .to_rgba8();
        tracing::debug!(
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "Decoded image"
        );
        Ok(Self::from_rgba(pixels))
    }

    /// Decode an in-memory encoded image, e.g. clipboard bytes.
    pub fn decode(bytes: &[u8]) -> CompositorResult<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| CompositorError::image(e.to_string()))?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl ImageSource for RasterImage {
    fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }
}

/// Raster canvas. Starts at 1x1 and is resized by every `clear`.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    canvas: RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(1, 1),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }
}

impl DrawingSurface for RasterSurface {
    type Image = RasterImage;

    fn clear(&mut self, width: u32, height: u32) {
        if self.canvas.dimensions() == (width, height) {
            self.canvas.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        } else {
            self.canvas = RgbaImage::new(width, height);
        }
    }

    /// Each covered canvas pixel is mapped back into the source and sampled
    /// bilinearly, so the cost depends on the visible area only, however
    /// large `rect` is.
    fn draw_image(&mut self, image: &RasterImage, rect: Rect) {
        let (canvas_w, canvas_h) = self.canvas.dimensions();
        let Some((x0, x1)) = visible_span(rect.x, rect.width, canvas_w) else {
            return;
        };
        let Some((y0, y1)) = visible_span(rect.y, rect.height, canvas_h) else {
            return;
        };

        let src = &image.pixels;
        let scale_x = src.width() as f64 / rect.width;
        let scale_y = src.height() as f64 / rect.height;

        for py in y0..y1 {
            let cy = py as f64 + 0.5;
            if cy < rect.y || cy >= rect.bottom() {
                continue;
            }
            let v = (cy - rect.y) * scale_y - 0.5;
            for px in x0..x1 {
                let cx = px as f64 + 0.5;
                if cx < rect.x || cx >= rect.right() {
                    continue;
                }
                let u = (cx - rect.x) * scale_x - 0.5;
                let sample = bilinear_sample(src, u, v);
                let dst = self.canvas.get_pixel_mut(px, py);
                *dst = blend_over(*dst, sample);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (canvas_w, canvas_h) = self.canvas.dimensions();
        let Some((x0, x1)) = visible_span(rect.x, rect.width, canvas_w) else {
            return;
        };
        let Some((y0, y1)) = visible_span(rect.y, rect.height, canvas_h) else {
            return;
        };
        let area = imageproc::rect::Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0);
        draw_filled_rect_mut(&mut self.canvas, area, Rgba(color));
    }
}

impl PngExport for RasterSurface {
    fn encode_png(&self) -> CompositorResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CompositorError::export(e.to_string()))?;
        Ok(bytes)
    }
}

/// Pixel range `[start, end)` of a span clipped to `[0, limit)`.
/// Pixels are included when their centers fall inside the span.
fn visible_span(start: f64, length: f64, limit: u32) -> Option<(u32, u32)> {
    if !(start.is_finite() && length.is_finite()) || length <= 0.0 {
        return None;
    }
    let first = (start - 0.5).ceil().max(0.0);
    let last = (start + length - 0.5).ceil().min(limit as f64);
    if first >= last {
        return None;
    }
    Some((first as u32, last as u32))
}

/// Bilinear sample with edge clamping.
fn bilinear_sample(img: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let max_x = img.width().saturating_sub(1) as f64;
    let max_y = img.height().saturating_sub(1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(max_x as u32);
    let y1 = (y0 + 1).min(max_y as u32);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let tl = img.get_pixel(x0, y0).0;
    let tr = img.get_pixel(x1, y0).0;
    let bl = img.get_pixel(x0, y1).0;
    let br = img.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = tl[c] as f64 + (tr[c] as f64 - tl[c] as f64) * fx;
        let bot = bl[c] as f64 + (br[c] as f64 - bl[c] as f64) * fx;
        out[c] = (top + (bot - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Source-over compositing of straight-alpha pixels.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f64 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = (src[c] as f64 * sa + dst[c] as f64 * da * (1.0 - sa)) / out_a;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
