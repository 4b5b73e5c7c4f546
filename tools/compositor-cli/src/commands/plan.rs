//! Print the draw calls of a composition without rasterizing it.

use anyhow::Context;
use compositor_common::config::AppConfig;
use compositor_render_engine::{DrawOp, ImageStub, RecordingSurface};

use super::{build_session, CompositionArgs};

pub fn run(config: &AppConfig, composition: CompositionArgs, json: bool) -> anyhow::Result<()> {
    // Only the headers are read; pixel data is never decoded.
    let session = build_session(config, &composition, |path| {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(ImageStub::new(label, width, height))
    })?;

    let mut surface = RecordingSurface::new();
    session.render(&mut surface);

    if json {
        println!("{}", serde_json::to_string_pretty(surface.ops())?);
        return Ok(());
    }

    let overlay = session.layout().overlay_dimensions();
    println!("Layout: {}", session.layout().mode());
    println!("Overlay size: {}x{}", overlay.width, overlay.height);
    for op in surface.ops() {
        println!("  {}", describe(op));
    }
    Ok(())
}

fn describe(op: &DrawOp) -> String {
    match op {
        DrawOp::Clear { width, height } => format!("clear {width}x{height}"),
        DrawOp::Image { label, rect } => format!(
            "image {label} at ({:.1}, {:.1}) size {:.1}x{:.1}",
            rect.x, rect.y, rect.width, rect.height
        ),
        DrawOp::Fill { rect, color } => format!(
            "fill #{:02x}{:02x}{:02x}{:02x} at ({:.1}, {:.1}) size {:.1}x{:.1}",
            color[0], color[1], color[2], color[3], rect.x, rect.y, rect.width, rect.height
        ),
    }
}
