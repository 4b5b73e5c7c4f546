//! Render a composition and export it as PNG.

use std::path::PathBuf;

use anyhow::Context;
use compositor_common::config::AppConfig;
use compositor_layout_model::Command;
use compositor_render_engine::{export_png, Effect, RasterImage, RasterSurface};

use super::{build_session, CompositionArgs};

pub fn run(
    config: &AppConfig,
    composition: CompositionArgs,
    filename: String,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = build_session(config, &composition, |path| {
        RasterImage::open(path).with_context(|| format!("Failed to load {}", path.display()))
    })?;

    session.apply(Command::SetFilename { value: filename })?;
    let Effect::Export { file_name } = session.apply(Command::Export)? else {
        anyhow::bail!("export command did not produce an export");
    };

    let mut surface = RasterSurface::new();
    session.render(&mut surface);

    let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
    let path = export_png(&surface, &output_dir, &file_name)
        .with_context(|| format!("Failed to export to {}", output_dir.display()))?;

    let canvas = session.layout().canvas();
    println!("Exported: {}", path.display());
    println!("  Layout: {}", session.layout().mode());
    println!("  Canvas: {}x{}", canvas.width, canvas.height);
    Ok(())
}
