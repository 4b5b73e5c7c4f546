//! Replay a JSONL script against a raster session.
//!
//! Each non-blank line is either an image step or a UI command:
//!
//! ```text
//! # comments start with '#'
//! {"load_base":"photo.jpg"}
//! {"load_overlay":"logo.png"}
//! {"type":"set_layout","mode":"1:1"}
//! {"type":"key_down","key":"S","alt":true}
//! ```
//!
//! Image paths are relative to the script's directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use compositor_common::config::AppConfig;
use compositor_layout_model::Command;
use compositor_render_engine::{
    export_png, Effect, ImageSlot, RasterImage, RasterSurface, RenderStyle, Session,
};
use serde::Deserialize;

use super::open_store;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ImageStep {
    LoadBase(PathBuf),
    LoadOverlay(PathBuf),
    Paste(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Image(ImageStep),
    Command(Command),
}

fn parse_script(text: &str) -> anyhow::Result<Vec<ScriptStep>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid step on line {number}"))
        })
        .collect()
}

#[derive(Debug, Default)]
struct ReplaySummary {
    steps: usize,
    redraws: usize,
    exports: Vec<PathBuf>,
}

pub fn run(
    config: &AppConfig,
    script: PathBuf,
    output_dir: Option<PathBuf>,
    ephemeral: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps = parse_script(&text)?;
    let script_dir = script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());

    let store = open_store(config, ephemeral)?;
    let style = RenderStyle::with_highlight_color(config.export.highlight_color);
    let mut session: Session<RasterImage> = Session::new(store).with_style(style);

    tracing::info!(script = %script.display(), steps = steps.len(), "Replaying script");
    let summary = replay(&mut session, steps, &script_dir, &output_dir)?;

    println!("Replayed {} steps from {}", summary.steps, script.display());
    println!("  Redraws: {}", summary.redraws);
    println!("  Layout: {}", session.layout().mode());
    let overlay = session.layout().overlay_dimensions();
    println!("  Overlay size: {}x{}", overlay.width, overlay.height);
    for path in &summary.exports {
        println!("  Exported: {}", path.display());
    }
    Ok(())
}

fn replay(
    session: &mut Session<RasterImage>,
    steps: Vec<ScriptStep>,
    script_dir: &Path,
    output_dir: &Path,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut surface = RasterSurface::new();

    for step in steps {
        summary.steps += 1;
        let effect = match step {
            ScriptStep::Image(image) => load_step(session, image, script_dir)?,
            ScriptStep::Command(command) => session.apply(command)?,
        };

        match effect {
            Effect::None => {}
            Effect::Redraw => summary.redraws += 1,
            Effect::Export { file_name } => {
                session.render(&mut surface);
                summary.redraws += 1;
                summary
                    .exports
                    .push(export_png(&surface, output_dir, &file_name)?);
            }
        }
    }

    Ok(summary)
}

fn load_step(
    session: &mut Session<RasterImage>,
    step: ImageStep,
    script_dir: &Path,
) -> anyhow::Result<Effect> {
    let (slot, path) = match step {
        ImageStep::LoadBase(path) => (Some(ImageSlot::Base), path),
        ImageStep::LoadOverlay(path) => (Some(ImageSlot::Overlay), path),
        ImageStep::Paste(path) => (None, path),
    };
    let path = script_dir.join(path);
    let image = RasterImage::open(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    match slot {
        Some(slot) => Ok(session.load_image(slot, image)?),
        None => {
            let slot = session.paste_image(image)?;
            tracing::debug!(?slot, path = %path.display(), "Pasted image");
            Ok(Effect::Redraw)
        }
    }
}
