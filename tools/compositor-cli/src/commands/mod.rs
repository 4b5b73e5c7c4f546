//! Subcommand implementations and the composition setup they share.

pub mod compose;
pub mod config;
pub mod layout;
pub mod plan;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use compositor_common::config::AppConfig;
use compositor_layout_model::{
    Command, ImageSource, JsonFileStore, LayoutMode, MemoryStore, SettingsStore,
    OVERLAY_HEIGHT_KEY, OVERLAY_WIDTH_KEY, SELECTED_LAYOUT_KEY,
};
use compositor_render_engine::{RenderStyle, Session};

/// Inputs describing one composition.
#[derive(Debug, Clone, Args)]
pub struct CompositionArgs {
    /// Base image
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Overlay image
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Layout: "16:3" or "1:1" (defaults to the persisted layout)
    #[arg(short, long)]
    pub layout: Option<LayoutMode>,

    /// Overlay width in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub overlay_width: Option<i32>,

    /// Overlay height in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub overlay_height: Option<i32>,

    /// Drag the base image horizontally by this many pixels
    #[arg(long, allow_negative_numbers = true)]
    pub drag_x: Option<f64>,

    /// Drag the base image vertically by this many pixels
    #[arg(long, allow_negative_numbers = true)]
    pub drag_y: Option<f64>,

    /// Do not write layout changes back to the settings file
    #[arg(long)]
    pub ephemeral: bool,
}

/// Open the settings store named by the config.
///
/// Ephemeral stores start from the persisted values but keep changes in memory.
pub fn open_store(config: &AppConfig, ephemeral: bool) -> anyhow::Result<Box<dyn SettingsStore>> {
    let file_store = JsonFileStore::open(&config.settings_file);
    if !ephemeral {
        return Ok(Box::new(file_store));
    }

    let mut memory = MemoryStore::new();
    for key in [OVERLAY_WIDTH_KEY, OVERLAY_HEIGHT_KEY, SELECTED_LAYOUT_KEY] {
        if let Some(value) = file_store.get(key) {
            memory.set(key, &value)?;
        }
    }
    Ok(Box::new(memory))
}

/// Build a session from command-line inputs, feeding it the same commands
/// the UI controls would emit.
pub fn build_session<I, F>(
    config: &AppConfig,
    args: &CompositionArgs,
    mut load: F,
) -> anyhow::Result<Session<I>>
where
    I: ImageSource,
    F: FnMut(&Path) -> anyhow::Result<I>,
{
    let store = open_store(config, args.ephemeral)?;
    let style = RenderStyle::with_highlight_color(config.export.highlight_color);
    let mut session = Session::new(store).with_style(style);

    if let Some(path) = &args.base {
        let image = load(path)?;
        session
            .load_base(image)
            .with_context(|| format!("Cannot use base image {}", path.display()))?;
    }
    if let Some(path) = &args.overlay {
        let image = load(path)?;
        session
            .load_overlay(image)
            .with_context(|| format!("Cannot use overlay image {}", path.display()))?;
    }
    if let Some(mode) = args.layout {
        session.apply(Command::SetLayout { mode })?;
    }
    if let Some(value) = args.overlay_width {
        session.apply(Command::SetOverlayWidth { value })?;
    }
    if let Some(value) = args.overlay_height {
        session.apply(Command::SetOverlayHeight { value })?;
    }
    if let Some(dx) = args.drag_x {
        drag_base(&mut session, false, dx)?;
    }
    if let Some(dy) = args.drag_y {
        drag_base(&mut session, true, dy)?;
    }

    Ok(session)
}

/// Press on the visible middle of the base image and drag it by `delta`
/// along one axis.
fn drag_base<I: ImageSource>(
    session: &mut Session<I>,
    vertical: bool,
    delta: f64,
) -> anyhow::Result<()> {
    let Some(rect) = session.layout().base_rect() else {
        tracing::warn!("Ignoring drag: no base image loaded");
        return Ok(());
    };
    let x = rect.x + rect.width / 2.0;
    let y = rect.y + rect.height / 2.0;
    let (to_x, to_y) = if vertical { (x, y + delta) } else { (x + delta, y) };

    for command in [
        Command::SetAxisLock {
            allow_vertical_move: vertical,
        },
        Command::PointerDown { x, y },
        Command::PointerMove { x: to_x, y: to_y },
        Command::PointerUp,
    ] {
        session.apply(command)?;
    }
    Ok(())
}
