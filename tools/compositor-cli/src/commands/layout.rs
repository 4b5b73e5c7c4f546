//! Inspect or change the persisted layout settings.

use clap::Subcommand;
use compositor_common::config::AppConfig;
use compositor_layout_model::{Command, JsonFileStore, LayoutMode, LayoutSettings};
use compositor_render_engine::{ImageStub, Session};

#[derive(Debug, Subcommand)]
pub enum LayoutAction {
    /// Show the persisted overlay size and layout
    Show,

    /// Select a layout ("16:3" or "1:1")
    Set {
        /// Layout to select
        mode: LayoutMode,
    },

    /// Set the overlay size
    Overlay {
        /// Overlay width in pixels
        #[arg(long, allow_negative_numbers = true)]
        width: Option<i32>,

        /// Overlay height in pixels
        #[arg(long, allow_negative_numbers = true)]
        height: Option<i32>,
    },

    /// Restore the default overlay size and layout
    Reset,
}

pub fn run(config: &AppConfig, action: LayoutAction) -> anyhow::Result<()> {
    let mut store = JsonFileStore::open(&config.settings_file);

    let settings = match action {
        LayoutAction::Show => LayoutSettings::load(&store),
        LayoutAction::Reset => {
            let defaults = LayoutSettings::default();
            defaults.save(&mut store)?;
            tracing::info!(path = %store.path().display(), "Layout settings reset");
            defaults
        }
        LayoutAction::Set { mode } => apply(store, [Some(Command::SetLayout { mode })])?,
        LayoutAction::Overlay { width, height } => {
            if width.is_none() && height.is_none() {
                anyhow::bail!("Nothing to change: pass --width and/or --height");
            }
            apply(
                store,
                [
                    width.map(|value| Command::SetOverlayWidth { value }),
                    height.map(|value| Command::SetOverlayHeight { value }),
                ],
            )?
        }
    };

    print_settings(config, &settings);
    Ok(())
}

/// Run commands through a session without images so the layout rules match
/// an interactive session's.
fn apply<const N: usize>(
    store: JsonFileStore,
    commands: [Option<Command>; N],
) -> anyhow::Result<LayoutSettings> {
    let mut session: Session<ImageStub> = Session::new(Box::new(store));
    for command in commands.into_iter().flatten() {
        session.apply(command)?;
    }
    Ok(session.layout().settings())
}

fn print_settings(config: &AppConfig, settings: &LayoutSettings) {
    println!("Settings: {}", config.settings_file.display());
    println!("  Layout: {}", settings.layout);
    println!(
        "  Overlay size: {}x{}",
        settings.overlay_width, settings.overlay_height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_layout_model::SettingsStore;

    fn config_in(name: &str) -> (AppConfig, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        let config = AppConfig {
            settings_file: dir.join("settings.json"),
            ..AppConfig::default()
        };
        (config, dir)
    }

    #[test]
    fn test_set_and_reset_layout() {
        let (config, dir) = config_in("compositor_test_cli_layout");

        run(
            &config,
            LayoutAction::Set {
                mode: LayoutMode::Square,
            },
        )
        .unwrap();
        run(
            &config,
            LayoutAction::Overlay {
                width: Some(640),
                height: None,
            },
        )
        .unwrap();

        let store = JsonFileStore::open(&config.settings_file);
        assert_eq!(store.get("selectedLayout").as_deref(), Some("1:1"));
        assert_eq!(store.get("overlayWidth").as_deref(), Some("640"));

        run(&config, LayoutAction::Reset).unwrap();
        let store = JsonFileStore::open(&config.settings_file);
        assert_eq!(LayoutSettings::load(&store), LayoutSettings::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overlay_requires_a_value() {
        let (config, dir) = config_in("compositor_test_cli_layout_empty");
        assert!(run(
            &config,
            LayoutAction::Overlay {
                width: None,
                height: None
            }
        )
        .is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
