//! Inspect or create the configuration file.

use std::path::Path;

use clap::Subcommand;
use compositor_common::config::AppConfig;

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(config: &AppConfig, config_path: &Path, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config file {} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            config.save_to(config_path)?;
            tracing::info!(path = %config_path.display(), "Config written");
            println!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_init_writes_loadable_config_once() {
        let dir = std::env::temp_dir().join("compositor_test_cli_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.export.output_dir = PathBuf::from("/tmp/banners");
        run(&config, &path, ConfigAction::Init { force: false }).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);

        assert!(run(&config, &path, ConfigAction::Init { force: false }).is_err());
        run(&AppConfig::default(), &path, ConfigAction::Init { force: true }).unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }
}
