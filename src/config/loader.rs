// Configuration file loading and creation

use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory holding `config.toml` and `settings.toml`
pub fn get_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tickpong");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path
}

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(config_path)?;
        Ok(Config::default())
    }
}

/// Parse a config file body, falling back to defaults on malformed input
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str::<Config>(contents) {
        Ok(mut config) => {
            config.ai = config.ai.validated();
            config
        }
        Err(e) => {
            warn!("failed to parse config file, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<()> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).context("serializing default config")?;

    let commented_toml = format!(
        "# Tickpong Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: Use \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\", etc.\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # The computer opponent on/off switch and its difficulty are chosen in the\n\
         # menu and stored in settings.toml next to this file.\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml).with_context(|| format!("writing {}", path.display()))?;
    info!("created default config file at {}", path.display());
    Ok(())
}
