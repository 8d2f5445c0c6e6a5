// Configuration module for Tickpong
// Handles loading the TOML config file and the persisted player settings

pub mod loader;
pub mod settings;
pub mod types;

pub use loader::{get_config_dir, load_config};
pub use settings::{AiSettings, FileSettings, SettingsStore};
pub use types::{AIConfig, AiTier, Config, DisplayConfig, KeyBindings, PhysicsConfig};
