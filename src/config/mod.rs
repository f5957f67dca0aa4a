//! Configuration: file locations and `settings.conf` parsing.

pub mod paths;
pub mod settings;

pub use paths::{config_dir, logs_dir, resolve_settings_path, settings_path};
pub use settings::{AurHelper, Settings, load_settings, parse_settings};
