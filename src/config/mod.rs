//! Configuration for proctree
//!
//! Hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (PROCTREE_*)
//! 3. Project config (.proctree.toml)
//! 4. User config (<config_dir>/proctree/config.toml)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{AnimationMode, ColorMode, Config, LoggingConfig, OutputConfig, TreeConfig};
