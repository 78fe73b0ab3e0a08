//! Configuration file loading for regchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment (`REGCHAT_API_URL`, `REGCHAT_<SECTION>__<KEY>`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./regchat.toml` or `./.regchat.toml`
//! 4. Global: `$XDG_CONFIG_HOME/regchat/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileChatConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use loader::{API_URL_ENV, ConfigLoader};
