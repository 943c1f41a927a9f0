use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "todo";
pub const ENV_PREFIX: &str = "TODO";
pub const DEFAULT_STORAGE_PATH: &str = "todo-storage.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// JSON document the list and theme are persisted in.
    pub storage_path: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from `todo.toml` (optional) and `TODO_*`
    /// environment variables, on top of the defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name(CONFIG_FILE).required(false))
                .add_source(config::Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let settings = builder
            .set_default("storage_path", DEFAULT_STORAGE_PATH)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The configured maximum log level, or `WARN` if it does not parse.
    pub fn max_log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}
