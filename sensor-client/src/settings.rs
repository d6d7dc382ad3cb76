use std::path::PathBuf;
use std::time::Duration;
use std::{env, io};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

impl Logger {
    /// Directives used when `RUST_LOG` is unset. The binary target is named
    /// apart from the library, so both need their own directive.
    pub fn default_filter(&self) -> String {
        let level = self.level.as_str();
        format!("sensor_client={level},sensor_form={level}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Api {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    pub storage: Storage,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::build(
            Config::builder()
                .add_source(File::with_name("configs/default").required(false))
                .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
                .add_source(Environment::with_prefix("SENSOR").separator("__")),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let mut settings: Settings = builder
            .set_default("logger.level", "info")?
            .set_default("api.base_url", "http://127.0.0.1:8000")?
            .set_default("storage.path", "storage/local_storage.json")?
            .build()?
            .try_deserialize()?;

        settings.storage.path = normalize_path(&settings.storage.path)
            .map_err(|e| ConfigError::Message(e.to_string()))?
            .to_string_lossy()
            .to_string();

        Ok(settings)
    }
}

fn normalize_path(path: &str) -> io::Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        env::current_dir()?.join(path_buf)
    })
}
