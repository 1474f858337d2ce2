use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use infra::persistence::FileStorage;

use crate::orders::WhatsApp;

const ENV_PREFIX: &str = "ZAYKAA_";

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub whatsapp: WhatsApp,
}

#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl StorageConfig {
    /// Reads `ZAYKAA_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I: IntoIterator<Item = (String, String)>>(vars: I) -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, StorageConfig>(vars)
            .context("storage config from environment")?;
        Ok(config)
    }

    pub fn build(&self) -> Result<FileStorage> {
        debug!("Open storage at {:?}", self);
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;
        }
        Ok(FileStorage::open(&self.path))
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    #[serde(default)]
    modules: HashMap<String, LogLevel>,
    #[serde(default)]
    timestamp_nanos: bool,
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            &LogLevel::Off => log::LevelFilter::Off,
            &LogLevel::Error => log::LevelFilter::Error,
            &LogLevel::Warn => log::LevelFilter::Warn,
            &LogLevel::Info => log::LevelFilter::Info,
            &LogLevel::Debug => log::LevelFilter::Debug,
            &LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        return b;
    }
}
