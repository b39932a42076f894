use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::core::notifications::DEFAULT_NOTICE_TTL_SECS;
use crate::core::utils::{ensure_dir, PathResolver};
use crate::currency::{CurrencyFormat, DigitGrouping, DEFAULT_SYMBOL};
use crate::errors::{Result, SpendError};
use crate::storage::json_backend::replace_file;

/// User-level preferences that live outside the persisted records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Overrides where records are stored. Defaults to the data root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub currency_symbol: String,
    pub digit_grouping: DigitGrouping,
    pub notice_ttl_secs: u64,
    /// Extra `EnvFilter` directive, e.g. `spendwise_core=debug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency_symbol: DEFAULT_SYMBOL.into(),
            digit_grouping: DigitGrouping::Indian,
            notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone(), self.digit_grouping)
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Missing file yields defaults; an unreadable one is a `Config` error.
    pub fn load(&self) -> Result<Config> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data).map_err(|err| {
            SpendError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Directory that holds the record files for `config`.
    pub fn records_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::records_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
