//! Store configuration structures.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Environment variable naming the store instance.
pub const ENV_STORE_NAME: &str = "JOB_STORE_NAME";
/// Environment variable selecting the ready index ordering.
pub const ENV_INDEX_ORDERING: &str = "JOB_STORE_INDEX_ORDERING";

/// Ordering of the ready-trigger index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrdering {
    /// Next fire time first, then higher priority, then key.
    #[default]
    FireTime,
    /// Key string only.
    Key,
}

impl FromStr for IndexOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire_time" => Ok(Self::FireTime),
            "key" => Ok(Self::Key),
            other => Err(format!("unknown index ordering `{other}`")),
        }
    }
}

/// Configuration for a [`RamJobStore`](crate::infra::store::RamJobStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Instance name attached to log events.
    pub name: String,
    /// Ordering of the ready-trigger index.
    #[serde(default)]
    pub index_ordering: IndexOrdering,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "ram-job-store".to_string(),
            index_ordering: IndexOrdering::default(),
        }
    }
}

impl StoreConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        Ok(())
    }

    /// Parse store configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading `.env` first
    /// when present. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on an unknown index ordering or an invalid result.
    pub fn from_env() -> AppResult<Self> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Fails on an unknown index ordering or an invalid result.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(name) = lookup(ENV_STORE_NAME) {
            cfg.name = name;
        }
        if let Some(ordering) = lookup(ENV_INDEX_ORDERING) {
            cfg.index_ordering = ordering.parse().map_err(anyhow::Error::msg)?;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}
