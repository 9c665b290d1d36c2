use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::hooks::HookName;
use crate::nominatim::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::states::StateAbbreviations;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub states: StatesConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
    /// Event name -> hooks run for it, in order
    pub hooks: Option<HashMap<String, Vec<HookName>>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StatesConfig {
    /// Extra `name,abbr` rows on top of the built-in United States table
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Number of diagnostic entries kept in memory
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Built-in state table extended with the configured file, if any.
    pub fn state_abbreviations(&self) -> Result<StateAbbreviations> {
        let mut table = StateAbbreviations::builtin();
        if let Some(file) = &self.states.file {
            table.load_csv(file)?;
        }
        Ok(table)
    }
}
