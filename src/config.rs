//! Configuration
//!
//! Resolved per key: environment > `config.yml` > default. Alfred exports
//! workflow variables as plain environment variables (`url`, `ttl`, ...); the
//! `WSAW_*` spellings are accepted for runs outside the launcher.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WsawError};
use crate::tools::fetch::parse_http_url;

pub const DEFAULT_TTL_HOURS: u64 = 12;
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// How staleness of the cached category set is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Re-scrape once the cache entry is older than the TTL.
    #[default]
    Ttl,
    /// Re-scrape when the page body hash changes.
    #[serde(alias = "content-hash")]
    Hash,
}

impl CacheMode {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ttl" => Ok(CacheMode::Ttl),
            "hash" | "content-hash" => Ok(CacheMode::Hash),
            other => Err(WsawError::Config(format!(
                "cache_mode must be `ttl` or `hash`, got `{other}`"
            ))),
        }
    }
}

/// Shape of `config.yml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    /// Cache TTL in hours.
    pub ttl: Option<u64>,
    pub cache_mode: Option<CacheMode>,
    pub sequential: Option<bool>,
    pub prune_icons: Option<bool>,
}

/// Load `config.yml`. A missing file is an empty config.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| WsawError::Config(format!("failed to read {}: {e}", path.display())))?;
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&content)
        .map_err(|e| WsawError::Config(format!("failed to parse {}: {e}", path.display())))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The directory page to scrape.
    pub source_url: Url,
    pub ttl: Duration,
    pub cache_mode: CacheMode,
    /// Store icons one site at a time instead of fanning out.
    pub sequential: bool,
    /// Delete icons of sites that left the page after a refresh.
    pub prune_icons: bool,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve from the process environment and `config.yml` in the working
    /// directory (the workflow folder when run by Alfred).
    pub fn load() -> Result<Self> {
        let file = load_config_file(Path::new(CONFIG_FILE_NAME))?;
        Self::from_sources(&file, |key| env::var(key).ok())
    }

    /// Resolve from an explicit file and environment lookup.
    pub fn from_sources<E>(file: &ConfigFile, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let lookup = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&n| env(n))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let raw_url = lookup(&["url", "WSAW_URL"])
            .or_else(|| file.url.clone())
            .ok_or_else(|| WsawError::Config("no source url configured (set `url`)".into()))?;
        let source_url = parse_http_url(&raw_url)?;

        let ttl_hours = match lookup(&["ttl", "WSAW_TTL"]) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| WsawError::Config(format!("ttl must be whole hours, got `{raw}`")))?,
            None => file.ttl.unwrap_or(DEFAULT_TTL_HOURS),
        };
        let ttl = ttl_hours
            .checked_mul(3600)
            .map(Duration::from_secs)
            .ok_or_else(|| WsawError::Config(format!("ttl of {ttl_hours} hours is too large")))?;

        let cache_mode = match lookup(&["cache_mode", "WSAW_CACHE_MODE"]) {
            Some(raw) => CacheMode::parse(&raw)?,
            None => file.cache_mode.unwrap_or_default(),
        };

        let sequential = match lookup(&["sequential", "WSAW_SEQUENTIAL"]) {
            Some(raw) => parse_flag("sequential", &raw)?,
            None => file.sequential.unwrap_or(false),
        };

        let prune_icons = match lookup(&["prune_icons", "WSAW_PRUNE_ICONS"]) {
            Some(raw) => parse_flag("prune_icons", &raw)?,
            None => file.prune_icons.unwrap_or(false),
        };

        let project = ProjectDirs::from("io", "wsaw", "wsaw");
        let cache_dir = match lookup(&["alfred_workflow_cache", "WSAW_CACHE_DIR"]) {
            Some(dir) => PathBuf::from(dir),
            None => project
                .as_ref()
                .map(|p| p.cache_dir().to_path_buf())
                .ok_or_else(|| WsawError::Config("could not resolve cache dir".into()))?,
        };
        let data_dir = match lookup(&["alfred_workflow_data", "WSAW_DATA_DIR"]) {
            Some(dir) => PathBuf::from(dir),
            None => project
                .as_ref()
                .map(|p| p.data_local_dir().to_path_buf())
                .ok_or_else(|| WsawError::Config("could not resolve data dir".into()))?,
        };

        Ok(Self {
            source_url,
            ttl,
            cache_mode,
            sequential,
            prune_icons,
            cache_dir,
            data_dir,
        })
    }

    /// Defaults for `source_url`, storing everything under `root`.
    pub fn with_root(source_url: &str, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        Ok(Self {
            source_url: parse_http_url(source_url)?,
            ttl: Duration::from_secs(DEFAULT_TTL_HOURS * 3600),
            cache_mode: CacheMode::default(),
            sequential: false,
            prune_icons: false,
            cache_dir: root.join("cache"),
            data_dir: root.join("data"),
        })
    }

    pub fn icon_dir(&self) -> PathBuf {
        self.data_dir.join("icons")
    }

    pub fn source_host(&self) -> Option<&str> {
        self.source_url.host_str()
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WsawError::Config(format!("{key} must be a boolean, got `{other}`"))),
    }
}
