//! Configuration file management.

use std::path::PathBuf;

use nook_service::ServiceOptions;
use serde::{Deserialize, Serialize};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "NOOK_DATA_DIR";

/// Complete daemon configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub advanced: AdvancedConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory. Empty = platform default.
    #[serde(default)]
    pub data_dir: String,
    /// How long a writer waits for the database lock.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u32,
}

/// Note content settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Characters per stored chunk. Must be at least 1.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    #[serde(default = "default_tab_name")]
    pub default_tab_name: String,
    #[serde(default = "default_untitled")]
    pub untitled_title: String,
    #[serde(default = "default_scratch")]
    pub scratch_title: String,
}

/// Event broadcast settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events buffered per subscriber before the oldest are dropped.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Advanced configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedConfig {
    /// Log level: "trace" | "debug" | "info" | "warn" | "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions

fn default_busy_timeout() -> u32 {
    nook_db::DEFAULT_BUSY_TIMEOUT_MS
}

fn default_chunk_size() -> usize {
    ServiceOptions::default().chunk_size
}

fn default_preview_limit() -> usize {
    ServiceOptions::default().preview_limit
}

fn default_tab_name() -> String {
    ServiceOptions::default().default_tab_name
}

fn default_untitled() -> String {
    ServiceOptions::default().untitled_title
}

fn default_scratch() -> String {
    ServiceOptions::default().scratch_title
}

fn default_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            preview_limit: default_preview_limit(),
            default_tab_name: default_tab_name(),
            untitled_title: default_untitled(),
            scratch_title: default_scratch(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: DaemonConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.notes.chunk_size == 0 {
            anyhow::bail!("notes.chunk_size must be at least 1");
        }
        if self.events.capacity == 0 {
            anyhow::bail!("events.capacity must be at least 1");
        }
        Ok(())
    }

    /// Options for the notes service.
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            chunk_size: self.notes.chunk_size,
            preview_limit: self.notes.preview_limit,
            default_tab_name: self.notes.default_tab_name.clone(),
            untitled_title: self.notes.untitled_title.clone(),
            scratch_title: self.notes.scratch_title.clone(),
        }
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        if self.storage.data_dir.is_empty() {
            Self::default_data_dir()
        } else {
            PathBuf::from(&self.storage.data_dir)
        }
    }

    /// Get the config file path.
    fn config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }

    /// Platform-specific default data directory.
    fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        #[cfg(target_os = "macos")]
        {
            dirs_fallback("Library/Application Support/Nook")
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs_fallback(".nook")
        }
    }
}

/// Fallback home directory resolution.
fn dirs_fallback(subpath: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(subpath))
        .unwrap_or_else(|_| PathBuf::from("/tmp/nook"))
}
