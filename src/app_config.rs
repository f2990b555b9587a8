use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Which files count as documents
    #[serde(default)]
    pub input: InputConfig,

    /// How segment files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Segment cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Maximum number of documents segmented at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Maximum segment length in bytes
    #[serde(default = "default_max_segment_len")]
    pub max_segment_len: usize,

    /// Passages carrying any of these tags are not segmented
    #[serde(default = "default_skip_tags")]
    pub skip_tags: Vec<String>,

    /// Skip passages whose body is only whitespace
    #[serde(default = "default_true")]
    pub skip_blank_passages: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_segment_len: default_max_segment_len(),
            skip_tags: default_skip_tags(),
            skip_blank_passages: true,
        }
    }
}

/// Input discovery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    // @field: Document file extensions, without dots
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Pretty-print JSON
    #[serde(default = "default_true")]
    pub pretty: bool,

    // @field: Extension of written segment files
    #[serde(default = "default_output_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            extension: default_output_extension(),
        }
    }
}

/// Segment cache settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CacheConfig {
    /// Whether previous results are reused
    #[serde(default)]
    pub enabled: bool,

    /// Cache file; defaults to the user cache directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolved cache file location, if caching is enabled and a location exists
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        self.path.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("tweeseg").join("segments.json"))
        })
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_segment_len() -> usize {
    crate::segmentation::DEFAULT_SEGMENT_LIMIT
}

fn default_skip_tags() -> Vec<String> {
    vec!["script".to_string(), "stylesheet".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["twee".to_string(), "tw".to_string()]
}

fn default_output_extension() -> String {
    "json".to_string()
}

fn default_concurrent_files() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.segmentation.max_segment_len == 0 {
            return Err(anyhow!("segmentation.max_segment_len must be greater than zero"));
        }

        if self.input.extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(anyhow!("input.extensions must name at least one extension"));
        }

        if self.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be greater than zero"));
        }

        if self.output.extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("output.extension must not be empty"));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load the configuration at `path`, or write and return the default
    /// configuration if there is none yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &config_json)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: SegmentationConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            cache: CacheConfig::default(),
            concurrent_files: default_concurrent_files(),
            log_level: LogLevel::default(),
        }
    }
}
