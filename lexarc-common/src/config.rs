//! Configuration loading and session folder resolution
//!
//! Configuration is a single optional TOML file. A missing file is never
//! fatal: the caller gets compiled defaults and a warning. Every field of
//! [`TomlConfig`] is defaulted so partial files are accepted.
//!
//! # Session Folder Priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`LEXARC_SESSION_FOLDER`)
//! 3. TOML config file (`session_folder`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the session folder
pub const SESSION_FOLDER_ENV: &str = "LEXARC_SESSION_FOLDER";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Folder backing the durable session store (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_folder: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Redirect targets used after queue transitions
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Bulk upload limits
    #[serde(default)]
    pub upload: UploadLimits,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Paths the review screens redirect to
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoutesConfig {
    /// Page that reviews a single document (`?docId=` is appended)
    #[serde(default = "default_processing_path")]
    pub processing_path: String,

    /// Document listing shown once the queue is finished
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            processing_path: default_processing_path(),
            listing_path: default_listing_path(),
        }
    }
}

/// Limits applied when staging files for a bulk upload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadLimits {
    #[serde(default = "default_min_files")]
    pub min_files: usize,

    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum size of a single file in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Comma-separated list of accepted extensions (".pdf,.docx")
    #[serde(default = "default_accepted_types")]
    pub accepted_types: String,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            min_files: default_min_files(),
            max_files: default_max_files(),
            max_file_size: default_max_file_size(),
            accepted_types: default_accepted_types(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_processing_path() -> String {
    "/ai-processing".to_string()
}

fn default_listing_path() -> String {
    "/admin/documents".to_string()
}

fn default_min_files() -> usize {
    1
}

fn default_max_files() -> usize {
    5
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}

fn default_accepted_types() -> String {
    ".pdf,.doc,.docx,.txt,.jpg,.jpeg,.png".to_string()
}

/// Compiled defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub session_folder: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            session_folder: default_session_folder(),
            log_level: default_log_level(),
        }
    }
}

/// Get OS-dependent default session folder path
pub fn default_session_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/lexarc/session
        dirs::data_local_dir()
            .map(|d| d.join("lexarc").join("session"))
            .unwrap_or_else(|| PathBuf::from("/tmp/lexarc/session"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/lexarc/session
        dirs::data_dir()
            .map(|d| d.join("lexarc").join("session"))
            .unwrap_or_else(|| PathBuf::from("/tmp/lexarc/session"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\lexarc\session
        dirs::data_local_dir()
            .map(|d| d.join("lexarc").join("session"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\lexarc\\session"))
    } else {
        PathBuf::from("./lexarc_session")
    }
}

/// Default configuration file path for the platform
///
/// Returns `None` when the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lexarc").join("config.toml"))
}

/// Load and parse a TOML config file
///
/// Fails if the file cannot be read or does not parse.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse TOML {}: {}", path.display(), e)))?;

    info!("Loaded TOML configuration from {}", path.display());
    Ok(config)
}

/// Load configuration with graceful degradation
///
/// An explicit path must exist. Without one, the platform config file is
/// used if present; otherwise compiled defaults are returned with a warning.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::NotFound(format!("Config file {}", path.display())));
        }
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_toml_config(&path),
        Some(path) => {
            warn!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Write a TOML config atomically
///
/// Serializes to `<target>.tmp`, then renames over the target so readers
/// never observe a partially written file. On Unix the file is created 0600.
pub fn write_toml_config(config: &TomlConfig, target: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize TOML: {}", e)))?;

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    write_atomic(target, content.as_bytes())?;
    debug!("Wrote TOML configuration to {}", target.display());
    Ok(())
}

/// Write bytes to `target` via a sibling temp file and rename
pub(crate) fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_name = target.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Resolves the folder backing the durable session store
#[derive(Debug, Clone, Default)]
pub struct SessionFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_value: Option<PathBuf>,
}

impl SessionFolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command-line override (priority 1)
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Value from the TOML file (priority 3)
    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_value = config.session_folder.clone();
        self
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            debug!("Session folder from command line: {}", path.display());
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(SESSION_FOLDER_ENV) {
            if !path.trim().is_empty() {
                debug!("Session folder from {}: {}", SESSION_FOLDER_ENV, path);
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &self.toml_value {
            debug!("Session folder from TOML: {}", path.display());
            return path.clone();
        }

        // Priority 4: OS-dependent compiled default
        default_session_folder()
    }
}
