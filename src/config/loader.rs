//! Configuration file loading with precedence handling.

use crate::model::Route;
use crate::view_state::PxScale;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PROS_SITE_CONFIG";

/// Environment variable overriding the start page.
pub const PAGE_ENV: &str = "PROS_SITE_PAGE";

/// Environment variable overriding the pixel width of one terminal column.
pub const PX_PER_COLUMN_ENV: &str = "PROS_SITE_PX_PER_COLUMN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pros-site/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Logical pixels per terminal column.
    #[serde(default)]
    pub px_per_column: Option<u32>,

    /// Logical pixels per terminal row.
    #[serde(default)]
    pub px_per_row: Option<u32>,

    /// Distance of one line scroll, in logical pixels.
    #[serde(default)]
    pub scroll_step_px: Option<u32>,

    /// Scroll-spy offset below the viewport top.
    #[serde(default)]
    pub spy_offset_px: Option<u32>,

    /// Path of the page shown at startup (e.g. "/services").
    #[serde(default)]
    pub start_page: Option<String>,

    /// Whether regions animate in. `false` reveals everything statically.
    #[serde(default)]
    pub animations: Option<bool>,

    /// Content TOML replacing the built-in catalogue.
    #[serde(default)]
    pub content_path: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Fully resolved configuration after applying all precedence layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Logical pixels per terminal column.
    pub px_per_column: u32,
    /// Logical pixels per terminal row.
    pub px_per_row: u32,
    /// Distance of one line scroll.
    pub scroll_step_px: u32,
    /// Scroll-spy reading line below the viewport top.
    pub spy_offset_px: u32,
    /// Page shown at startup.
    pub start_page: Route,
    /// Whether regions animate in. Off means every region starts revealed.
    pub animations: bool,
    /// Content override file, if any.
    pub content_path: Option<PathBuf>,
    /// Where logs are written.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Default distance of one line scroll.
    pub const DEFAULT_SCROLL_STEP_PX: u32 = 48;

    /// Cell-to-pixel scale for the terminal host.
    ///
    /// Zero factors never survive merging, but a hand-built config could
    /// still carry one; it falls back to the default scale.
    pub fn scale(&self) -> PxScale {
        PxScale::new(self.px_per_column, self.px_per_row).unwrap_or_else(|err| {
            warn!(%err, "Invalid pixel scale, using default");
            PxScale::default()
        })
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            px_per_column: PxScale::DEFAULT_PX_PER_COLUMN,
            px_per_row: PxScale::DEFAULT_PX_PER_ROW,
            scroll_step_px: Self::DEFAULT_SCROLL_STEP_PX,
            spy_offset_px: crate::engine::DEFAULT_SPY_OFFSET_PX,
            start_page: Route::Home,
            animations: true,
            content_path: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pros-site/pros-site.log` on Unix-like systems,
/// or the platform equivalent elsewhere. Falls back to the current directory
/// when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pros-site").join("pros-site.log")
    } else {
        PathBuf::from("pros-site.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pros-site/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pros-site").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PROS_SITE_CONFIG` environment variable
/// 3. Default path `~/.config/pros-site/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
/// An empty `PROS_SITE_CONFIG` is an invalid path.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is set but empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// Zero scale factors and unknown start pages are ignored with a warning.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        px_per_column: nonzero("px_per_column", config.px_per_column)
            .unwrap_or(defaults.px_per_column),
        px_per_row: nonzero("px_per_row", config.px_per_row).unwrap_or(defaults.px_per_row),
        scroll_step_px: nonzero("scroll_step_px", config.scroll_step_px)
            .unwrap_or(defaults.scroll_step_px),
        spy_offset_px: config.spy_offset_px.unwrap_or(defaults.spy_offset_px),
        start_page: config
            .start_page
            .as_deref()
            .and_then(|path| known_page("start_page", path))
            .unwrap_or(defaults.start_page),
        animations: config.animations.unwrap_or(defaults.animations),
        content_path: config.content_path.or(defaults.content_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PROS_SITE_PAGE`: start page path
/// - `PROS_SITE_PX_PER_COLUMN`: column width in logical pixels
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(page) = std::env::var(PAGE_ENV) {
        if let Some(route) = known_page(PAGE_ENV, &page) {
            config.start_page = route;
        }
    }

    if let Ok(raw) = std::env::var(PX_PER_COLUMN_ENV) {
        match raw.trim().parse::<u32>() {
            Ok(px) if px > 0 => config.px_per_column = px,
            _ => warn!(value = %raw, var = PX_PER_COLUMN_ENV, "Ignoring invalid column width"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_override: Option<Route>,
    px_per_column_override: Option<u32>,
    content_override: Option<PathBuf>,
    no_animations: bool,
) -> ResolvedConfig {
    if let Some(page) = page_override {
        config.start_page = page;
    }

    if let Some(px) = nonzero("--px-per-column", px_per_column_override) {
        config.px_per_column = px;
    }

    if let Some(path) = content_override {
        config.content_path = Some(path);
    }

    if no_animations {
        config.animations = false;
    }

    config
}

fn nonzero(field: &str, value: Option<u32>) -> Option<u32> {
    match value {
        Some(0) => {
            warn!(field, "Ignoring zero value");
            None
        }
        other => other,
    }
}

fn known_page(field: &str, path: &str) -> Option<Route> {
    let route = Route::from_path(path);
    if route.is_none() {
        warn!(field, path, "Unknown start page, ignoring");
    }
    route
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_pros_site_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("pros-site.log"),
            "Default log path should end with 'pros-site.log', got: {:?}",
            path
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/site.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
