//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeprint/treeprint.toml`
//! 3. Local config: `<dir>/.treeprint.toml` (usually the working directory)
//! 4. Environment variables: `TREEPRINT_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Glyphs, TreeMode, DEFAULT_MAX_DEPTH};

/// Glyph set selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphStyle {
    #[default]
    Unicode,
    Ascii,
}

impl GlyphStyle {
    pub fn glyphs(self) -> Glyphs {
        match self {
            GlyphStyle::Unicode => Glyphs::UNICODE,
            GlyphStyle::Ascii => Glyphs::ASCII,
        }
    }
}

impl FromStr for GlyphStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unicode" => Ok(GlyphStyle::Unicode),
            "ascii" => Ok(GlyphStyle::Ascii),
            other => Err(format!("unknown glyph style: {other}")),
        }
    }
}

impl fmt::Display for GlyphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphStyle::Unicode => f.write_str("unicode"),
            GlyphStyle::Ascii => f.write_str("ascii"),
        }
    }
}

/// Unified configuration for treeprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Glyph set used for rendering
    pub style: GlyphStyle,
    /// Name-only or value-annotated record trees
    pub mode: TreeMode,
    /// Nesting limit for records and directory walks
    pub max_depth: usize,
    /// Include dotfiles in directory trees
    pub show_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: GlyphStyle::default(),
            mode: TreeMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            show_hidden: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub style: Option<GlyphStyle>,
    pub mode: Option<TreeMode>,
    pub max_depth: Option<usize>,
    pub show_hidden: Option<bool>,
}

/// Get the XDG config directory for treeprint.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeprint").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeprint.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treeprint.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e.message()),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            style: overlay.style.unwrap_or(self.style),
            mode: overlay.mode.unwrap_or(self.mode),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            show_hidden: overlay.show_hidden.unwrap_or(self.show_hidden),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.treeprint.toml`
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        let global = global_config_path();
        let local = local_dir.map(local_config_path);
        let settings = Self::load_from(global.as_deref(), local.as_deref())?;
        Self::apply_env_overrides(settings)
    }

    /// Load defaults plus the given config files, skipping files that do not
    /// exist. Environment variables are not consulted.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();
        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                debug!("loading config: {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }
        Ok(current)
    }

    /// Apply TREEPRINT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEPRINT"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("style") {
            settings.style = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("mode") {
            settings.mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("invalid max_depth: {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("show_hidden") {
            settings.show_hidden = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
