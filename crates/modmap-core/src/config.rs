use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::category::{CategoryStyle, CategoryTable};
use crate::error::ModmapError;

/// Directory holding per-project modmap state.
pub const PROJECT_DIR: &str = ".modmap";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    /// Per-category style overrides layered on the built-in table.
    #[serde(default)]
    pub categories: HashMap<String, CategoryStyle>,
}

impl ProjectConfig {
    /// Built-in category table with this config's overrides applied.
    #[must_use]
    pub fn category_table(&self) -> CategoryTable {
        CategoryTable::builtin().with_overrides(&self.categories)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Maximum random vertical offset added inside a category band.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Seed for the jitter RNG; identical seeds give identical layouts.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_symbol_scale")]
    pub symbol_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            jitter: default_jitter(),
            seed: 0,
            symbol_scale: default_symbol_scale(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Language code to load at startup (e.g. `zh-HANS`); none keeps raw ids.
    #[serde(default)]
    pub language: Option<String>,
    /// Directory or `http(s)://` base URL holding `<language>.json` files.
    #[serde(default = "default_translation_source")]
    pub source: String,
    #[serde(default = "default_translation_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            language: None,
            source: default_translation_source(),
            timeout_ms: default_translation_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Top-level namespaces dropped from the data on load.
    #[serde(default)]
    pub ignore_namespaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Config after merging project, user and command-line sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub language: Option<String>,
}

impl EffectiveConfig {
    /// Resolve the effective language: `cli_lang` > project > user.
    #[must_use]
    pub fn resolve(project: ProjectConfig, user: UserConfig, cli_lang: Option<&str>) -> Self {
        let language = cli_lang
            .map(str::to_string)
            .or_else(|| project.translation.language.clone())
            .or_else(|| user.language.clone());
        Self {
            project,
            user,
            language,
        }
    }
}

/// Walk up from `start` looking for `.modmap/config.toml`.
#[must_use]
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(PROJECT_DIR).join("config.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Parse a project config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or
/// [`ModmapError::ConfigParse`] if it is not valid config TOML.
pub fn load_project_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content).map_err(|err| {
        ModmapError::ConfigParse {
            path: path.to_path_buf(),
            reason: err.message().to_string(),
        }
        .into()
    })
}

/// Load the project config: an explicit path, else the nearest
/// `.modmap/config.toml` above `project_root`, else defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    if let Some(path) = explicit {
        return load_project_config_file(path);
    }
    match find_project_config(project_root) {
        Some(path) => load_project_config_file(&path),
        None => Ok(ProjectConfig::default()),
    }
}

/// Load `<config_dir>/modmap/config.toml`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    if let Ok(path) = env::var("MODMAP_USER_CONFIG") {
        return load_user_config_file(Path::new(&path));
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("modmap/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }
    load_user_config_file(&path)
}

fn load_user_config_file(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content).map_err(|err| {
        ModmapError::ConfigParse {
            path: path.to_path_buf(),
            reason: err.message().to_string(),
        }
        .into()
    })
}

/// Load and merge every config source.
///
/// # Errors
///
/// Propagates read or parse failures from either config file.
pub fn resolve_config(
    project_root: &Path,
    explicit: Option<&Path>,
    cli_lang: Option<&str>,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root, explicit)?;
    let user = load_user_config()?;
    Ok(EffectiveConfig::resolve(project, user, cli_lang))
}

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    600.0
}

const fn default_jitter() -> f64 {
    10.0
}

const fn default_symbol_scale() -> f64 {
    1.0
}

const fn default_search_limit() -> usize {
    10
}

fn default_translation_source() -> String {
    "lan".to_string()
}

const fn default_translation_timeout_ms() -> u64 {
    5_000
}
