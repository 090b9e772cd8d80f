use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::record::Category;
use crate::error::{Result, SiftError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("JOBSIFT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a complete config document, filling unset values with defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| SiftError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| SiftError::Config(format!("serialize config: {err}")))
    }

    /// Record table location, resolved against `root` when relative.
    #[must_use]
    pub fn data_path(&self, root: &Path) -> PathBuf {
        if self.data.path.is_absolute() {
            self.data.path.clone()
        } else {
            root.join(&self.data.path)
        }
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| SiftError::MissingConfig("config directory not found".to_string()))?
            .join("jobsift/config.toml");
        Self::load_patch(&path)
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SiftError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SiftError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.fetch {
            self.fetch.merge(patch);
        }
        if let Some(patch) = patch.composer {
            self.composer.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("JOBSIFT_DATA_PATH") {
            self.data.path = PathBuf::from(value);
        }

        if let Some(value) = env_usize("JOBSIFT_SEARCH_APPROX_LIMIT")? {
            self.search.approx_limit = value;
        }
        if let Some(value) = env_usize("JOBSIFT_SEARCH_FINAL_LIMIT")? {
            self.search.final_limit = value;
        }
        if let Some(value) = env_bool("JOBSIFT_SEARCH_NORMALIZE_TEXT") {
            self.search.normalize_text = value;
        }

        if let Some(value) = env_u64("JOBSIFT_FETCH_TIMEOUT_SECONDS")? {
            self.fetch.timeout_secs = value;
        }
        if let Some(value) = env_u64("JOBSIFT_FETCH_DELAY_MS")? {
            self.fetch.delay_ms = value;
        }
        if let Some(value) = env_string("JOBSIFT_FETCH_USER_AGENT") {
            self.fetch.user_agent = value;
        }

        if let Some(value) = env_bool("JOBSIFT_COMPOSER_ENABLED") {
            self.composer.enabled = value;
        }
        if let Some(value) = env_string("JOBSIFT_COMPOSER_ENDPOINT") {
            self.composer.endpoint = value;
        }
        if let Some(value) = env_string("JOBSIFT_COMPOSER_MODEL") {
            self.composer.model = value;
        }
        if let Some(value) = env_string("JOBSIFT_COMPOSER_API_KEY_ENV") {
            self.composer.api_key_env = value;
        }
        if let Some(value) = env_f32("JOBSIFT_COMPOSER_TEMPERATURE")? {
            self.composer.temperature = value;
        }
        if let Some(value) = env_u32("JOBSIFT_COMPOSER_MAX_TOKENS")? {
            self.composer.max_tokens = value;
        }
        if let Some(value) = env_u64("JOBSIFT_COMPOSER_TIMEOUT_SECONDS")? {
            self.composer.timeout_secs = value;
        }
        if let Some(value) = env_u32("JOBSIFT_COMPOSER_MAX_RETRIES")? {
            self.composer.max_retries = value;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.search.final_limit == 0 {
            return Err(SiftError::Config(
                "search.final_limit must be at least 1".to_string(),
            ));
        }
        if self.search.approx_limit < self.search.final_limit {
            return Err(SiftError::Config(format!(
                "search.approx_limit ({}) must not be smaller than search.final_limit ({})",
                self.search.approx_limit, self.search.final_limit
            )));
        }
        if !(0.0..=2.0).contains(&self.composer.temperature) {
            return Err(SiftError::Config(format!(
                "composer.temperature {} out of range 0.0..=2.0",
                self.composer.temperature
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("jobs.csv"),
        }
    }
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Width of the approximate ranking stage.
    #[serde(default)]
    pub approx_limit: usize,
    /// Records handed to the composer.
    #[serde(default)]
    pub final_limit: usize,
    /// Lowercase and strip punctuation before fuzzy scoring.
    #[serde(default)]
    pub normalize_text: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            approx_limit: 20,
            final_limit: 5,
            normalize_text: false,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.approx_limit {
            self.approx_limit = value;
        }
        if let Some(value) = patch.final_limit {
            self.final_limit = value;
        }
        if let Some(value) = patch.normalize_text {
            self.normalize_text = value;
        }
    }
}

/// One category listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub category: Category,
    pub url: String,
}

impl SourceConfig {
    fn new(category: Category, url: &str) -> Self {
        Self {
            category,
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub timeout_secs: u64,
    /// Pause between category pages.
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub accept_language: String,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            delay_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            sources: vec![
                SourceConfig::new(
                    Category::Engineering,
                    "https://jobyaari.com/category/engineering?type=graduate",
                ),
                SourceConfig::new(
                    Category::Science,
                    "https://jobyaari.com/category/science?type=graduate",
                ),
                SourceConfig::new(
                    Category::Commerce,
                    "https://jobyaari.com/category/commerce?type=graduate",
                ),
                SourceConfig::new(
                    Category::Education,
                    "https://jobyaari.com/category/education?type=graduate",
                ),
            ],
        }
    }
}

impl FetchConfig {
    fn merge(&mut self, patch: FetchPatch) {
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
        if let Some(value) = patch.delay_ms {
            self.delay_ms = value;
        }
        if let Some(value) = patch.user_agent {
            self.user_agent = value;
        }
        if let Some(value) = patch.accept_language {
            self.accept_language = value;
        }
        if let Some(values) = patch.sources {
            self.sources = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub enabled: bool,
    /// OpenAI-compatible chat completions endpoint.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: u32,
    #[serde(default)]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: 0.4,
            max_tokens: 400,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl ComposerConfig {
    fn merge(&mut self, patch: ComposerPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
        if let Some(value) = patch.model {
            self.model = value;
        }
        if let Some(value) = patch.api_key_env {
            self.api_key_env = value;
        }
        if let Some(value) = patch.temperature {
            self.temperature = value;
        }
        if let Some(value) = patch.max_tokens {
            self.max_tokens = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
        if let Some(value) = patch.max_retries {
            self.max_retries = value;
        }
    }

    /// API key read from the configured environment variable, if set.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        env_string(&self.api_key_env).filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub search: Option<SearchPatch>,
    pub fetch: Option<FetchPatch>,
    pub composer: Option<ComposerPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub approx_limit: Option<usize>,
    pub final_limit: Option<usize>,
    pub normalize_text: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FetchPatch {
    pub timeout_secs: Option<u64>,
    pub delay_ms: Option<u64>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub sources: Option<Vec<SourceConfig>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ComposerPatch {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| SiftError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    env_parse(key)
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    env_parse(key)
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_parse(key)
}

fn env_f32(key: &str) -> Result<Option<f32>> {
    env_parse(key)
}
