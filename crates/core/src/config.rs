use crate::catalog::LanguageCatalog;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_WINDOW_TITLE: &str = "Translation Tool";
pub const ENV_CONFIG_PATH: &str = "QUICK_TRANSLATE_CONFIG";
pub const ENV_DEEPL_API_KEY: &str = "DEEPL_API_KEY";

/// Provider-specific language code, e.g. `es` or `pt-BR`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct LanguageCode(pub(crate) String);

impl LanguageCode {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyLanguageCode(v));
        }
        Ok(Self(v))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(v))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(**redacted**)")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiColors {
    pub success: String,
    pub error: String,
    pub prompt: String,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            success: "green".to_owned(),
            error: "red".to_owned(),
            prompt: "cyan".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiSettings {
    pub title: String,
    pub colors: UiColors,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_owned(),
            colors: UiColors::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: LanguageCatalog,
    pub ui: UiSettings,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("language code must not be empty (got {0:?})")]
    EmptyLanguageCode(String),
    #[error("api key must not be empty")]
    EmptyApiKey,
}

/// On-disk shape of the configuration document.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    languages: Option<LanguageEntries>,
    #[serde(default)]
    ui: UiSettings,
}

/// `languages` object kept in document order.
struct LanguageEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for LanguageEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = LanguageEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of display name to language code")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, code)) = map.next_entry::<String, String>()? {
                    entries.push((name, code));
                }
                Ok(LanguageEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parses a configuration document held in memory.
pub fn parse_config(document: &str) -> Result<AppConfig, ConfigError> {
    let raw: RawConfig = serde_json::from_str(document)?;
    let catalog = match raw.languages {
        Some(LanguageEntries(entries)) => LanguageCatalog::from_entries(entries)?,
        None => {
            tracing::debug!("config has no languages section, using defaults");
            LanguageCatalog::default()
        }
    };
    Ok(AppConfig {
        catalog,
        ui: raw.ui,
    })
}

/// Loads the configuration at `path`.
///
/// A missing file yields the built-in defaults. A file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let document = match fs::read_to_string(path) {
        Ok(document) => document,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let cfg = parse_config(&document)?;
    tracing::debug!(
        path = %path.display(),
        languages = cfg.catalog.len(),
        "config loaded"
    );
    Ok(cfg)
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_api_key(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Result<Option<ApiKey>, ConfigError> {
    match cli_value {
        Some(v) => Ok(Some(ApiKey::new(v)?)),
        None => match env.var(env_key) {
            Some(v) => Ok(Some(ApiKey::new(v)?)),
            None => Ok(None),
        },
    }
}

pub fn resolve_config_path(cli_value: Option<PathBuf>, env: &impl Env) -> PathBuf {
    match cli_value {
        Some(p) => p,
        None => env
            .var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
    }
}
