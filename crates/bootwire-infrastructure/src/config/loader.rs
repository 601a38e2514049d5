//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! explicit properties and default values.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use bootwire_domain::Properties;
use bootwire_domain::error::Result;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde_json::Value;

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Explicit `key = value` overrides, applied last
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            overrides: Vec::new(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Add an explicit property; dotted keys nest
    pub fn with_property<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Add several explicit properties
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `BOOTWIRE__SCANNING`)
    /// 4. Explicit properties
    pub fn load(&self) -> Result<AppConfig> {
        let figment = self.figment();

        let mut app_config: AppConfig = figment.extract().with_config_context(|| match self.active_file() {
            Some(path) => format!("Failed to extract configuration from {}", path.display()),
            None => "Failed to extract configuration".to_string(),
        })?;
        let tree: Value = figment
            .extract()
            .config_context("Failed to read configuration tree")?;
        app_config.properties = flatten(&tree);

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Merged figment, before extraction
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        for (key, value) in &self.overrides {
            figment = figment.merge(Serialized::default(key, value));
        }
        figment
    }

    /// File that [`figment`](Self::figment) reads, if any
    fn active_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => path.exists().then(|| path.clone()),
            None => Self::find_default_config_path(),
        }
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    Ok(())
}

/// Flatten a configuration tree into dotted `key = value` pairs
///
/// Tables nest with `.`, arrays with their index. Strings are kept verbatim,
/// other scalars use their JSON text; nulls are dropped.
fn flatten(tree: &Value) -> Properties {
    let mut out = BTreeMap::new();
    flatten_into(&mut out, String::new(), tree);
    Properties::from(out)
}

fn flatten_into(out: &mut BTreeMap<String, String>, prefix: String, value: &Value) {
    let child = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(out, child(key), value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_into(out, child(&index.to_string()), value);
            }
        }
        Value::Null => {}
        Value::String(text) => {
            out.insert(prefix, text.clone());
        }
        scalar => {
            out.insert(prefix, scalar.to_string());
        }
    }
}
