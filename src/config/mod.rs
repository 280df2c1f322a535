use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_breath_pattern")]
    pub breath_pattern: String,
    #[serde(default = "default_breath_seconds")]
    pub breath_seconds: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_support_threshold")]
    pub support_threshold: i64,
}

fn default_data_dir() -> String {
    Config::default_data_dir().to_string_lossy().to_string()
}
fn default_breath_pattern() -> String {
    "inhale:4,exhale:6".to_string()
}
fn default_breath_seconds() -> u32 {
    90
}
fn default_history_limit() -> usize {
    50
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_support_threshold() -> i64 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            breath_pattern: default_breath_pattern(),
            breath_seconds: default_breath_seconds(),
            history_limit: default_history_limit(),
            separator_char: default_separator_char(),
            support_threshold: default_support_threshold(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcalmlog")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rcalmlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcalmlog.conf")
    }

    /// Default directory of the CSV stores
    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    /// Load configuration from file, or return defaults if not found.
    /// A config that cannot be read or parsed also falls back to defaults.
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Initialize configuration file and data directory.
    /// In test mode the config file is left alone.
    pub fn init_all(custom_data_dir: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let data_dir = match custom_data_dir {
            Some(d) => {
                let p = expand_tilde(&d);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::default_data_dir(),
        };

        let config = Config {
            data_dir: data_dir.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(&data_dir).map_err(|e| {
            AppError::Config(format!(
                "cannot create data directory {}: {e}",
                data_dir.display()
            ))
        })?;

        println!("✅ Data dir:    {:?}", data_dir);

        Ok(config)
    }

    /// Fields of the YAML file that are not set (and fall back to defaults).
    pub fn missing_fields(path: &Path) -> io::Result<Vec<&'static str>> {
        let content = fs::read_to_string(path)?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(io::Error::other)?;

        let keys = [
            "data_dir",
            "breath_pattern",
            "breath_seconds",
            "history_limit",
            "separator_char",
            "support_threshold",
        ];

        let map = yaml.as_mapping();
        Ok(keys
            .into_iter()
            .filter(|k| {
                map.map(|m| !m.contains_key(serde_yaml::Value::String(k.to_string())))
                    .unwrap_or(true)
            })
            .collect())
    }
}
