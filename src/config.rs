use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://api.siputzx.my.id/api/ai/gemini-pro";
pub const DEFAULT_ORIGIN: &str = "https://api.siputzx.my.id";
pub const DEFAULT_REFERER: &str = "https://api.siputzx.my.id/post/documentation/";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,id;q=0.8";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote language-model service
    pub remote: RemoteConfig,

    /// Reply post-processing
    pub normalizer: NormalizerConfig,

    /// UI preferences
    pub ui: UiConfig,

    /// Asisten home directory
    #[serde(skip)]
    pub asisten_home: PathBuf,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub origin: String,
    pub referer: String,
    pub accept_language: String,
    /// Unset means the request may take as long as the service does.
    pub request_timeout_secs: Option<u64>,
}

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub max_reply_chars: usize,
    pub casual_openers: bool,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_timestamps: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_reply_chars: 100,
            casual_openers: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

        Config {
            remote: RemoteConfig::default(),
            normalizer: NormalizerConfig::default(),
            ui: UiConfig::default(),
            asisten_home: home.join(".asisten"),
        }
    }
}

impl Config {
    /// Load configuration from `~/.asisten/config.toml`, falling back to defaults
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Self::load_from(&home.join(".asisten"))
    }

    /// Load configuration rooted at an explicit home directory
    pub fn load_from(asisten_home: &Path) -> Result<Self> {
        let config_path = asisten_home.join("config.toml");

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str::<Config>(&content)
                .context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.asisten_home = asisten_home.to_path_buf();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.asisten_home)
            .context("Failed to create .asisten directory")?;
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(self.config_path(), content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.asisten_home.join("config.toml")
    }

    /// Where the interactive chat writes its log
    pub fn log_path(&self) -> PathBuf {
        self.asisten_home.join("asisten.log")
    }
}
