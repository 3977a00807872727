use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Terminal colors a tag marker can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
}

/// Styling of one tag kind's markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSpec {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorName>,
    pub bold: bool,
    pub underline: bool,
}

impl ColorSpec {
    fn colored(color: ColorName) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            color: None,
            bold: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub title: ColorSpec,
    pub section: ColorSpec,
    pub list: ColorSpec,
    pub plain: ColorSpec,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            title: ColorSpec {
                bold: true,
                ..ColorSpec::colored(ColorName::Red)
            },
            section: ColorSpec::colored(ColorName::Yellow),
            list: ColorSpec {
                underline: true,
                ..ColorSpec::colored(ColorName::Green)
            },
            plain: ColorSpec {
                enabled: false,
                ..ColorSpec::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the `clean/` and `parsed/` trees written by folder runs.
    pub output_dir: PathBuf,
    /// File name patterns picked up by folder runs.
    pub include: Vec<String>,
    pub enable_colors: bool,
    pub colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("file_parser_output"),
            include: vec![
                "*.txt".to_string(),
                "*.html".to_string(),
                "*.docx".to_string(),
            ],
            enable_colors: false,
            colors: Colors::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the output directory
        config.output_dir = Self::expand_path(&config.output_dir).unwrap_or(config.output_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/contract-tagger");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
