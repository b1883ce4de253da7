//! Config files in YAML, TOML or JSON, picked by extension

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format for `path`: `.yaml`/`.yml`, `.toml` or `.json`, any case.
    pub fn of(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    fn parse<T: DeserializeOwned>(&self, text: &str) -> std::result::Result<T, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn render<T: Serialize>(&self, value: &T) -> std::result::Result<String, String> {
        match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads and writes typed configs; the file extension picks the format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::of(path)?;
        let text = io::read_text(path)?;
        tracing::debug!(%path, %format, bytes = text.len(), "Parsing config file");

        format.parse(&text).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: format.name().to_string(),
            message,
        })
    }

    /// Serialize `value` and replace `path` atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = ConfigFormat::of(path)?;
        let text = format.render(value).map_err(|message| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.name().to_string(),
            message,
        })?;
        tracing::debug!(%path, %format, "Writing config file");

        io::write_atomic(path, text.as_bytes())
    }
}
