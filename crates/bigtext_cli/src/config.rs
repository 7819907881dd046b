//! `bigtext.toml` handling.

use std::path::{Path, PathBuf};

use bigtext::{BigTextError, ExtractionOptions};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "bigtext.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub font: FontConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Sprite sheet image.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    pub pixel_on_threshold: u8,
    pub width_marker_threshold: u8,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let options = ExtractionOptions::default();
        Self {
            pixel_on_threshold: options.pixel_on_threshold,
            width_marker_threshold: options.width_marker_threshold,
        }
    }
}

impl From<&ExtractionConfig> for ExtractionOptions {
    fn from(config: &ExtractionConfig) -> Self {
        ExtractionOptions {
            pixel_on_threshold: config.pixel_on_threshold,
            width_marker_threshold: config.width_marker_threshold,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("invalid [extraction] settings in config file '{}': {source}", path.display())]
    Invalid { path: PathBuf, source: BigTextError },
}

impl Config {
    /// Load `path`, or `bigtext.toml` in the working directory.
    ///
    /// A missing default file yields the default config; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            log::debug!("no {} found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
        let config = Self::parse(&content)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        config.extraction_options().map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(config)
    }

    /// Threshold settings, rejected when the dot and marker bands overlap.
    pub fn extraction_options(&self) -> Result<ExtractionOptions, BigTextError> {
        let options = ExtractionOptions::from(&self.extraction);
        options.validate()?;
        Ok(options)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.font.path.is_none());
        assert_eq!(ExtractionOptions::from(&config.extraction), ExtractionOptions::default());
    }

    #[test]
    fn partial_extraction_table() {
        let config = Config::parse(
            r#"
            [font]
            path = "fonts/sheet.png"

            [extraction]
            width_marker_threshold = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.font.path.as_deref(), Some(Path::new("fonts/sheet.png")));
        let options = ExtractionOptions::from(&config.extraction);
        assert_eq!(options.pixel_on_threshold, 32);
        assert_eq!(options.width_marker_threshold, 200);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[font]\nfile = \"x.png\"").is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(Config::parse("[extraction]\npixel_on_threshold = 300").is_err());
    }

    #[test]
    fn overlapping_thresholds_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigtext.toml");
        std::fs::write(
            &path,
            "[extraction]\npixel_on_threshold = 200\nwidth_marker_threshold = 100\n",
        )
        .unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: BigTextError::InvalidThresholds { pixel_on: 200, width_marker: 100 },
                ..
            }
        ));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("bigtext-missing-config.toml");
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Io { .. })));
    }
}
