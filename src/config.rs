//! Run configuration
//!
//! Settings are resolved once at startup and handed to constructors:
//! defaults, then an optional TOML file, then `.env`, then the process
//! environment. Command-line flags are applied last by the binary.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::media::RetryPolicy;
use crate::translate::{LanguagePair, TranslatorBackend};

/// Environment variable holding the photo search API key
pub const PEXELS_API_KEY_VAR: &str = "PEXELS_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Retry settings for the photo search, as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_secs: 2,
        }
    }
}

/// Configuration for a card generation run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    /// Output table path
    pub output: PathBuf,
    pub sounds_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Where keywords missing from the dictionary are listed
    pub skipped_log: PathBuf,
    pub dictionary_url: String,
    pub pexels_url: String,
    pub pexels_api_key: Option<String>,
    /// Appended to the keyword in every media file name
    pub media_suffix: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translator: TranslatorBackend,
    pub image_retry: RetrySettings,
    /// Timeout for dictionary, search and translation calls
    pub api_timeout_secs: u64,
    /// Timeout for media downloads
    pub download_timeout_secs: u64,
    pub sounds_enabled: bool,
    pub images_enabled: bool,
    /// Append each card as it is built instead of rewriting the table at the end
    pub append: bool,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output.csv"),
            sounds_dir: PathBuf::from("output/sounds"),
            images_dir: PathBuf::from("output/images"),
            skipped_log: PathBuf::from("skipped_words.txt"),
            dictionary_url: "https://dictionary-api.eliaschen.dev".to_string(),
            pexels_url: "https://api.pexels.com/v1".to_string(),
            pexels_api_key: None,
            media_suffix: "_auto_tool".to_string(),
            source_lang: "en".to_string(),
            target_lang: "vi".to_string(),
            translator: TranslatorBackend::default(),
            image_retry: RetrySettings::default(),
            api_timeout_secs: 10,
            download_timeout_secs: 30,
            sounds_enabled: true,
            images_enabled: true,
            append: false,
        }
    }
}

impl CardsConfig {
    /// Load a TOML config file; keys left out keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill in secrets from `.env` values and the environment
    ///
    /// The environment wins over `.env`, which wins over the config file.
    pub fn apply_env<F>(&mut self, dotenv: &HashMap<String, String>, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(PEXELS_API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                dotenv
                    .get(PEXELS_API_KEY_VAR)
                    .cloned()
                    .filter(|v| !v.trim().is_empty())
            });

        if let Some(key) = key {
            self.pexels_api_key = Some(key.trim().to_string());
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.image_retry.max_retries,
            Duration::from_secs(self.image_retry.initial_delay_secs),
        )
    }

    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair {
            source: self.source_lang.clone(),
            target: self.target_lang.clone(),
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Read `KEY=VALUE` pairs from a `.env` file
///
/// A missing file yields no values. Blank lines and `#` comments are
/// ignored, an `export ` prefix is accepted, and matching surrounding quotes
/// are removed from values.
pub fn load_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(parse_dotenv(&content))
}

fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        let value = ['"', '\'']
            .into_iter()
            .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
            .unwrap_or(value);

        values.insert(key.to_string(), value.to_string());
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = CardsConfig::default();
        assert_eq!(config.output, PathBuf::from("output.csv"));
        assert_eq!(config.media_suffix, "_auto_tool");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.language_pair(), LanguagePair::default());
        assert!(config.pexels_api_key.is_none());
    }

    #[test]
    fn test_partial_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cards.toml");
        fs::write(
            &path,
            "output = \"deck.csv\"\ntranslator = \"mymemory\"\n\n[image_retry]\nmax_retries = 5\n",
        )
        .unwrap();

        let config = CardsConfig::from_file(&path).unwrap();

        assert_eq!(config.output, PathBuf::from("deck.csv"));
        assert_eq!(config.translator, TranslatorBackend::MyMemory);
        assert_eq!(config.image_retry.max_retries, 5);
        assert_eq!(config.image_retry.initial_delay_secs, 2);
        assert_eq!(config.sounds_dir, PathBuf::from("output/sounds"));
    }

    #[test]
    fn test_invalid_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cards.toml");
        fs::write(&path, "output = [").unwrap();

        assert!(matches!(CardsConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_environment_beats_dotenv() {
        let mut config = CardsConfig::default();
        let dotenv = HashMap::from([(PEXELS_API_KEY_VAR.to_string(), "from-dotenv".to_string())]);

        config.apply_env(&dotenv, |name| {
            (name == PEXELS_API_KEY_VAR).then(|| "from-env".to_string())
        });
        assert_eq!(config.pexels_api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_dotenv_used_when_env_missing() {
        let mut config = CardsConfig::default();
        let dotenv = HashMap::from([(PEXELS_API_KEY_VAR.to_string(), "from-dotenv".to_string())]);

        config.apply_env(&dotenv, no_env);
        assert_eq!(config.pexels_api_key.as_deref(), Some("from-dotenv"));
    }

    #[test]
    fn test_file_key_kept_without_env() {
        let mut config = CardsConfig {
            pexels_api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        config.apply_env(&HashMap::new(), |_| Some("  ".to_string()));
        assert_eq!(config.pexels_api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_parse_dotenv() {
        let values = parse_dotenv(
            "# comment\n\nPEXELS_API_KEY=\"abc123\"\nexport OTHER = 'x y'\nbroken line\n=nokey\n",
        );

        assert_eq!(values.get("PEXELS_API_KEY").map(String::as_str), Some("abc123"));
        assert_eq!(values.get("OTHER").map(String::as_str), Some("x y"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_missing_dotenv() {
        let temp = TempDir::new().unwrap();
        assert!(load_dotenv(&temp.path().join(".env")).unwrap().is_empty());
    }
}
