use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use cardsmith_lib::config::{load_dotenv, CardsConfig};

use crate::Cli;

/// Resolved settings for a CLI run
pub struct App {
    pub input: PathBuf,
    pub config: CardsConfig,
}

impl App {
    /// Resolve configuration: defaults, config file, `.env`, environment, flags
    pub fn new(cli: &Cli) -> Result<Self> {
        if !cli.input.exists() {
            bail!("Input file not found: {}", cli.input.display());
        }

        let dotenv = load_dotenv(Path::new(".env")).context("Failed to read .env")?;
        let config = resolve_config(cli, &dotenv, |name| std::env::var(name).ok())?;

        Ok(Self {
            input: cli.input.clone(),
            config,
        })
    }
}

/// Layer the config file, `.env` values, the environment and flags
fn resolve_config<F>(cli: &Cli, dotenv: &HashMap<String, String>, lookup: F) -> Result<CardsConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => CardsConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CardsConfig::default(),
    };

    config.apply_env(dotenv, lookup);
    apply_flags(&mut config, cli);

    Ok(config)
}

/// Command-line flags override every other source
fn apply_flags(config: &mut CardsConfig, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(dir) = &cli.sounds_dir {
        config.sounds_dir = dir.clone();
    }
    if let Some(dir) = &cli.images_dir {
        config.images_dir = dir.clone();
    }
    if let Some(url) = &cli.dictionary_url {
        config.dictionary_url = url.clone();
    }
    if let Some(path) = &cli.skipped_log {
        config.skipped_log = path.clone();
    }
    if let Some(backend) = cli.translator {
        config.translator = backend;
    }
    if let Some(lang) = &cli.target_lang {
        config.target_lang = lang.clone();
    }
    if let Some(suffix) = &cli.media_suffix {
        config.media_suffix = suffix.clone();
    }
    if cli.append {
        config.append = true;
    }
    if cli.no_images {
        config.images_enabled = false;
    }
    if cli.no_sounds {
        config.sounds_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_lib::config::PEXELS_API_KEY_VAR;
    use cardsmith_lib::translate::TranslatorBackend;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
output = "file.csv"
sounds_dir = "file/sounds"
media_suffix = "_file"
translator = "google"
sounds_enabled = true
images_enabled = true
append = false
pexels_api_key = "file-key"
"#;

    fn config_file(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("cards.toml");
        fs::write(&path, CONFIG).unwrap();
        path
    }

    fn env_key(name: &str) -> Option<String> {
        (name == PEXELS_API_KEY_VAR).then(|| "env-key".to_string())
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp);
        let cli = Cli::parse_from([
            "cardsmith",
            "words.csv",
            "--config",
            path.to_str().unwrap(),
            "--output",
            "flag.csv",
            "--sounds-dir",
            "flag/sounds",
            "--media-suffix",
            "_flag",
            "--translator",
            "mymemory",
            "--append",
            "--no-images",
            "--no-sounds",
        ]);

        let dotenv = HashMap::from([(PEXELS_API_KEY_VAR.to_string(), "dotenv-key".to_string())]);
        let config = resolve_config(&cli, &dotenv, env_key).unwrap();

        assert_eq!(config.output, PathBuf::from("flag.csv"));
        assert_eq!(config.sounds_dir, PathBuf::from("flag/sounds"));
        assert_eq!(config.media_suffix, "_flag");
        assert_eq!(config.translator, TranslatorBackend::MyMemory);
        assert!(config.append);
        assert!(!config.images_enabled);
        assert!(!config.sounds_enabled);
        assert_eq!(config.pexels_api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_config_file_kept_without_flags() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp);
        let cli = Cli::parse_from([
            "cardsmith",
            "words.csv",
            "--config",
            path.to_str().unwrap(),
        ]);

        let config = resolve_config(&cli, &HashMap::new(), |_| None).unwrap();

        assert_eq!(config.output, PathBuf::from("file.csv"));
        assert_eq!(config.sounds_dir, PathBuf::from("file/sounds"));
        assert_eq!(config.media_suffix, "_file");
        assert_eq!(config.translator, TranslatorBackend::Google);
        assert!(!config.append);
        assert!(config.images_enabled);
        assert!(config.sounds_enabled);
        assert_eq!(config.pexels_api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_dotenv_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp);
        let cli = Cli::parse_from([
            "cardsmith",
            "words.csv",
            "--config",
            path.to_str().unwrap(),
            "--translator",
            "none",
        ]);

        let dotenv = HashMap::from([(PEXELS_API_KEY_VAR.to_string(), "dotenv-key".to_string())]);
        let config = resolve_config(&cli, &dotenv, |_| None).unwrap();

        assert_eq!(config.pexels_api_key.as_deref(), Some("dotenv-key"));
        assert_eq!(config.translator, TranslatorBackend::Disabled);
    }

    #[test]
    fn test_missing_input_rejected() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.csv");
        let cli = Cli::parse_from(["cardsmith", missing.to_str().unwrap()]);

        let err = App::new(&cli).err().unwrap();
        assert!(err.to_string().starts_with("Input file not found"));
    }
}
