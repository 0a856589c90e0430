use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Caption languages to try, most wanted first
    pub languages: Option<Vec<String>>,
    pub listen_addr: Option<String>,
    pub user_agent: Option<String>,
}

impl Config {
    /// Load config from ~/.config/yt-transcript/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// CLI languages win over the config file; English if neither names any
    pub fn resolve_languages(&self, cli_langs: &[String]) -> Vec<String> {
        if !cli_langs.is_empty() {
            return cli_langs.to_vec();
        }
        match &self.languages {
            Some(langs) if !langs.is_empty() => langs.clone(),
            _ => vec![DEFAULT_LANGUAGE.to_string()],
        }
    }

    pub fn resolve_listen_addr(&self, cli_listen: Option<&str>) -> String {
        cli_listen
            .or(self.listen_addr.as_deref())
            .unwrap_or(DEFAULT_LISTEN_ADDR)
            .to_string()
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("yt-transcript")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
languages = ["de", "en"]
listen_addr = "0.0.0.0:9000"
user_agent = "yt-transcript/0.1"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.languages, Some(vec!["de".to_string(), "en".to_string()]));
        assert_eq!(config.listen_addr.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(config.user_agent.as_deref(), Some("yt-transcript/0.1"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.languages.is_none());
        assert!(config.listen_addr.is_none());
    }

    #[test]
    fn test_resolve_languages_precedence() {
        let config: Config = toml::from_str(r#"languages = ["fr"]"#).unwrap();
        assert_eq!(config.resolve_languages(&["es".to_string()]), vec!["es".to_string()]);
        assert_eq!(config.resolve_languages(&[]), vec!["fr".to_string()]);
        assert_eq!(Config::default().resolve_languages(&[]), vec!["en".to_string()]);
    }

    #[test]
    fn test_resolve_listen_addr_precedence() {
        let config: Config = toml::from_str(r#"listen_addr = "0.0.0.0:9000""#).unwrap();
        assert_eq!(config.resolve_listen_addr(Some("127.0.0.1:1234")), "127.0.0.1:1234");
        assert_eq!(config.resolve_listen_addr(None), "0.0.0.0:9000");
        assert_eq!(Config::default().resolve_listen_addr(None), DEFAULT_LISTEN_ADDR);
    }
}
