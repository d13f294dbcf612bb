use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use tracing::debug;

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "RAPID_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Built front-end assets, served as the router fallback when set.
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Value of the `x-rapidapi-host` header.
    #[serde(default = "default_upstream_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upstream_url() -> String {
    "https://deep-translate1.p.rapidapi.com/language/translate/v2".to_string()
}

fn default_upstream_host() -> String {
    "deep-translate1.p.rapidapi.com".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            host: default_upstream_host(),
            api_key: None,
        }
    }
}

impl UpstreamConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.trim().is_empty())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&load_text_file(path)?)?;

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Loads the first config file that exists among `paths`, falling back to
    /// defaults. The credential from the environment always wins.
    pub fn discover(paths: &[String]) -> Result<(Self, Option<String>)> {
        Self::discover_with_key(paths, std::env::var(API_KEY_ENV).ok())
    }

    pub fn discover_with_key(paths: &[String], api_key: Option<String>) -> Result<(Self, Option<String>)> {
        let mut loaded = None;
        for path in paths {
            if !Path::new(path).exists() {
                debug!("No config at {}", path);
                continue;
            }
            loaded = Some((Config::load(path)?, path.clone()));
            break;
        }

        let (mut config, source) = match loaded {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        };
        config.apply_env(api_key);
        Ok((config, source))
    }

    pub fn apply_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.upstream.api_key = Some(key);
        }
    }

    pub fn default_paths() -> Vec<String> {
        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.yml".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Replaces `${VAR_NAME}` with the variable's value; unknown variables are
/// left as written.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .and_then(|name| std::env::var(name.as_str()).ok())
            .unwrap_or_else(|| whole.to_string())
    });
    Ok(replaced.into_owned())
}

/// Reads a text file, stripping a UTF-8 BOM and decoding invalid UTF-8 lossily.
pub fn load_text_file(file_path: &str) -> Result<String> {
    let bytes = fs::read(file_path)?;
    let (content, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        debug!("{} is not valid UTF-8, decoded lossily", file_path);
    }
    Ok(content.into_owned())
}
