use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Prefix for fabricated download links; must reach this server.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_simulate_delay")]
    pub simulate_delay: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_simulate_delay() -> bool {
    true
}

fn default_log_filter() -> String {
    "info,mediagrab=debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            public_base_url: default_public_base_url(),
            simulate_delay: default_simulate_delay(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Apply `MEDIAGRAB_*` environment overrides on top of the file values.
    pub fn with_env(self) -> Self {
        self.with_vars(|name| env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = var("MEDIAGRAB_BIND") {
            self.bind_address = bind;
        }
        if let Some(url) = var("MEDIAGRAB_PUBLIC_URL") {
            self.public_base_url = url;
        }
        if let Some(flag) = var("MEDIAGRAB_SIMULATE_DELAY") {
            self.simulate_delay = parse_flag(&flag).unwrap_or(self.simulate_delay);
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn config_dir() -> PathBuf {
    // ~/.config/mediagrab on every platform, like other CLI tools
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mediagrab")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.yml")
}

pub fn get_config() -> Result<Config> {
    let path = config_path();
    if path.exists() {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let contents = serde_yaml::to_string(config)?;
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
