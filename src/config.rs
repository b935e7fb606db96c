use anyhow::Context;
use serde::Deserialize;

/// Environment variable that overrides `lastfm.api_key`
pub const API_KEY_ENV: &str = "LASTFM_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub lastfm: LastfmConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// API key from the environment, or from the config file.
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        pick_api_key(from_env, self.lastfm.api_key.clone())
    }
}

fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    from_env
        .filter(non_blank)
        .or_else(|| from_file.filter(non_blank))
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LastfmConfig {
    pub api_key: Option<String>,
    pub api_root: String,
    pub timeout_secs: u64,
}

impl Default for LastfmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_root: "https://ws.audioscrobbler.com/2.0/".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub max_capacity: u64,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}
