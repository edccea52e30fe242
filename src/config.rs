use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub related: RelatedConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
    #[serde(default = "default_title_weight")]
    pub title_weight: u32,
    #[serde(default = "default_description_weight")]
    pub description_weight: u32,
    #[serde(default = "default_keywords_weight")]
    pub keywords_weight: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            max_results: default_search_max_results(),
            title_weight: default_title_weight(),
            description_weight: default_description_weight(),
            keywords_weight: default_keywords_weight(),
        }
    }
}

fn default_min_query_chars() -> usize {
    2
}
fn default_search_max_results() -> usize {
    6
}
fn default_title_weight() -> u32 {
    10
}
fn default_description_weight() -> u32 {
    5
}
fn default_keywords_weight() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelatedConfig {
    #[serde(default = "default_related_max_results")]
    pub max_results: usize,
    #[serde(default = "default_category_weight")]
    pub category_weight: u32,
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: u32,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            max_results: default_related_max_results(),
            category_weight: default_category_weight(),
            keyword_weight: default_keyword_weight(),
        }
    }
}

fn default_related_max_results() -> usize {
    3
}
fn default_category_weight() -> u32 {
    2
}
fn default_keyword_weight() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load the config at `path`, or fall back to defaults when the file is
/// absent. A file that exists but fails to parse is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    // Validate search
    if config.search.min_query_chars == 0 {
        anyhow::bail!("search.min_query_chars must be >= 1");
    }
    if config.search.max_results == 0 {
        anyhow::bail!("search.max_results must be >= 1");
    }

    // Validate related
    if config.related.max_results == 0 {
        anyhow::bail!("related.max_results must be >= 1");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}
