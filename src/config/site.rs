//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Content repository
    /// Base URL of the content API; queries go below this
    pub api_url: String,
    /// Content type tag queried for the post listing
    pub content_type: String,
    /// Records per listing page
    pub page_size: usize,

    // Directory
    pub public_dir: String,

    // Display
    /// Shown when a record carries no parseable publication date
    pub date_fallback: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Caravel".to_string(),
            description: String::new(),
            author: String::new(),
            language: "pt-BR".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            api_url: String::new(),
            content_type: "post".to_string(),
            page_size: 5,

            public_dir: "public".to_string(),

            date_fallback: "data inválida".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// The API token never lives in _config.yml; it comes from the
/// environment, owned by whoever provisions the content repository.
pub fn api_token() -> Option<String> {
    std::env::var("CARAVEL_API_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
}
