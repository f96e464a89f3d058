//! caravel: a blog front-end for a headless CMS
//!
//! This crate fetches article records from a remote content repository,
//! normalizes them into display-ready view models, and renders a post list
//! and per-post detail pages through embedded Tera templates - either
//! pre-generated to a public directory or served live with incremental
//! "load more" pagination.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main Caravel application
#[derive(Clone)]
pub struct Caravel {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Caravel {
    /// Create a new Caravel instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Build a client for the configured content repository
    pub fn content_client(&self) -> Result<cms::ContentClient> {
        anyhow::ensure!(
            !self.config.api_url.is_empty(),
            "api_url is not configured in _config.yml"
        );
        Ok(cms::ContentClient::new(
            &self.config.api_url,
            config::api_token(),
        )?)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
