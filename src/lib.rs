//! folio: content collection for a personal portfolio and blog site
//!
//! Reads markdown posts and projects, splits their front-matter from the
//! body, and orders posts by date for a rendering layer.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::loader::ContentLoader;
use content::{CollectError, PostRecord, Project};

/// The site being served
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts directory
    pub posts_dir: std::path::PathBuf,
    /// Projects directory
    pub projects_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Folio instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let projects_dir = base_dir.join(&config.projects_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            projects_dir,
        }
    }

    /// Collect all posts, ordered by the configured post order
    pub fn posts(&self) -> Result<Vec<PostRecord>, CollectError> {
        ContentLoader::new(self).load_posts()
    }

    /// Collect all projects
    pub fn projects(&self) -> Result<Vec<Project>, CollectError> {
        ContentLoader::new(self).load_projects()
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, date: Option<&str>) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title, date)
    }
}
