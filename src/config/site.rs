//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `api.access_token`
pub const ACCESS_TOKEN_ENV: &str = "HEADLESS_BLOG_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // Navigation
    pub active_class: String,
    #[serde(default)]
    pub nav: Vec<NavItem>,

    // Content API
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,

    /// Seconds a statically rendered page stays fresh
    pub revalidate_secs: u64,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            language: "pt-BR".to_string(),

            active_class: "active".to_string(),
            nav: vec![
                NavItem::new("/", "Home"),
                NavItem::new("/posts", "Conteúdos"),
                NavItem::new("/about", "Quem somos?"),
            ],

            api: ApiConfig::default(),
            listing: ListingConfig::default(),

            revalidate_secs: 60 * 30,

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides taken from the process environment
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.is_empty() {
                tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                self.api.access_token = Some(token);
            }
        }
    }

    /// How long cached pages are served before being refetched
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

/// A navigation bar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub href: String,
    pub label: String,
}

impl NavItem {
    pub fn new(href: &str, label: &str) -> Self {
        Self {
            href: href.to_string(),
            label: label.to_string(),
        }
    }
}

/// Content API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    /// Content release to query; the master ref when unset
    #[serde(rename = "ref")]
    pub ref_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api/v2".to_string(),
            access_token: None,
            ref_id: None,
            timeout_secs: 10,
        }
    }
}

/// Post listing query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub post_type: String,
    pub page_size: u32,
    pub ordering: String,
    #[serde(default)]
    pub fetch: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            post_type: "post".to_string(),
            page_size: 3,
            ordering: "[document.last_publication_date desc]".to_string(),
            fetch: vec![
                "post.title".to_string(),
                "post.description".to_string(),
                "post.cover".to_string(),
            ],
        }
    }
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}
