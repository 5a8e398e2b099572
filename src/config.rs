//! Process-wide settings, resolved once at startup.
//!
//! Values come from an optional `glprov.toml` in the working directory with
//! environment variables taking precedence. Credentials are env-only. A
//! missing credential is a startup-time fatal error, not a per-call error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "glprov.toml";

const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";
const DEFAULT_SSH_HOST: &str = "gitlab.com";
const DEFAULT_ACCESS_LEVEL: u64 = 30;

/// Configuration for one glprov invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// GitLab REST API base URL, e.g. `https://gitlab.com/api/v4`.
    pub base_url: String,
    /// Private token sent as the `PRIVATE-TOKEN` header.
    pub token: String,
    /// Public SSH key installed as the project deploy key.
    /// Empty for commands that never touch deploy keys (cleanup).
    pub public_key: String,
    /// Host used to build the `git@host:group/project.git` remote URL.
    pub ssh_host: String,
    /// Access level applied to every added member.
    pub access_level: u64,
}

/// Shape of the optional `glprov.toml` file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    ssh_host: Option<String>,
    access_level: Option<u64>,
}

impl Settings {
    /// Load full settings for a provisioning run. Token and public key
    /// are both required.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_without_key()?;
        settings.public_key = std::env::var("SSH_PUBLIC_KEY")
            .context("SSH_PUBLIC_KEY is not set (public key for the project deploy key)")?;
        Ok(settings)
    }

    /// Load settings for operations that never install a deploy key.
    pub fn load_without_key() -> Result<Self> {
        let file = read_config_file(CONFIG_FILE)?;

        let token = std::env::var("GITLAB_ACCESS_TOKEN")
            .context("GITLAB_ACCESS_TOKEN is not set (GitLab private token)")?;

        let base_url = std::env::var("GITLAB_BASE_URL")
            .ok()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            public_key: String::new(),
            ssh_host: file.ssh_host.unwrap_or_else(|| DEFAULT_SSH_HOST.to_string()),
            access_level: file.access_level.unwrap_or(DEFAULT_ACCESS_LEVEL),
        })
    }
}

fn read_config_file(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
