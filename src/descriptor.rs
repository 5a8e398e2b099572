//! Project Descriptor: the input document driving a provisioning run.
//!
//! One JSON file describes the project, its GitLab namespace, its users and
//! their reviewer flags, and the common/domain workspaces. Every component
//! consumes this document read-only; it is loaded once and never mutated.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root input document for one provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub gitlab: GitLabMeta,
    pub users: Vec<User>,
    pub common_workspace: Workspace,
    pub domain_workspaces: Vec<Workspace>,
}

/// Target namespace and creator identity on GitLab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitLabMeta {
    pub root_group_id: u64,
    pub root_group_name: String,
    pub creator_user_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub gitlab_id: u64,
    pub is_reviewer: bool,
}

/// A common or domain workspace: a name plus its member user ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub name: String,
    pub users: Vec<u64>,
}

impl ProjectDescriptor {
    /// Load a descriptor from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor file {}", path.display()))?;
        let descriptor: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse descriptor JSON in {}", path.display()))?;
        Ok(descriptor)
    }

    /// All workspaces in processing order: common first, then domains as listed.
    pub fn workspaces(&self) -> impl Iterator<Item = &Workspace> {
        std::iter::once(&self.common_workspace).chain(self.domain_workspaces.iter())
    }
}

/// Deterministic path slug: lowercase, spaces to hyphens.
///
/// Used for subgroup paths, the project path, and scaffold file names.
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
