//! Filesystem Scaffolder: builds the local tree pushed as the initial commit.
//!
//! The directory name is a fresh uuid hex token rather than anything derived
//! from the project name, so concurrent or historical runs never collide.
//! The file and directory names below are a compatibility surface for
//! downstream tooling; change them only deliberately.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{slug, ProjectDescriptor};

/// Hidden directory holding the verbatim descriptor snapshot.
pub const CONFIG_DIR: &str = ".mdcppsepm";

/// Extension of the common workspace's concept file.
pub const COMMON_CONCEPT_EXT: &str = "ccg";
/// Extension of a domain workspace's concept file.
pub const DOMAIN_CONCEPT_EXT: &str = "cg";

/// Generate the scaffold tree under `parent`, returning the new directory.
/// Any filesystem failure is fatal; there is no partial-scaffold recovery.
pub fn generate(descriptor: &ProjectDescriptor, parent: &Path) -> Result<PathBuf> {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let root = parent.join(&token);
    fs::create_dir(&root)
        .with_context(|| format!("Failed to create scaffold directory {}", root.display()))?;

    let readme = format!(
        "# {} - {} \n\n{}",
        descriptor.name, descriptor.version, descriptor.description
    );
    fs::write(root.join("README.md"), readme).context("Failed to write README.md")?;

    fs::write(root.join(".gitignore"), "").context("Failed to write .gitignore")?;

    // Verbatim snapshot of the input document.
    fs::create_dir(root.join(CONFIG_DIR)).context("Failed to create config directory")?;
    let snapshot = serde_json::to_string_pretty(descriptor)?;
    fs::write(root.join(CONFIG_DIR).join("config.json"), snapshot)
        .context("Failed to write config snapshot")?;

    fs::write(root.join(".gitlab-ci.yml"), "").context("Failed to write CI stub")?;

    let gitlab_dir = root.join(".gitlab");
    let mr_dir = gitlab_dir.join("merge_requests_templates");
    fs::create_dir_all(&mr_dir).context("Failed to create merge request template directory")?;
    fs::write(mr_dir.join("default.md"), "MERGE REQUEST TEMPLATE")
        .context("Failed to write merge request template")?;

    let issue_dir = gitlab_dir.join("issue_templates");
    fs::create_dir(&issue_dir).context("Failed to create issue template directory")?;
    fs::write(issue_dir.join("default.md"), "ISSUE TEMPLATE")
        .context("Failed to write issue template")?;

    write_workspace_dir(&root, &descriptor.common_workspace.name, COMMON_CONCEPT_EXT)?;
    for workspace in &descriptor.domain_workspaces {
        write_workspace_dir(&root, &workspace.name, DOMAIN_CONCEPT_EXT)?;
    }

    Ok(root)
}

/// One directory per workspace, holding one empty concept file.
fn write_workspace_dir(root: &Path, name: &str, concept_ext: &str) -> Result<()> {
    let dir = root.join(slug(&format!("{} Workspace", name)));
    fs::create_dir(&dir)
        .with_context(|| format!("Failed to create workspace directory {}", dir.display()))?;

    let concept = format!("{}.{}", slug(&format!("{} Concepts", name)), concept_ext);
    fs::write(dir.join(&concept), "")
        .with_context(|| format!("Failed to write concept file {}", concept))?;

    Ok(())
}
