//! Publisher: turns the scaffold directory into the remote project's
//! initial commit, then removes the local copy.
//!
//! All git invocations run with the scaffold directory as their working
//! directory. The scaffold is only deleted after the push has landed and
//! the remote has been given a readiness window; a failed deletion is
//! logged and swallowed because the remote state is already correct.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::descriptor::{slug, ProjectDescriptor};
use crate::gitlab::GitLabClient;

const DEFAULT_BRANCH: &str = "main";
const COMMIT_MESSAGE: &str = "Initial commit";

const READINESS_ATTEMPTS: u32 = 10;
const READINESS_PAUSE: Duration = Duration::from_secs(2);

/// Push the scaffold as the project's initial commit and delete it locally.
pub fn publish_and_remove(
    client: &GitLabClient,
    descriptor: &ProjectDescriptor,
    ssh_host: &str,
    project_id: u64,
    scaffold_dir: &Path,
) -> Result<()> {
    let remote = format!(
        "git@{}:{}/{}.git",
        ssh_host,
        descriptor.gitlab.root_group_name,
        slug(&descriptor.name)
    );

    git(scaffold_dir, &["init", &format!("--initial-branch={}", DEFAULT_BRANCH)])?;
    git(scaffold_dir, &["remote", "add", "origin", &remote])?;
    git(scaffold_dir, &["add", "."])?;
    git(scaffold_dir, &["commit", "-m", COMMIT_MESSAGE])?;
    git(
        scaffold_dir,
        &["push", "--set-upstream", "origin", DEFAULT_BRANCH],
    )?;

    // Never delete before the remote has had a chance to confirm.
    wait_for_remote(client, project_id);

    if let Err(e) = std::fs::remove_dir_all(scaffold_dir) {
        eprintln!(
            "Warning: failed to remove scaffold directory {}: {}",
            scaffold_dir.display(),
            e
        );
    }

    Ok(())
}

/// Run one git command in `dir`, failing with the tool's stderr.
fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Bounded poll until the pushed commit is visible on the remote.
///
/// `GET projects/{id}` answers as soon as the project exists, long before
/// the push has been indexed, so the poll asks for commits on the default
/// branch and only returns once one is observable. Exhausting the attempts
/// is not an error: the push itself already succeeded, and the poll only
/// bounds how long cleanup is deferred.
fn wait_for_remote(client: &GitLabClient, project_id: u64) {
    let path = format!(
        "projects/{}/repository/commits?ref_name={}&per_page=1",
        project_id, DEFAULT_BRANCH
    );
    for _ in 0..READINESS_ATTEMPTS {
        match client.get(&path) {
            Ok(serde_json::Value::Array(commits)) if !commits.is_empty() => return,
            _ => {}
        }
        std::thread::sleep(READINESS_PAUSE);
    }
}
