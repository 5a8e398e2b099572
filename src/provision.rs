//! Provisioning Orchestrator: the fixed seven-step sequence.
//!
//! Steps are strictly ordered because later steps consume ids produced by
//! earlier ones. Nothing is retried and nothing rolls back: a failure after
//! subgroup creation leaves a partially configured remote project, and the
//! operator recovers with `glprov cleanup` or by hand.

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::descriptor::ProjectDescriptor;
use crate::gitlab::{api, GitLabClient, MemberTarget};
use crate::{plan, publish, scaffold};

const DEPLOY_KEY_TITLE: &str = "MDCPPS-EPM";

/// Run the full provisioning sequence for one descriptor.
pub fn run(settings: &Settings, descriptor: &ProjectDescriptor) -> Result<()> {
    let client = GitLabClient::new(settings)?;

    // Step 1: create the project
    let project_id = api::create_project(
        &client,
        &descriptor.name,
        descriptor.gitlab.root_group_id,
    )
    .context("Failed to create project")?;
    println!("--- Project created ---");
    println!("Project ID: {}", project_id);

    // Step 2: create workspace subgroups (primary + Reviewers pairs)
    let names = plan::subgroup_names(descriptor);
    let subgroup_ids = api::create_subgroups(&client, &names, descriptor.gitlab.root_group_id)
        .context("Failed to create subgroups")?;
    println!("--- Subgroups created ---");
    println!("{:?}", subgroup_ids);

    // Step 3: add users to the project (creator excluded)
    let project_members = plan::project_member_ids(descriptor);
    api::add_members(
        &client,
        MemberTarget::Project(project_id),
        &project_members,
        settings.access_level,
    )
    .context("Failed to add members to project")?;
    println!("--- Users added to project ---");

    // Step 4: add users to the subgroups
    let assignments = plan::workspace_assignments(descriptor);
    plan::apply_assignments(&client, &assignments, &subgroup_ids, settings.access_level)
        .context("Failed to add members to subgroups")?;
    println!("--- Users added to subgroups ---");

    // Step 5: install the deploy key
    api::add_deploy_key(&client, project_id, DEPLOY_KEY_TITLE, &settings.public_key)
        .context("Failed to add deploy key")?;
    println!("--- Deploy key added ---");

    // Step 6: scaffold the local tree
    let cwd = std::env::current_dir()
        .context("Failed to resolve the working directory for the scaffold")?;
    let scaffold_dir = scaffold::generate(descriptor, &cwd)?;
    println!("--- File structure generated ---");

    // Step 7: push it as the initial commit, then remove the local copy
    publish::publish_and_remove(
        &client,
        descriptor,
        &settings.ssh_host,
        project_id,
        &scaffold_dir,
    )
    .context("Failed to publish scaffold")?;
    println!("--- Project pushed to GitLab ---");

    println!("--- Setup complete ---");
    Ok(())
}
