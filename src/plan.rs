//! Workspace Planner: derives the subgroup and membership layout from the
//! descriptor, then realizes it against the API.
//!
//! Planning is pure so the membership rules are testable without a live
//! platform: every workspace gets a primary subgroup plus a parallel
//! "<name> Reviewers" subgroup, and the creator is never added as an
//! explicit member anywhere (GitLab grants it ownership implicitly).

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::descriptor::ProjectDescriptor;
use crate::gitlab::{api, GitLabClient, MemberTarget};

/// Suffix distinguishing a workspace's reviewer subgroup.
pub const REVIEWERS_SUFFIX: &str = " Reviewers";

/// Planned memberships for one workspace's pair of subgroups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    /// Workspace members minus the creator.
    pub members: Vec<u64>,
    /// Reviewer-flagged workspace members minus the creator.
    pub reviewers: Vec<u64>,
}

/// All subgroup names to create: one per workspace, then the same list with
/// the Reviewers suffix. Always exactly 2 * (domains + 1) names.
pub fn subgroup_names(descriptor: &ProjectDescriptor) -> Vec<String> {
    let mut names: Vec<String> = descriptor.workspaces().map(|w| w.name.clone()).collect();

    let reviewer_names: Vec<String> = names
        .iter()
        .map(|name| format!("{}{}", name, REVIEWERS_SUFFIX))
        .collect();
    names.extend(reviewer_names);
    names
}

/// User ids to add to the project itself: every listed user except the creator.
pub fn project_member_ids(descriptor: &ProjectDescriptor) -> Vec<u64> {
    let creator = descriptor.gitlab.creator_user_id;
    descriptor
        .users
        .iter()
        .map(|user| user.gitlab_id)
        .filter(|id| *id != creator)
        .collect()
}

/// Membership assignments per workspace, common workspace first.
pub fn workspace_assignments(descriptor: &ProjectDescriptor) -> Vec<Assignment> {
    let creator = descriptor.gitlab.creator_user_id;
    let reviewer_ids: Vec<u64> = descriptor
        .users
        .iter()
        .filter(|user| user.is_reviewer)
        .map(|user| user.gitlab_id)
        .collect();

    descriptor
        .workspaces()
        .map(|workspace| Assignment {
            name: workspace.name.clone(),
            members: workspace
                .users
                .iter()
                .copied()
                .filter(|id| *id != creator)
                .collect(),
            reviewers: workspace
                .users
                .iter()
                .copied()
                .filter(|id| reviewer_ids.contains(id) && *id != creator)
                .collect(),
        })
        .collect()
}

/// Realize the assignments: for each workspace, fill the primary subgroup
/// then its Reviewers subgroup. A failure aborts the remaining workspaces.
pub fn apply_assignments(
    client: &GitLabClient,
    assignments: &[Assignment],
    subgroup_ids: &HashMap<String, u64>,
    access_level: u64,
) -> Result<()> {
    for assignment in assignments {
        let subgroup_id = *subgroup_ids
            .get(&assignment.name)
            .with_context(|| format!("No subgroup id recorded for '{}'", assignment.name))?;
        let reviewers_name = format!("{}{}", assignment.name, REVIEWERS_SUFFIX);
        let reviewers_id = *subgroup_ids
            .get(&reviewers_name)
            .with_context(|| format!("No subgroup id recorded for '{}'", reviewers_name))?;

        println!(
            "Adding members to workspace {}: {:?}",
            assignment.name, assignment.members
        );
        api::add_members(
            client,
            MemberTarget::Group(subgroup_id),
            &assignment.members,
            access_level,
        )?;

        println!(
            "Adding reviewers to workspace {}: {:?}",
            assignment.name, assignment.reviewers
        );
        api::add_members(
            client,
            MemberTarget::Group(reviewers_id),
            &assignment.reviewers,
            access_level,
        )?;
    }

    Ok(())
}
