//! Entity operations on the GitLab API.
//!
//! Each function is a single remote call with argument shaping; batch forms
//! apply their elements sequentially and abort on the first failure, leaving
//! prior results applied (no rollback).

use anyhow::{Context, Result};
use serde_json::json;
use std::collections::HashMap;

use crate::descriptor::slug;
use crate::gitlab::client::GitLabClient;

/// The entity a membership is attached to.
///
/// Groups and projects share the same members API shape under different
/// resource prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTarget {
    Group(u64),
    Project(u64),
}

impl MemberTarget {
    /// Resource prefix for this entity, e.g. `groups/42`.
    pub fn endpoint(&self) -> String {
        match self {
            MemberTarget::Group(id) => format!("groups/{}", id),
            MemberTarget::Project(id) => format!("projects/{}", id),
        }
    }
}

/// Create a private project in a namespace, returning its id.
pub fn create_project(client: &GitLabClient, name: &str, namespace_id: u64) -> Result<u64> {
    let body = json!({
        "name": name,
        "namespace_id": namespace_id,
        "visibility": "private",
    });

    let response = client.post("projects", &body)?;
    id_of(&response).with_context(|| format!("Project '{}' created without an id", name))
}

/// Create a private subgroup under a parent group, returning its id.
/// The subgroup path is the slug of its name.
pub fn create_subgroup(client: &GitLabClient, name: &str, parent_id: u64) -> Result<u64> {
    let body = json!({
        "name": name,
        "path": slug(name),
        "parent_id": parent_id,
        "visibility": "private",
    });

    let response = client.post("groups", &body)?;
    id_of(&response).with_context(|| format!("Subgroup '{}' created without an id", name))
}

/// Create subgroups sequentially, returning a name-to-id map.
/// One failure aborts the remaining batch.
pub fn create_subgroups(
    client: &GitLabClient,
    names: &[String],
    parent_id: u64,
) -> Result<HashMap<String, u64>> {
    let mut ids = HashMap::new();
    for name in names {
        let id = create_subgroup(client, name, parent_id)?;
        ids.insert(name.clone(), id);
    }
    Ok(ids)
}

/// Add one user to a group or project.
pub fn add_member(
    client: &GitLabClient,
    target: MemberTarget,
    user_id: u64,
    access_level: u64,
) -> Result<serde_json::Value> {
    let body = json!({
        "user_id": user_id,
        "access_level": access_level,
    });

    client.post(&format!("{}/members", target.endpoint()), &body)
}

/// Add users sequentially. A failure leaves prior adds applied.
pub fn add_members(
    client: &GitLabClient,
    target: MemberTarget,
    user_ids: &[u64],
    access_level: u64,
) -> Result<()> {
    for user_id in user_ids {
        add_member(client, target, *user_id, access_level)?;
    }
    Ok(())
}

/// Install a deploy key with write access on a project.
pub fn add_deploy_key(
    client: &GitLabClient,
    project_id: u64,
    title: &str,
    key: &str,
) -> Result<serde_json::Value> {
    let body = json!({
        "title": title,
        "key": key,
        "can_push": true,
    });

    client.post(&format!("projects/{}/deploy_keys", project_id), &body)
}

/// List the projects directly under a group.
pub fn list_group_projects(client: &GitLabClient, group_id: u64) -> Result<Vec<serde_json::Value>> {
    let response = client.get(&format!("groups/{}/projects", group_id))?;
    as_array(response, "group projects")
}

/// List the direct subgroups of a group.
pub fn list_subgroups(client: &GitLabClient, group_id: u64) -> Result<Vec<serde_json::Value>> {
    let response = client.get(&format!("groups/{}/subgroups", group_id))?;
    as_array(response, "subgroups")
}

/// List the billable members of a group.
pub fn list_billable_members(
    client: &GitLabClient,
    group_id: u64,
) -> Result<Vec<serde_json::Value>> {
    let response = client.get(&format!("groups/{}/billable_members", group_id))?;
    as_array(response, "billable members")
}

/// Delete a project. Deleting an absent project is a reported failure.
pub fn delete_project(client: &GitLabClient, project_id: u64) -> Result<()> {
    client.delete(&format!("projects/{}", project_id))?;
    Ok(())
}

/// Delete a subgroup.
pub fn delete_subgroup(client: &GitLabClient, group_id: u64) -> Result<()> {
    client.delete(&format!("groups/{}", group_id))?;
    Ok(())
}

/// Remove a billable member from a group.
pub fn remove_member_from_group(client: &GitLabClient, group_id: u64, user_id: u64) -> Result<()> {
    client.delete(&format!("groups/{}/billable_members/{}", group_id, user_id))?;
    Ok(())
}

fn id_of(response: &serde_json::Value) -> Option<u64> {
    response.get("id").and_then(|v| v.as_u64())
}

fn as_array(response: serde_json::Value, what: &str) -> Result<Vec<serde_json::Value>> {
    match response {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Null => Ok(Vec::new()),
        other => anyhow::bail!("Expected a JSON array of {}, got: {}", what, other),
    }
}
