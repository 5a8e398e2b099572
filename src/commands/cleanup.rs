//! Standalone teardown for test/demo groups.
//!
//! Deletes every project and subgroup under the given group and removes all
//! billable members except the designated creator. Independent of the
//! provisioning flow; this is the operator's recovery tool after a partial
//! run.

use anyhow::{Context, Result};
use glprov::{gitlab::api, GitLabClient, Settings};

pub fn execute(group_id: u64, creator_user_id: u64) -> Result<()> {
    let settings = Settings::load_without_key()?;
    let client = GitLabClient::new(&settings)?;

    for project in api::list_group_projects(&client, group_id)? {
        let id = project
            .get("id")
            .and_then(|v| v.as_u64())
            .context("Project listing entry without an id")?;
        api::delete_project(&client, id)?;
        println!("Project {} deleted", id);
    }
    println!("Group {} projects cleaned up", group_id);

    for subgroup in api::list_subgroups(&client, group_id)? {
        let id = subgroup
            .get("id")
            .and_then(|v| v.as_u64())
            .context("Subgroup listing entry without an id")?;
        api::delete_subgroup(&client, id)?;
        println!("Subgroup {} deleted", id);
    }
    println!("Group {} subgroups cleaned up", group_id);

    for member in api::list_billable_members(&client, group_id)? {
        let id = member
            .get("id")
            .and_then(|v| v.as_u64())
            .context("Billable member entry without an id")?;
        if id != creator_user_id {
            api::remove_member_from_group(&client, group_id, id)?;
            println!("Member {} removed from group {}", id, group_id);
        }
    }
    println!("Group {} members cleaned up", group_id);

    Ok(())
}
