//! End-to-end test of descriptor loading and filesystem scaffolding.
//!
//! Exercises the full local pipeline (parse JSON, plan subgroups, generate
//! the scaffold tree) without touching the network.

use glprov::descriptor::ProjectDescriptor;
use glprov::{plan, scaffold};
use std::path::Path;

const DESCRIPTOR: &str = r#"{
    "name": "Acme",
    "version": "1.0.0",
    "description": "Widgets at scale",
    "gitlab": {"creatorUserId": 1, "rootGroupId": 100, "rootGroupName": "acme"},
    "users": [
        {"gitlabId": 1, "isReviewer": false},
        {"gitlabId": 2, "isReviewer": true}
    ],
    "commonWorkspace": {"name": "Core", "users": [1]},
    "domainWorkspaces": [
        {"name": "Billing", "users": [1, 2]},
        {"name": "Shipping", "users": [2]}
    ]
}"#;

fn load_descriptor(dir: &Path) -> ProjectDescriptor {
    let path = dir.join("project.json");
    std::fs::write(&path, DESCRIPTOR).unwrap();
    ProjectDescriptor::from_path(&path).unwrap()
}

#[test]
fn descriptor_to_scaffold_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let descriptor = load_descriptor(tmp.path());

    let root = scaffold::generate(&descriptor, tmp.path()).unwrap();

    // Fixed entries
    for file in ["README.md", ".gitignore", ".gitlab-ci.yml"] {
        assert!(root.join(file).is_file(), "{}", file);
    }
    assert!(root.join(".mdcppsepm/config.json").is_file());
    assert!(root.join(".gitlab/merge_requests_templates/default.md").is_file());
    assert!(root.join(".gitlab/issue_templates/default.md").is_file());

    // One directory and one concept file per workspace; common gets .ccg
    assert!(root.join("core-workspace/core-concepts.ccg").is_file());
    assert!(root.join("billing-workspace/billing-concepts.cg").is_file());
    assert!(root.join("shipping-workspace/shipping-concepts.cg").is_file());
}

#[test]
fn descriptor_to_plan() {
    let tmp = tempfile::tempdir().unwrap();
    let descriptor = load_descriptor(tmp.path());

    let names = plan::subgroup_names(&descriptor);
    assert_eq!(names.len(), 6);
    assert!(names.contains(&"Shipping Reviewers".to_string()));

    let assignments = plan::workspace_assignments(&descriptor);
    let shipping = assignments.iter().find(|a| a.name == "Shipping").unwrap();
    assert_eq!(shipping.members, vec![2]);
    assert_eq!(shipping.reviewers, vec![2]);
}

#[test]
fn malformed_descriptor_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, r#"{"name": "Acme"}"#).unwrap();

    let err = ProjectDescriptor::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse descriptor"));
}
