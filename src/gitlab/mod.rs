//! GitLab REST API access.
//!
//! `client` holds the low-level authenticated HTTP client; `api` builds the
//! entity operations on top of it (projects, subgroups, members, deploy
//! keys, and the teardown calls used by `glprov cleanup`).

pub mod api;
pub mod client;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::MemberTarget;
pub use client::GitLabClient;
