use anyhow::{Context, Result};
use glprov::{provision, ProjectDescriptor, Settings};
use std::path::Path;

pub fn execute(descriptor_path: &Path) -> Result<()> {
    let settings =
        Settings::load().context("Set GITLAB_ACCESS_TOKEN and SSH_PUBLIC_KEY before running setup")?;
    let descriptor = ProjectDescriptor::from_path(descriptor_path)?;

    provision::run(&settings, &descriptor)
}
