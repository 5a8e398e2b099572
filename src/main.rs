use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Provision GitLab project workspaces from a descriptor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision a project from a descriptor file
    Setup {
        /// Path to the project descriptor JSON
        descriptor: PathBuf,
    },

    /// Tear down a group: delete its projects and subgroups, remove billable members
    Cleanup {
        /// Id of the group to tear down
        group_id: u64,

        /// User id to keep as a billable member
        #[arg(long)]
        creator: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Setup { descriptor } => {
            commands::setup::execute(&descriptor)?;
        }
        Commands::Cleanup { group_id, creator } => {
            commands::cleanup::execute(group_id, creator)?;
        }
    }

    Ok(())
}
