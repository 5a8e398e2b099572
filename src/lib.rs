pub mod config;
pub mod descriptor;
pub mod gitlab;
pub mod plan;
pub mod provision;
pub mod publish;
pub mod scaffold;

// Re-export commonly used types
pub use config::Settings;
pub use descriptor::ProjectDescriptor;
pub use gitlab::GitLabClient;
