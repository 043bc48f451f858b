//! Argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "descope-admin",
    version,
    about = "Read-only operator commands over the management API"
)]
pub struct Cli {
    /// Config file (falls back to CONFIG_PATH, then descope.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List tenants
    Tenants,
    /// List roles
    Roles,
    /// List permissions
    Permissions,
    /// List groups in a tenant
    Groups { tenant_id: String },
    /// Load one user
    User { login_id: String },
    /// Search users, optionally by tenant
    Users { tenant_ids: Vec<String> },
    /// List access keys
    AccessKeys,
    /// Summarize a verified claims payload
    Token { claims_path: String },
}

impl Command {
    /// Commands that run without the service.
    pub fn is_local(&self) -> bool {
        matches!(self, Command::Token { .. })
    }
}
