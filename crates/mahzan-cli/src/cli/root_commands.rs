use clap::{Args, Subcommand};

use crate::cli::subcommands::{AdminCommands, AuthCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Front page: latest issue, featured issues, partner publications.
    Home,
    /// Browse published issues with search, year/month filters, and paging.
    Archive(ArchiveArgs),
    /// Show one issue in full, with previous/next neighbors.
    Issue(IssueArgs),
    /// Interactive browsing shell.
    Browse,
    /// Manage issues and affiliate publications (admin role required).
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// First-run instructions for wiring up the gateway and provider.
    Setup,
    /// Dump JSON schema for a stored record type.
    Schema(SchemaArgs),
}

/// Arguments for `mhz archive`.
#[derive(Clone, Debug, Args)]
pub struct ArchiveArgs {
    /// Match against issue title and description (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only issues from this year.
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Only issues from this month (1-12).
    #[arg(short, long)]
    pub month: Option<u8>,
    /// Page of results to show (pages hold twelve issues).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

/// Arguments for `mhz issue`.
#[derive(Clone, Debug, Args)]
pub struct IssueArgs {
    /// Issue ID.
    pub id: String,
}

/// Arguments for `mhz schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type: issue, affiliate, profile.
    pub type_name: String,
}
