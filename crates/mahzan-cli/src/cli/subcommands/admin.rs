use clap::Subcommand;

/// Admin command groups. Every action checks the session's admin role first.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Manage magazine issues.
    Issue {
        #[command(subcommand)]
        action: AdminIssueCommands,
    },
    /// Manage affiliate publications.
    Affiliate {
        #[command(subcommand)]
        action: AdminAffiliateCommands,
    },
}

/// Issue management commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminIssueCommands {
    /// Create an issue.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        cover_image_url: String,
        #[arg(long)]
        pdf_url: String,
        /// Issue month (1-12).
        #[arg(long)]
        month: u8,
        #[arg(long)]
        year: i32,
        /// Publish date (YYYY-MM-DD).
        #[arg(long)]
        publish_date: String,
        /// Surface on the front page.
        #[arg(long)]
        featured: bool,
    },
    /// Update an issue.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cover_image_url: Option<String>,
        #[arg(long)]
        pdf_url: Option<String>,
        /// Issue month (1-12).
        #[arg(long)]
        month: Option<u8>,
        #[arg(long)]
        year: Option<i32>,
        /// Publish date (YYYY-MM-DD).
        #[arg(long)]
        publish_date: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// List issues (newest first).
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an issue by ID.
    Get { id: String },
    /// Delete an issue.
    Delete { id: String },
}

/// Affiliate publication management commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminAffiliateCommands {
    /// Create an affiliate publication.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        logo_url: String,
        #[arg(long)]
        website_url: Option<String>,
        #[arg(long)]
        description: String,
        /// Sort position on the front page (ascending).
        #[arg(long, default_value_t = 0)]
        display_order: i64,
        /// Whether the publication is shown to readers.
        #[arg(long, default_value_t = true)]
        active: bool,
    },
    /// Update an affiliate publication.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        logo_url: Option<String>,
        #[arg(long)]
        website_url: Option<String>,
        /// Remove the website link.
        #[arg(long, conflicts_with = "website_url")]
        clear_website_url: bool,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        display_order: Option<i64>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// List all affiliate publications.
    List,
    /// Get an affiliate publication by ID.
    Get { id: String },
    /// Delete an affiliate publication.
    Delete { id: String },
}
