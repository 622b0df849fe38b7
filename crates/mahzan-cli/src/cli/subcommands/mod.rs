mod admin;
mod auth;

pub use admin::{AdminAffiliateCommands, AdminCommands, AdminIssueCommands};
pub use auth::{AuthCommands, AuthLoginArgs};
