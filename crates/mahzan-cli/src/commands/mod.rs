pub mod admin;
pub mod archive;
pub mod auth;
pub mod browse;
pub mod dispatch;
pub mod home;
pub mod issue;
pub mod schema;
pub mod setup;
