//! Partial-update builders for admin edit flows.

pub mod affiliate;
pub mod issue;
