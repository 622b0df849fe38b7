//! Repository methods on [`crate::ArchiveDb`], grouped per entity.

pub mod affiliate;
pub mod issue;
