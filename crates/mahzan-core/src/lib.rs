//! # mahzan-core
//!
//! Core types and browse logic for Mahzan.
//!
//! This crate provides the foundational pieces shared across all Mahzan crates:
//! - Entity structs for issues, affiliate publications, and user profiles
//! - The navigation state machine and its authorization guard
//! - Archive listing filter and paginator (pure functions)
//! - Calendar month helpers
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod filter;
pub mod identity;
pub mod month;
pub mod nav;
pub mod paginate;
