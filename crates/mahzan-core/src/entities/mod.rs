//! Entity structs for all Mahzan domain objects.
//!
//! Issues and affiliate publications map to tables on the remote data gateway;
//! user profiles are owned by the identity provider. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! dumping.

mod affiliate;
mod issue;
mod profile;

pub use affiliate::AffiliatePublication;
pub use issue::Issue;
pub use profile::UserProfile;
