//! Business logic services for the catalog API.
//!
//! # Services
//!
//! - `identity` - Session token verification (HS256 JWT)
//! - `ownership` - Store ownership guard
//! - `references` - Same-store checks for referenced rows

pub mod identity;
pub mod ownership;
pub mod references;

pub use identity::{Claims, IdentityError, IdentityVerifier};
pub use ownership::require_store_owner;
