//! HTTP middleware and extractors.
//!
//! # Layer order (outermost first, see `routes::app`)
//!
//! 1. Sentry hub + HTTP transaction
//! 2. `TraceLayer` request span
//! 3. Request ID
//!
//! Authentication is per handler through the [`RequireUser`] extractor
//! rather than a layer, so public read routes stay unauthenticated.

pub mod auth;
pub mod request_id;

pub use auth::RequireUser;
pub use request_id::request_id_middleware;
