//! Mint a session token for local development.
//!
//! Signs with `AUTH_JWT_SECRET` (and `AUTH_JWT_ISSUER` when set), the same
//! key the server verifies with, so the output works as
//! `Authorization: Bearer <token>` against a local server.

use std::time::Duration;

use catalog_admin::config::AuthConfig;
use catalog_admin::services::IdentityVerifier;
use catalog_admin_core::UserId;

/// Print a signed token for `user` valid for `ttl_secs`.
///
/// # Errors
///
/// Returns an error if the auth configuration is missing or invalid, the
/// user id is blank, or signing fails.
pub fn run(user: &str, ttl_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let auth = AuthConfig::from_env()?;
    let user_id = UserId::parse(user)?;
    let verifier = IdentityVerifier::new(&auth.jwt_secret, auth.issuer);
    let token = verifier.issue(&user_id, Duration::from_secs(ttl_secs))?;

    tracing::info!(user_id = %user_id, ttl_secs, "Issued development token");

    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }
    Ok(())
}
