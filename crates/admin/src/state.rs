//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CatalogStore;
use crate::services::IdentityVerifier;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn CatalogStore>,
    identity: IdentityVerifier,
    sign_in_url: String,
}

impl AppState {
    /// Build the state from a catalog, token verifier and sign-in page.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        identity: IdentityVerifier,
        sign_in_url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                identity,
                sign_in_url: sign_in_url.into(),
            }),
        }
    }

    /// The catalog storage boundary.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Session token verifier.
    #[must_use]
    pub fn identity(&self) -> &IdentityVerifier {
        &self.inner.identity
    }

    /// Where signed-out dashboard requests are redirected.
    #[must_use]
    pub fn sign_in_url(&self) -> &str {
        &self.inner.sign_in_url
    }
}
