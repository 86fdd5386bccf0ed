//! Authentication extractors.
//!
//! The session token is read from `Authorization: Bearer <jwt>`, falling
//! back to the identity provider's `__session` cookie.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
    response::{IntoResponse, Redirect, Response},
};

use catalog_admin_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Cookie set by the identity provider's front-end SDK.
pub const SESSION_COOKIE: &str = "__session";

/// Extractor that requires an authenticated user.
///
/// API requests without a valid token get `401`; any other path is
/// redirected to the configured sign-in page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user_id): RequireUser) -> impl IntoResponse {
///     format!("Hello, {user_id}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

/// Error returned when authentication is required but missing or invalid.
pub enum AuthRejection {
    /// Redirect to the sign-in page (for dashboard requests).
    RedirectToSignIn(String),
    /// Structured 401 (for API requests).
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn(url) => Redirect::to(&url).into_response(),
            Self::Unauthenticated => AppError::Unauthenticated.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(&parts.headers, state) {
            Some(user_id) => Ok(Self(user_id)),
            None => {
                if is_api_request(parts) {
                    Err(AuthRejection::Unauthenticated)
                } else {
                    Err(AuthRejection::RedirectToSignIn(
                        state.sign_in_url().to_string(),
                    ))
                }
            }
        }
    }
}

/// Whether the request targets the JSON API. Nested routers see a stripped
/// URI, so the original one is preferred.
fn is_api_request(parts: &Parts) -> bool {
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path(), |original| original.0.path())
        .starts_with("/api/")
}

/// Verify the request's session token, if any.
fn authenticate(headers: &HeaderMap, state: &AppState) -> Option<UserId> {
    let token = session_token(headers)?;
    match state.identity().verify(&token) {
        Ok(user_id) => {
            set_sentry_user(user_id.as_str());
            tracing::Span::current().record("user_id", user_id.as_str());
            Some(user_id)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            None
        }
    }
}

/// Extract the raw token from the `Authorization` header or session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_session_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; __session=tok.en.value; other=1"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok.en.value"));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("__session=from-cookie"));
        assert_eq!(session_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(session_token(&headers), None);
    }
}
