//! Request extractors shared by the API handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use catalog_admin_core::StoreId;

use crate::error::AppError;
use crate::models::validation::required_id;

/// JSON body whose parse failures render as `BAD_REQUEST` in the API error
/// shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::BadRequest(rejection.body_text())
}

/// Parse a path segment into a typed id.
///
/// Path params are taken as strings so that a malformed id is reported after
/// the body checks, with the same error shape as a malformed body id.
///
/// # Errors
///
/// Returns `AppError::Validation` naming `field` when the segment is blank or
/// does not parse.
pub fn path_id<T: FromStr>(raw: &str, field: &'static str, label: &str) -> Result<T, AppError> {
    Ok(required_id(Some(raw.to_owned()), field, label)?)
}

/// Parse the `{store_id}` path segment.
///
/// # Errors
///
/// Returns `AppError::Validation` on `storeId`.
pub fn store_id(raw: &str) -> Result<StoreId, AppError> {
    path_id(raw, "storeId", "Store id")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{self, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: Option<String>,
    }

    async fn echo(ApiJson(body): ApiJson<Payload>) -> String {
        body.name.unwrap_or_default()
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let response = app()
            .oneshot(
                http::Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Shoes"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Shoes");
    }

    #[tokio::test]
    async fn test_malformed_body_is_structured_bad_request() {
        let response = app()
            .oneshot(
                http::Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_store_id_rejects_garbage() {
        let err = store_id("not-a-uuid").unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation { field: "storeId", ref message } if message == "Store id is invalid"
        ));
        assert!(store_id(&StoreId::generate().to_string()).is_ok());
    }
}
