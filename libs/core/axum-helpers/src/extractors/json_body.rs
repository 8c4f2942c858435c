//! JSON extractor whose rejections use the standard error body.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a malformed body is answered with an
/// [`ErrorResponse`](crate::errors::ErrorResponse) instead of plain text.
///
/// Use it for payloads that are validated item by item further down, such as
/// batches where one bad item must not reject the rest.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn count(JsonBody(items): JsonBody<Vec<String>>) -> String {
        items.len().to_string()
    }

    fn request(body: &'static str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/batch")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let app = Router::new().route("/batch", post(count));
        let response = app.oneshot(request(r#"["a", "b"]"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"2");
    }

    #[tokio::test]
    async fn test_malformed_body_gets_structured_error() {
        let app = Router::new().route("/batch", post(count));
        let response = app.oneshot(request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "JSON_EXTRACTION");
        assert_eq!(json["code"], 1003);
    }
}
