use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// A response body paired with an explicit status code and headers
///
/// The body decides its own representation: a `String` renders as
/// `text/plain`, `Json<T>` as `application/json`.
///
/// # Example
/// ```
/// use axum::http::StatusCode;
/// use hello_mvc::common::ResponseEntity;
///
/// let entity = ResponseEntity::new("ok".to_string(), StatusCode::OK);
/// assert_eq!(entity.status(), StatusCode::OK);
/// assert_eq!(entity.body(), "ok");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseEntity<T> {
    body: T,
    status: StatusCode,
    headers: HeaderMap,
}

impl<T> ResponseEntity<T> {
    pub fn new(body: T, status: StatusCode) -> Self {
        Self {
            body,
            status,
            headers: HeaderMap::new(),
        }
    }

    /// Shorthand for `ResponseEntity::new(body, StatusCode::OK)`
    pub fn ok(body: T) -> Self {
        Self::new(body, StatusCode::OK)
    }

    /// Add a header, replacing any previous value under the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

impl<T: IntoResponse> IntoResponse for ResponseEntity<T> {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, body::to_bytes, http::header};
    use serde_json::json;

    #[tokio::test]
    async fn text_entity_keeps_status_and_body() {
        let response = ResponseEntity::new("created".to_string(), StatusCode::CREATED).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"created");
    }

    #[tokio::test]
    async fn json_entity_sets_content_type() {
        let response = ResponseEntity::ok(Json(json!({ "a": 1 }))).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"a":1}"#);
    }

    #[test]
    fn custom_headers_are_emitted() {
        let entity = ResponseEntity::ok("ok")
            .with_header(HeaderName::from_static("x-demo"), HeaderValue::from_static("yes"));
        assert_eq!(entity.headers()["x-demo"], "yes");
        let response = entity.into_response();
        assert_eq!(response.headers()["x-demo"], "yes");
    }
}
