use crate::error::HelloMvcError;
use crate::exception::ExceptionFilter;
use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::error::Error;

/// Error body shared by every failure response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub timestamp: String,
}

/// The default exception filter
#[derive(Clone, Copy, Default)]
pub struct HttpExceptionFilter;

impl HttpExceptionFilter {
    /// Render an error response with the given status
    pub fn respond(status: StatusCode, message: impl Into<String>, path: Option<&str>) -> Response {
        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
            path: path.map(str::to_string),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }

    /// Fallback for paths with no mapping
    pub async fn not_found(method: Method, uri: Uri) -> Response {
        tracing::debug!("No mapping for {} {}", method, uri);
        Self::respond(
            StatusCode::NOT_FOUND,
            format!("No handler found for {} {}", method, uri.path()),
            Some(uri.path()),
        )
    }

    /// Fallback for mapped paths hit with an unsupported method
    pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
        tracing::debug!("Method {} not supported for {}", method, uri);
        Self::respond(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Request method '{}' is not supported", method),
            Some(uri.path()),
        )
    }
}

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response {
        let message = match error.downcast_ref::<HelloMvcError>() {
            Some(HelloMvcError::InvalidConfig { .. }) | Some(HelloMvcError::Lifecycle(_)) => {
                error.to_string()
            }
            Some(HelloMvcError::Io(_)) => "I/O failure while writing the response".to_string(),
            Some(_) | None => "Internal Server Error".to_string(),
        };
        tracing::error!("Request failed: {}", error);
        Self::respond(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn catch_renders_internal_server_error() {
        let err = HelloMvcError::Internal("secret detail".to_string());
        let response = HttpExceptionFilter.catch(Box::new(err));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Internal Server Error");
        assert!(body.get("path").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn foreign_errors_are_masked() {
        let err: Box<dyn Error + Send + Sync> = "plain failure".into();
        let body = json_body(HttpExceptionFilter.catch(err)).await;
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn not_found_reports_path() {
        let response =
            HttpExceptionFilter::not_found(Method::GET, Uri::from_static("/missing?x=1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["path"], "/missing");
        assert_eq!(body["message"], "No handler found for GET /missing");
    }
}
