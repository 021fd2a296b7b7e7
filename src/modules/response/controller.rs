use super::hello_data::HelloData;
use crate::common::{ResponseEntity, ResponseWriter};
use crate::prelude::*;
use std::io::Write;

/// Five equivalent ways of producing a response body
#[controller(path = "/")]
pub struct ResponseBodyController {}

#[routes(ResponseBodyController)]
impl ResponseBodyController {
    /// Writes straight into the response; the status stays at its default.
    #[get("/response-body-string-v1")]
    pub async fn response_body_v1(&self, writer: &mut ResponseWriter) -> Result<()> {
        writer.write_all(b"ok")?;
        Ok(())
    }

    #[get("/response-body-string-v2")]
    pub async fn response_body_v2(&self) -> ResponseEntity<String> {
        ResponseEntity::new("ok".to_string(), StatusCode::OK)
    }

    #[response_body]
    #[get("/response-body-string-v3")]
    pub async fn response_body_v3(&self) -> String {
        "ok".to_string()
    }

    #[get("/response-body-json-v1")]
    pub async fn response_body_json_v1(&self) -> ResponseEntity<Json<HelloData>> {
        let hello_data = HelloData::new("userA", 20);
        ResponseEntity::new(Json(hello_data), StatusCode::OK)
    }

    #[response_status(OK)]
    #[response_body]
    #[get("/response-body-json-v2")]
    pub async fn response_body_json_v2(&self) -> HelloData {
        HelloData::new("userA", 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::{Container, HasContainer};
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    const STRING_PATHS: [&str; 3] = [
        "/response-body-string-v1",
        "/response-body-string-v2",
        "/response-body-string-v3",
    ];
    const JSON_PATHS: [&str; 2] = ["/response-body-json-v1", "/response-body-json-v2"];

    #[derive(Clone)]
    struct TestState {
        container: Arc<Container>,
    }

    impl HasContainer for TestState {
        fn get_container(&self) -> &Container {
            &self.container
        }
    }

    fn app() -> Router {
        let controller = Arc::new(ResponseBodyController {});
        ResponseBodyController::router(controller).with_state(TestState {
            container: Arc::new(Container::new()),
        })
    }

    async fn send(method: Method, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn string_endpoints_return_plain_ok() {
        for path in STRING_PATHS {
            let (status, content_type, body) = send(Method::GET, path).await;
            assert_eq!(status, StatusCode::OK, "{}", path);
            assert_eq!(
                content_type.as_deref(),
                Some("text/plain; charset=utf-8"),
                "{}",
                path
            );
            assert_eq!(body, b"ok", "{}", path);
        }
    }

    #[tokio::test]
    async fn json_endpoints_return_hello_data() {
        for path in JSON_PATHS {
            let (status, content_type, body) = send(Method::GET, path).await;
            assert_eq!(status, StatusCode::OK, "{}", path);
            assert_eq!(content_type.as_deref(), Some("application/json"), "{}", path);

            let value: Value = serde_json::from_slice(&body).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 2, "{}", path);
            assert_eq!(object["username"], "userA");
            assert_eq!(object["age"].as_i64(), Some(20));
            assert_eq!(body, br#"{"username":"userA","age":20}"#, "{}", path);
        }
    }

    #[tokio::test]
    async fn responses_are_idempotent_and_ignore_query_strings() {
        for path in STRING_PATHS.iter().chain(JSON_PATHS.iter()) {
            let first = send(Method::GET, path).await;
            let second = send(Method::GET, path).await;
            let with_query = send(Method::GET, &format!("{}?username=userB&age=99", path)).await;
            assert_eq!(first, second, "{}", path);
            assert_eq!(first, with_query, "{}", path);
        }
    }

    #[tokio::test]
    async fn only_get_is_routed() {
        let (status, _, _) = send(Method::POST, "/response-body-json-v1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn handlers_can_be_called_directly() {
        let controller = ResponseBodyController {};

        let mut writer = ResponseWriter::new();
        controller.response_body_v1(&mut writer).await.unwrap();
        assert_eq!(writer.written(), b"ok");

        let entity = controller.response_body_v2().await;
        assert_eq!(entity.status(), StatusCode::OK);
        assert_eq!(entity.body(), "ok");

        assert_eq!(controller.response_body_v3().await, "ok");

        let entity = controller.response_body_json_v1().await;
        assert_eq!(entity.status(), StatusCode::OK);
        assert_eq!(entity.into_body().0, HelloData::new("userA", 20));

        assert_eq!(
            controller.response_body_json_v2().await,
            HelloData::new("userA", 20)
        );
    }

    #[test]
    fn declares_five_get_mappings() {
        let mappings = ResponseBodyController::request_mappings();
        let declared: Vec<(&str, &str, &str)> = mappings
            .iter()
            .map(|m| (m.method, m.path.as_str(), m.handler))
            .collect();
        assert_eq!(
            declared,
            vec![
                ("GET", "/response-body-string-v1", "response_body_v1"),
                ("GET", "/response-body-string-v2", "response_body_v2"),
                ("GET", "/response-body-string-v3", "response_body_v3"),
                ("GET", "/response-body-json-v1", "response_body_json_v1"),
                ("GET", "/response-body-json-v2", "response_body_json_v2"),
            ]
        );
    }
}
