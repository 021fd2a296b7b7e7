use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use std::time::Instant;

/// An interceptor that logs request timing and status
#[derive(Clone, Copy, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        tracing::info!("--> {} {}", method, uri);

        match next.run(request).await {
            Ok(response) => {
                tracing::info!(
                    "<-- {} {} {} {:?}",
                    method,
                    uri,
                    response.status(),
                    start.elapsed()
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("<-- {} {} ERROR: {} {:?}", method, uri, e, start.elapsed());
                Err(e)
            }
        }
    }
}
