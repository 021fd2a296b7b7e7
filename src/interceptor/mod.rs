use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

mod layer;
mod logging;

pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::LoggingInterceptor;

/// Standard return type for interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Future produced by each link of the chain
pub type NextFuture = Pin<Box<dyn Future<Output = InterceptorResult> + Send>>;

type NextFn = Box<dyn FnOnce(Request<Body>) -> NextFuture + Send>;

/// The rest of the interceptor chain, ending in the router
pub struct Next {
    run: NextFn,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> NextFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// Interceptors can inspect the request before it reaches the handler,
/// and inspect or replace the response after the handler returns.
///
/// # Example
/// ```ignore
/// struct TimingInterceptor;
///
/// #[async_trait]
/// impl Interceptor for TimingInterceptor {
///     async fn intercept(&self, req: Request<Body>, next: Next) -> InterceptorResult {
///         let start = Instant::now();
///         let res = next.run(req).await?;
///         tracing::debug!("took {:?}", start.elapsed());
///         Ok(res)
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
