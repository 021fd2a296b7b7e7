//! Application bootstrap and HTTP serving

use crate::app_module::AppModule;
use crate::config::ServerConfig;
use crate::controller::RequestMappings;
use crate::di::{Container, ContainerBuilder, HasContainer};
use crate::error::Result;
use crate::exception::HttpExceptionFilter;
use crate::interceptor::{InterceptorLayer, LoggingInterceptor};
use crate::lifecycle::{Application, shutdown_signal};
use crate::module::Module;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Router state exposing the container to generated handlers
#[derive(Clone)]
pub struct AppState {
    container: Arc<Container>,
}

impl AppState {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }
}

impl HasContainer for AppState {
    fn get_container(&self) -> &Container {
        &self.container
    }
}

/// Every request mapping declared by the controllers reachable from `M`
pub fn request_mappings<M: Module>() -> RequestMappings {
    let mut registry = RequestMappings::new();
    M::request_mappings(&mut registry);
    registry
}

// Only called once the mapping registry passed its init hook; overlapping
// routes would otherwise panic inside axum.
fn build_router<M: Module>(container: Arc<Container>) -> Result<Router> {
    let router = M::routes(&container, Router::new())?
        .fallback(HttpExceptionFilter::not_found)
        .method_not_allowed_fallback(HttpExceptionFilter::method_not_allowed)
        .layer(InterceptorLayer::new(vec![Box::new(LoggingInterceptor)]))
        .with_state(AppState::new(container));

    Ok(router)
}

/// Bootstrap the application defined by [`AppModule`]
pub async fn bootstrap(config: &ServerConfig) -> Result<(Application, Router)> {
    bootstrap_module::<AppModule>(config).await
}

/// Populate the container from `M`, run the startup hooks and build the router
pub async fn bootstrap_module<M: Module>(
    config: &ServerConfig,
) -> Result<(Application, Router)> {
    let seeded = ContainerBuilder::new().register(config.clone()).build();
    let container = M::create_container(seeded)?;

    let mappings = Arc::new(RwLock::new(request_mappings::<M>()));
    let app = Application::builder()
        .container(container)
        .register_lifecycle(mappings, "RequestMappings")
        .init_timeout(config.init_timeout)
        .build()
        .await?;

    let router = build_router::<M>(Arc::clone(app.container()))?;
    Ok((app, router))
}

/// Serve until `signal` resolves, then run the shutdown hooks
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    app: Application,
    signal: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            signal.await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await?;

    app.shutdown().await?;
    Ok(())
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn run(config: ServerConfig) -> Result<()> {
    let (app, router) = bootstrap(&config).await?;

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    serve(listener, router, app, shutdown_signal()).await
}
