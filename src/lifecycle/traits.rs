//! Lifecycle hook traits

use super::LifecycleError;
use async_trait::async_trait;

/// Called once the container is populated, before any request is served
///
/// Returning an error aborts startup.
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&mut self) -> Result<(), LifecycleError>;
}

/// Called after every OnModuleInit hook succeeded
///
/// This is the last hook before the application starts accepting requests.
#[async_trait]
pub trait OnApplicationBootstrap: Send + Sync {
    async fn on_application_bootstrap(&mut self) -> Result<(), LifecycleError>;
}

/// Called when the application receives a shutdown signal
#[async_trait]
pub trait OnApplicationShutdown: Send + Sync {
    async fn on_application_shutdown(&mut self) -> Result<(), LifecycleError>;
}
