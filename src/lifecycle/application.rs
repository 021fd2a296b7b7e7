//! Application Bootstrap
//!
//! Ties the DI container to the lifecycle manager.

use super::{
    LifecycleError, LifecycleManager, OnApplicationBootstrap, OnApplicationShutdown, OnModuleInit,
    Result,
};
use crate::di::Container;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// A bootstrapped application: the container plus its lifecycle hooks
///
/// # Example
///
/// ```rust,ignore
/// let app = Application::builder()
///     .container(container)
///     .on_init(Arc::clone(&mappings), "RequestMappings")
///     .init_timeout(Duration::from_secs(30))
///     .build()
///     .await?;
///
/// // Serve...
///
/// app.shutdown().await?;
/// ```
pub struct Application {
    container: Arc<Container>,
    lifecycle_manager: Arc<LifecycleManager>,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn lifecycle_manager(&self) -> &Arc<LifecycleManager> {
        &self.lifecycle_manager
    }

    /// Perform graceful shutdown by calling the OnApplicationShutdown hooks
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down application...");
        self.lifecycle_manager.call_application_shutdown().await?;
        tracing::info!("Application shutdown complete");
        Ok(())
    }
}

/// Builder for Application
#[derive(Default)]
pub struct ApplicationBuilder {
    container: Option<Container>,
    lifecycle_manager: LifecycleManager,
    init_timeout: Option<Duration>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Set a timeout for the OnModuleInit phase
    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    pub fn on_init<T>(mut self, service: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + 'static,
    {
        self.lifecycle_manager.register_init(service, name);
        self
    }

    pub fn on_bootstrap<T>(mut self, service: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnApplicationBootstrap + 'static,
    {
        self.lifecycle_manager.register_bootstrap(service, name);
        self
    }

    pub fn on_shutdown<T>(mut self, service: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnApplicationShutdown + 'static,
    {
        self.lifecycle_manager.register_shutdown(service, name);
        self
    }

    /// Register a service for every hook
    pub fn register_lifecycle<T>(self, service: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + OnApplicationBootstrap + OnApplicationShutdown + 'static,
    {
        let name = name.into();
        self.on_init(Arc::clone(&service), name.clone())
            .on_bootstrap(Arc::clone(&service), name.clone())
            .on_shutdown(service, name)
    }

    /// Build and initialize the application
    ///
    /// Runs the OnModuleInit hooks, then the OnApplicationBootstrap hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if no container was provided or any hook fails.
    pub async fn build(self) -> Result<Application> {
        let container = self
            .container
            .ok_or_else(|| LifecycleError::init_failed("Container not provided"))?;

        tracing::info!("Starting application initialization...");

        match self.init_timeout {
            Some(timeout) => {
                self.lifecycle_manager
                    .call_module_init_with_timeout(timeout)
                    .await?
            }
            None => self.lifecycle_manager.call_module_init().await?,
        }
        self.lifecycle_manager.call_application_bootstrap().await?;

        tracing::info!("Application initialization complete");

        Ok(Application {
            container: Arc::new(container),
            lifecycle_manager: Arc::new(self.lifecycle_manager),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Phase;

    #[tokio::test]
    async fn build_requires_a_container() {
        let result = Application::builder().build().await;
        assert!(matches!(result, Err(LifecycleError::InitializationFailed(_))));
    }

    #[tokio::test]
    async fn build_and_shutdown_without_hooks() {
        let app = Application::builder()
            .container(Container::new())
            .init_timeout(Duration::from_secs(1))
            .build()
            .await
            .unwrap();
        assert!(app.container().is_empty());
        assert_eq!(app.lifecycle_manager().hook_count(Phase::ModuleInit), 0);
        app.shutdown().await.unwrap();
    }
}
