use crate::di::Container;

/// Builder for constructing a dependency injection container
///
/// # Example
/// ```
/// use hello_mvc::ContainerBuilder;
/// use hello_mvc::config::ServerConfig;
///
/// let container = ContainerBuilder::new()
///     .register(ServerConfig::default())
///     .build();
/// assert!(container.contains::<ServerConfig>());
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Register a service instance
    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
