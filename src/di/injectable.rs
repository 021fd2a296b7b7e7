use crate::di::Container;
use crate::error::Result;

/// Trait for types that can be built from the DI container
///
/// Controllers get an implementation from `#[controller]`, which resolves
/// every `Arc<T>` field from the container.
///
/// # Example
/// ```ignore
/// use hello_mvc::controller;
/// use std::sync::Arc;
///
/// #[controller(path = "/")]
/// pub struct GreetingController {
///     config: Arc<ServerConfig>,
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not found in the container.
    fn inject(container: &Container) -> Result<Self>;
}
