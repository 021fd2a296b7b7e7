use crate::controller::RequestMappings;
use crate::di::{Container, HasContainer};
use crate::error::Result;
use axum::Router;

/// Trait for application modules
///
/// Modules are defined with the `#[module]` macro, which implements this
/// trait from a single list of imports, providers and controllers. The same
/// list drives container registration, routing and the mapping registry, so
/// a declared controller is always both routed and checked.
///
/// # Example
/// ```ignore
/// use hello_mvc::module;
///
/// #[module(
///     imports = [ResponseModule],
/// )]
/// pub struct AppModule;
/// ```
pub trait Module {
    /// Register all imports, providers and controllers of this module
    fn register(container: &mut Container) -> Result<()>;

    /// Mount the routes of every controller reachable from this module
    fn routes<S>(container: &Container, router: Router<S>) -> Result<Router<S>>
    where
        S: Clone + Send + Sync + HasContainer + 'static;

    /// Collect the request mappings of every controller reachable from this module
    fn request_mappings(registry: &mut RequestMappings);

    /// Register this module on top of an already seeded container
    fn create_container(mut container: Container) -> Result<Container> {
        Self::register(&mut container)?;
        Ok(container)
    }
}
