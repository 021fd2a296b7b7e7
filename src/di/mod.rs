mod builder;
mod container;
mod injectable;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use injectable::Injectable;

/// Trait that router state must implement to expose the DI container
pub trait HasContainer {
    fn get_container(&self) -> &Container;
}
