use crate::error::{HelloMvcError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Thread-safe dependency injection container.
///
/// Instances are stored once per concrete type and handed out as `Arc<T>`,
/// so a resolved controller is shared by every request.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
}

#[derive(Clone)]
struct ServiceEntry {
    instance: Arc<dyn Any + Send + Sync>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Register an instance, replacing any previous instance of the same type.
    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        let entry = ServiceEntry {
            instance: Arc::new(instance),
        };
        self.services.insert(TypeId::of::<T>(), entry);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| HelloMvcError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;
        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| HelloMvcError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestService {
        value: i32,
    }

    #[test]
    fn test_register_and_resolve() {
        let mut container = Container::new();
        container.register(TestService { value: 42 });
        let service = container.resolve::<TestService>().unwrap();
        assert_eq!(service.value, 42);
        assert!(container.contains::<TestService>());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_resolve_shares_one_instance() {
        let mut container = Container::new();
        container.register(TestService { value: 7 });
        let first = container.resolve::<TestService>().unwrap();
        let second = container.resolve::<TestService>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_resolve_missing_type() {
        let container = Container::new();
        assert!(container.is_empty());
        match container.resolve::<TestService>() {
            Err(HelloMvcError::DependencyNotFound { type_name }) => {
                assert!(type_name.ends_with("TestService"));
            }
            other => panic!("expected DependencyNotFound, got {:?}", other.map(|s| s.value)),
        }
    }
}
