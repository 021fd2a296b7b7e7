// Controllers are declared through macros:
// - #[controller(path = "...")] on the struct
// - #[routes(Controller)] on the impl block, with #[get], #[post], ... on methods
// - #[response_body] and #[response_status(...)] to shape the response
//
// The macros generate:
// 1. Injectable trait implementation for DI
// 2. router() method for Axum integration
// 3. request_mappings() listing every route, collected here
//
// #[module] ties both together: Module::routes mounts each controller with
// `mount` and Module::request_mappings feeds the registry below.

use crate::lifecycle::{LifecycleError, OnApplicationBootstrap, OnApplicationShutdown, OnModuleInit};
use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;

/// One route declared by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMapping {
    pub method: &'static str,
    pub path: String,
    pub handler: &'static str,
}

impl RequestMapping {
    pub fn new(method: &'static str, base_path: &str, path: &str, handler: &'static str) -> Self {
        Self {
            method,
            path: join_path(base_path, path),
            handler,
        }
    }
}

fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (_, true) => base.to_string(),
        _ => format!("{}/{}", base, path),
    }
}

/// Attach a controller router under its base path
///
/// axum refuses to nest at the root, so root controllers are merged.
pub fn mount<S>(router: Router<S>, base_path: &str, routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if base_path.trim_end_matches('/').is_empty() {
        router.merge(routes)
    } else {
        router.nest(base_path, routes)
    }
}

/// Registry of every request mapping in the application
///
/// Takes part in the lifecycle: duplicates are rejected on init and the
/// mapping table is logged on bootstrap.
#[derive(Debug, Default)]
pub struct RequestMappings {
    mappings: Vec<RequestMapping>,
}

impl RequestMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mappings: impl IntoIterator<Item = RequestMapping>) -> &mut Self {
        self.mappings.extend(mappings);
        self
    }

    pub fn mappings(&self) -> &[RequestMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn check_ambiguous(&self) -> Result<(), LifecycleError> {
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        for mapping in &self.mappings {
            let key = (mapping.method, mapping.path.as_str());
            if let Some(existing) = seen.insert(key, mapping.handler) {
                return Err(LifecycleError::AmbiguousMapping {
                    method: mapping.method.to_string(),
                    path: mapping.path.clone(),
                    existing: existing.to_string(),
                    duplicate: mapping.handler.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl OnModuleInit for RequestMappings {
    async fn on_module_init(&mut self) -> Result<(), LifecycleError> {
        self.check_ambiguous()
    }
}

#[async_trait]
impl OnApplicationBootstrap for RequestMappings {
    async fn on_application_bootstrap(&mut self) -> Result<(), LifecycleError> {
        for mapping in &self.mappings {
            tracing::info!(
                "Mapped {{{} {}}} onto {}",
                mapping.method,
                mapping.path,
                mapping.handler
            );
        }
        Ok(())
    }
}

#[async_trait]
impl OnApplicationShutdown for RequestMappings {
    async fn on_application_shutdown(&mut self) -> Result<(), LifecycleError> {
        tracing::info!("Unregistering {} request mappings", self.mappings.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_joined_with_single_slashes() {
        assert_eq!(join_path("/", "/response-body-string-v1"), "/response-body-string-v1");
        assert_eq!(join_path("/api/", "items"), "/api/items");
        assert_eq!(join_path("/api", "/"), "/api");
        assert_eq!(join_path("", ""), "/");
    }

    #[tokio::test]
    async fn duplicate_mappings_fail_init() {
        let mut registry = RequestMappings::new();
        registry.register([
            RequestMapping::new("GET", "/", "/a", "first"),
            RequestMapping::new("POST", "/", "/a", "post_a"),
            RequestMapping::new("GET", "/", "a", "second"),
        ]);

        match registry.on_module_init().await {
            Err(LifecycleError::AmbiguousMapping {
                method,
                path,
                existing,
                duplicate,
            }) => {
                assert_eq!(method, "GET");
                assert_eq!(path, "/a");
                assert_eq!(existing, "first");
                assert_eq!(duplicate, "second");
            }
            other => panic!("expected AmbiguousMapping, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn distinct_mappings_pass_every_hook() {
        let mut registry = RequestMappings::new();
        registry.register([
            RequestMapping::new("GET", "/", "/a", "get_a"),
            RequestMapping::new("POST", "/", "/a", "post_a"),
        ]);
        registry.on_module_init().await.unwrap();
        registry.on_application_bootstrap().await.unwrap();
        registry.on_application_shutdown().await.unwrap();

        assert_eq!(registry.len(), 2);
        let handlers: Vec<&str> = registry.mappings().iter().map(|m| m.handler).collect();
        assert_eq!(handlers, vec!["get_a", "post_a"]);
    }
}
