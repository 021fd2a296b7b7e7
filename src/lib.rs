//! # hello-mvc
//!
//! Controller-style HTTP handlers on top of axum, showing the different ways
//! a handler can produce its response body:
//!
//! - writing bytes into a [`common::ResponseWriter`]
//! - returning a status-bearing [`common::ResponseEntity`]
//! - returning a plain value marked `#[response_body]`, optionally with
//!   `#[response_status(...)]`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hello_mvc::prelude::*;
//!
//! #[controller(path = "/")]
//! pub struct GreetingController {}
//!
//! #[routes(GreetingController)]
//! impl GreetingController {
//!     #[response_body]
//!     #[get("/hello")]
//!     async fn hello(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! #[module(controllers = [GreetingController])]
//! pub struct AppModule;
//! ```

extern crate self as hello_mvc;

pub mod app_module;
pub mod common;
pub mod config;
pub mod controller;
pub mod di;
pub mod error;
pub mod exception;
pub mod interceptor;
pub mod lifecycle;
pub mod module;
pub mod modules;
pub mod server;

pub use common::{ResponseEntity, ResponseWriter};
pub use di::{Container, ContainerBuilder, HasContainer, Injectable};
pub use error::{HelloMvcError, Result};
pub use module::Module;

pub use hello_mvc_macro::{
    body, controller, delete, get, module, param, patch, post, put, query, response_body,
    response_status, routes,
};

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use hello_mvc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ResponseEntity, ResponseWriter};
    pub use crate::di::{Container, ContainerBuilder, HasContainer, Injectable};
    pub use crate::error::{HelloMvcError, Result};
    pub use crate::interceptor::{Interceptor, InterceptorResult, Next};
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, OnApplicationBootstrap,
        OnApplicationShutdown, OnModuleInit, shutdown_signal,
    };
    pub use crate::module::Module;
    pub use crate::{
        body, controller, delete, get, module, param, patch, post, put, query, response_body,
        response_status, routes,
    };
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
