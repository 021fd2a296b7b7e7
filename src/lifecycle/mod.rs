//! Lifecycle hooks
//!
//! Services registered with the [`Application`] builder take part in
//! startup and shutdown.
//!
//! ```text
//! 1. Configuration loading
//! 2. DI container creation and module registration
//! 3. OnModuleInit            (each service, registration order)
//! 4. OnApplicationBootstrap  (each service, registration order)
//! 5. Server start ... running ...
//! 6. Shutdown signal (SIGTERM/SIGINT)
//! 7. OnApplicationShutdown   (each service, reverse order)
//! 8. Server stop
//! ```

mod application;
mod error;
mod manager;
mod shutdown;
mod traits;

pub use application::{Application, ApplicationBuilder};
pub use error::{LifecycleError, Result};
pub use manager::{LifecycleManager, Phase};
pub use shutdown::shutdown_signal;
pub use traits::{OnApplicationBootstrap, OnApplicationShutdown, OnModuleInit};
