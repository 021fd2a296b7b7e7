use super::{LifecycleError, OnApplicationBootstrap, OnApplicationShutdown, OnModuleInit, Result};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// The three hook phases an application goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ModuleInit,
    ApplicationBootstrap,
    ApplicationShutdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::ModuleInit => "OnModuleInit",
            Phase::ApplicationBootstrap => "OnApplicationBootstrap",
            Phase::ApplicationShutdown => "OnApplicationShutdown",
        })
    }
}

struct Hook<T: ?Sized> {
    name: String,
    target: Arc<RwLock<T>>,
}

/// Runs registered services through the hook phases
///
/// Init and bootstrap run in registration order and stop at the first
/// failure. Shutdown runs in reverse order and never stops early.
///
/// ```rust,ignore
/// let mut manager = LifecycleManager::new();
/// manager.register_init(Arc::clone(&mappings), "RequestMappings");
/// manager.call_module_init().await?;
/// ```
#[derive(Default)]
pub struct LifecycleManager {
    init: Vec<Hook<dyn OnModuleInit>>,
    bootstrap: Vec<Hook<dyn OnApplicationBootstrap>>,
    shutdown: Vec<Hook<dyn OnApplicationShutdown>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_init<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleInit + 'static,
    {
        self.init.push(Hook {
            name: name.into(),
            target: service,
        });
    }

    pub fn register_bootstrap<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnApplicationBootstrap + 'static,
    {
        self.bootstrap.push(Hook {
            name: name.into(),
            target: service,
        });
    }

    pub fn register_shutdown<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnApplicationShutdown + 'static,
    {
        self.shutdown.push(Hook {
            name: name.into(),
            target: service,
        });
    }

    pub async fn call_module_init(&self) -> Result<()> {
        let phase = Phase::ModuleInit;
        let started = Instant::now();
        for hook in &self.init {
            let hook_started = Instant::now();
            let outcome = hook.target.write().await.on_module_init().await;
            finish_hook(phase, &hook.name, hook_started, outcome)?;
        }
        log_phase(phase, self.init.len(), started);
        Ok(())
    }

    /// Run the init phase, failing with [`LifecycleError::Timeout`] once `timeout` elapses
    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.call_module_init()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(phase = %Phase::ModuleInit, ?timeout, "lifecycle phase timed out");
                Err(LifecycleError::timeout(
                    Phase::ModuleInit.to_string(),
                    format!("Timeout after {:?}", timeout),
                ))
            }
        }
    }

    pub async fn call_application_bootstrap(&self) -> Result<()> {
        let phase = Phase::ApplicationBootstrap;
        let started = Instant::now();
        for hook in &self.bootstrap {
            let hook_started = Instant::now();
            let outcome = hook.target.write().await.on_application_bootstrap().await;
            finish_hook(phase, &hook.name, hook_started, outcome)?;
        }
        log_phase(phase, self.bootstrap.len(), started);
        Ok(())
    }

    /// Run every shutdown hook, last registered first
    ///
    /// Failures are logged and counted; the phase itself always completes.
    pub async fn call_application_shutdown(&self) -> Result<()> {
        let phase = Phase::ApplicationShutdown;
        let started = Instant::now();
        let mut failed = 0usize;
        for hook in self.shutdown.iter().rev() {
            let hook_started = Instant::now();
            let outcome = hook.target.write().await.on_application_shutdown().await;
            if finish_hook(phase, &hook.name, hook_started, outcome).is_err() {
                failed += 1;
            }
        }
        if failed > 0 {
            tracing::warn!(%phase, failed, "some shutdown hooks failed");
        }
        log_phase(phase, self.shutdown.len(), started);
        Ok(())
    }

    pub fn hook_count(&self, phase: Phase) -> usize {
        self.hook_names(phase).len()
    }

    /// Names of the hooks registered for `phase`, in the order they run
    pub fn hook_names(&self, phase: Phase) -> Vec<&str> {
        match phase {
            Phase::ModuleInit => self.init.iter().map(|h| h.name.as_str()).collect(),
            Phase::ApplicationBootstrap => {
                self.bootstrap.iter().map(|h| h.name.as_str()).collect()
            }
            Phase::ApplicationShutdown => {
                self.shutdown.iter().rev().map(|h| h.name.as_str()).collect()
            }
        }
    }
}

fn finish_hook(phase: Phase, name: &str, started: Instant, outcome: Result<()>) -> Result<()> {
    let elapsed = started.elapsed();
    match outcome {
        Ok(()) => {
            tracing::debug!(%phase, service = name, ?elapsed, "hook finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%phase, service = name, ?elapsed, "hook failed: {}", e);
            Err(LifecycleError::hook_failed(name, e.to_string()))
        }
    }
}

fn log_phase(phase: Phase, hooks: usize, started: Instant) {
    tracing::info!(%phase, hooks, elapsed = ?started.elapsed(), "lifecycle phase complete");
}
