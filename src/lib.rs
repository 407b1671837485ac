#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::health_service::HealthService;
use crate::services::inquiry_service::InquiryService;
use crate::services::submission_throttle::SubmissionThrottle;
use crate::storage::{InquiryStore, MemoryInquiryStore};
use std::sync::Arc;
use tokio::sync::watch;

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

/// Everything `main` needs after wiring.
#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
}

/// Wires services around an explicitly constructed inquiry store.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn InquiryStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn InquiryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the service graph. Without an explicit store, a fresh in-memory one is used.
    #[must_use]
    pub fn build(self) -> App {
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryInquiryStore::new()));

        let inquiry_service = InquiryService::new(Arc::clone(&store));
        let submission_throttle = SubmissionThrottle::new(self.config.server.trusted_proxies.clone());
        let health_service = HealthService::new(store, self.config.health);

        App { services: ServiceContainer { inquiry_service, submission_throttle }, health_service }
    }
}

/// Routes panics through `tracing` so they show up in structured logs.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown");
        tracing::error!(panic.location = %location, panic.payload = %payload, "Panic occurred");
        default_hook(info);
    }));
}

/// Flips `shutdown_tx` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
