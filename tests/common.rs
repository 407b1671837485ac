#![allow(dead_code, clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]

use async_trait::async_trait;
use clap::Parser;
use pacific_garden_server::api::{self, MgmtState};
use pacific_garden_server::config::Config;
use pacific_garden_server::domain::inquiry::{ContactInquiry, InsertContactInquiry};
use pacific_garden_server::storage::{InquiryStore, MemoryInquiryStore, StoreError};
use pacific_garden_server::{AppBuilder, telemetry};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use uuid::Uuid;

pub fn get_test_config() -> Config {
    config_with_rate_limit(10_000, 10_000)
}

pub fn config_with_rate_limit(per_second: u32, burst: u32) -> Config {
    Config::try_parse_from([
        "pacific-garden-server".to_string(),
        "--host".to_string(),
        "127.0.0.1".to_string(),
        "--port".to_string(),
        "0".to_string(),
        "--mgmt-port".to_string(),
        "0".to_string(),
        "--rate-limit-per-second".to_string(),
        per_second.to_string(),
        "--rate-limit-burst".to_string(),
        burst.to_string(),
    ])
    .unwrap()
}

pub fn valid_inquiry() -> Value {
    json!({
        "nama": "Budi Santoso",
        "email": "budi@example.com",
        "noTelepon": "08123456789",
        "pesan": "Saya tertarik dengan unit tipe 36/72."
    })
}

/// A store whose every call fails, for exercising the 500 paths.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl InquiryStore for FailingStore {
    async fn create(&self, _input: InsertContactInquiry) -> Result<ContactInquiry, StoreError> {
        Err(StoreError::Unavailable("disk quota exceeded on node-7".into()))
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, StoreError> {
        Err(StoreError::Unavailable("disk quota exceeded on node-7".into()))
    }

    async fn get_by_id(&self, _id: &Uuid) -> Result<Option<ContactInquiry>, StoreError> {
        Err(StoreError::Unavailable("disk quota exceeded on node-7".into()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("disk quota exceeded on node-7".into()))
    }
}

/// A store that panics on every call, for exercising the panic envelope.
#[derive(Debug, Default)]
pub struct PanickingStore;

#[async_trait]
impl InquiryStore for PanickingStore {
    async fn create(&self, _input: InsertContactInquiry) -> Result<ContactInquiry, StoreError> {
        panic!("record log poisoned")
    }

    async fn list(&self) -> Result<Vec<ContactInquiry>, StoreError> {
        panic!("record log poisoned")
    }

    async fn get_by_id(&self, _id: &Uuid) -> Result<Option<ContactInquiry>, StoreError> {
        panic!("record log poisoned")
    }

    async fn count(&self) -> Result<usize, StoreError> {
        panic!("record log poisoned")
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub store: Arc<dyn InquiryStore>,
    pub shutdown_tx: watch::Sender<bool>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(get_test_config(), Arc::new(MemoryInquiryStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn InquiryStore>) -> Self {
        Self::spawn_with(get_test_config(), store).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        Self::spawn_with(config, Arc::new(MemoryInquiryStore::new())).await
    }

    pub async fn spawn_with(config: Config, store: Arc<dyn InquiryStore>) -> Self {
        telemetry::init_test_telemetry();

        let app = AppBuilder::new(config.clone()).with_store(Arc::clone(&store)).build();
        let app_router = api::app_router(&config, app.services).unwrap();
        let mgmt_app = api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_addr = api_listener.local_addr().unwrap();
        let mgmt_addr = mgmt_listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut api_rx = shutdown_rx.clone();
        tokio::spawn(async move {
            axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(async move {
                    let _ = api_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let mut mgmt_rx = shutdown_rx;
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_app.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(async move {
                    let _ = mgmt_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        Self {
            server_url: format!("http://{api_addr}"),
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            store,
            shutdown_tx,
        }
    }

    pub fn contact_url(&self) -> String {
        format!("{}/api/contact", self.server_url)
    }

    pub async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client.post(self.contact_url()).json(body).send().await.unwrap()
    }

    pub async fn list(&self) -> Value {
        let resp = self.client.get(self.contact_url()).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.json().await.unwrap()
    }

    pub async fn stored_count(&self) -> usize {
        self.list().await["data"].as_array().map_or(0, Vec::len)
    }
}
