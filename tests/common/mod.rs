//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use insights_demo::config::AppConfig;
use insights_demo::http::HttpServer;
use insights_demo::lifecycle::Shutdown;
use insights_demo::telemetry::{MemorySink, Telemetry, TelemetrySink};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running service bound to an ephemeral port.
pub struct TestService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub telemetry: Arc<Telemetry>,
    server: Option<JoinHandle<()>>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server loop to return.
    #[allow(dead_code)]
    pub async fn stop(&mut self) {
        self.shutdown.trigger();
        if let Some(server) = self.server.take() {
            server.await.unwrap();
        }
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with the gate enabled and a capturing sink.
#[allow(dead_code)]
pub async fn start_tracked(config: AppConfig) -> (TestService, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let service = start(config, Some(sink.clone())).await;
    (service, sink)
}

/// Start the service with the gate disabled.
#[allow(dead_code)]
pub async fn start_untracked(config: AppConfig) -> TestService {
    start(config, None).await
}

async fn start(mut config: AppConfig, sink: Option<Arc<MemorySink>>) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.host = addr.ip().to_string();
    config.listener.port = addr.port();

    let sink = sink.map(|sink| sink as Arc<dyn TelemetrySink>);
    let telemetry = Arc::new(Telemetry::with_sink(sink));
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, telemetry.clone());
    let server_shutdown = shutdown.subscribe();

    let server = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestService {
        addr,
        shutdown,
        telemetry,
        server: Some(server),
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
