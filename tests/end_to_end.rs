//! End-to-end tests: real worker nodes and the gateway on ephemeral ports,
//! talking HTTP through `HttpTransport` and `reqwest`.

use federated_search::config::{GatewayConfig, RegionConfig};
use federated_search::dispatch::ResolutionStatus;
use federated_search::gateway::GatewayService;
use federated_search::gateway::types::{ErrorResponse, SearchResponse, StatusResponse};
use federated_search::transport::HttpTransport;
use federated_search::worker::{Dataset, router};
use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

struct RunningWorker {
    url: String,
    handle: JoinHandle<()>,
}

impl RunningWorker {
    async fn start(items: &[&str]) -> Self {
        let dataset = Dataset::new(items.iter().map(|s| s.to_string()).collect());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(dataset))).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            handle,
        }
    }

    async fn kill(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

struct Cluster {
    gateway: String,
    service: GatewayService,
    client: reqwest::Client,
}

async fn start_gateway(regions: &[(&str, Vec<String>, &[&str])]) -> Cluster {
    let regions: BTreeMap<String, RegionConfig> = regions
        .iter()
        .map(|(name, workers, fallbacks)| {
            (
                name.to_string(),
                RegionConfig {
                    workers: workers.clone(),
                    fallbacks: fallbacks.iter().map(|f| f.to_string()).collect(),
                },
            )
        })
        .collect();

    let config = GatewayConfig {
        bind: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
        request_timeout_ms: 500,
        max_retries: 2,
        regions,
        ..GatewayConfig::default()
    };

    let service = GatewayService::new(&config, Arc::new(HttpTransport::new())).unwrap();
    let listener = tokio::net::TcpListener::bind(config.bind).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = service.router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Cluster {
        gateway: format!("http://{}", addr),
        service,
        client: reqwest::Client::new(),
    }
}

impl Cluster {
    async fn search(&self, q: &str, region: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(format!("{}/search", self.gateway))
            .query(&[("q", q), ("region", region)])
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }
}

#[tokio::test]
async fn test_search_merges_workers_of_a_region() {
    let eu_1 = RunningWorker::start(&["Berlin", "Paris", "Bern"]).await;
    let eu_2 = RunningWorker::start(&["Bern", "Bergen"]).await;
    let asia = RunningWorker::start(&["Beijing"]).await;

    let cluster = start_gateway(&[
        ("europe", vec![eu_1.url.clone(), eu_2.url.clone()], &["asia"]),
        ("asia", vec![asia.url.clone()], &["europe"]),
    ])
    .await;

    let (status, body) = cluster.search("ber", "europe").await;
    assert_eq!(status, StatusCode::OK);

    let body: SearchResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(body.region, "europe");
    assert_eq!(body.results, vec!["Berlin", "Bern", "Bergen"]);
    assert_eq!(body.status, ResolutionStatus::Direct);
    assert!(!body.used_fallback);
}

#[tokio::test]
async fn test_dead_region_falls_back_after_heartbeat() {
    let eu_1 = RunningWorker::start(&["Berlin"]).await;
    let asia = RunningWorker::start(&["Bangkok", "Berlin Cafe Tokyo"]).await;

    let cluster = start_gateway(&[
        ("europe", vec![eu_1.url.clone()], &["asia"]),
        ("asia", vec![asia.url.clone()], &[]),
    ])
    .await;

    eu_1.kill().await;
    cluster.service.monitor.run_cycle().await;

    let (status, body) = cluster.search("berlin", "europe").await;
    assert_eq!(status, StatusCode::OK);

    let body: SearchResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(body.region, "asia");
    assert_eq!(body.results, vec!["Berlin Cafe Tokyo"]);
    assert!(body.used_fallback);
    assert_eq!(
        body.message,
        "Results fetched from fallback region 'asia' because region 'europe' is unavailable."
    );
}

#[tokio::test]
async fn test_failed_retries_mark_worker_down() {
    let eu_1 = RunningWorker::start(&["Lisbon"]).await;
    let dead = RunningWorker::start(&[]).await;
    let dead_url = dead.url.clone();
    dead.kill().await;

    let cluster = start_gateway(&[("europe", vec![eu_1.url.clone(), dead_url.clone()], &[])]).await;

    let (status, body) = cluster.search("lis", "europe").await;
    assert_eq!(status, StatusCode::OK);
    let body: SearchResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(body.results, vec!["Lisbon"]);

    let response = cluster
        .client
        .get(format!("{}/status", cluster.gateway))
        .send()
        .await
        .unwrap();
    let status: StatusResponse = response.json().await.unwrap();
    assert_eq!(status.total, 2);
    assert_eq!(status.available, 1);

    let down = status
        .workers
        .iter()
        .find(|w| w.endpoint.as_str() == dead_url)
        .unwrap();
    assert!(!down.available);
}

#[tokio::test]
async fn test_everything_down_reports_unavailable() {
    let gone = RunningWorker::start(&["x"]).await;
    let url = gone.url.clone();
    gone.kill().await;

    let cluster = start_gateway(&[("gulf", vec![url], &[])]).await;
    cluster.service.monitor.run_cycle().await;

    let (status, body) = cluster.search("x", "gulf").await;
    assert_eq!(status, StatusCode::OK);

    let body: SearchResponse = serde_json::from_str(&body).unwrap();
    assert!(body.results.is_empty());
    assert_eq!(body.status, ResolutionStatus::Unavailable);
    assert_eq!(
        body.message,
        "All workers in region 'gulf' are currently unavailable."
    );
}

#[tokio::test]
async fn test_unknown_region_over_http() {
    let worker = RunningWorker::start(&["x"]).await;
    let cluster = start_gateway(&[("europe", vec![worker.url.clone()], &[])]).await;

    let (status, body) = cluster.search("x", "mars").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(body.error, "Region 'mars' is not recognized.");
}
