//! Tests for the backend application bootstrap, covering metrics initialisation
//! and readiness signalling.

use std::net::SocketAddr;
use std::sync::Arc;

use super::{ServerConfig, create_server, drain_on};
#[cfg(feature = "metrics")]
use super::{PrometheusMetricsBuilder, initialize_metrics};
use actix_web::web;
use rstest::{fixture, rstest};
use swissparcel::inbound::http::api_key::ApiKey;
use swissparcel::inbound::http::health::HealthState;
use swissparcel::outbound::InMemoryParcelRepository;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(
        bind_addr,
        ApiKey::new("bootstrap-test-key").expect("key"),
        Arc::new(InMemoryParcelRepository::new()),
    )
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_none_on_error() {
    let metrics = initialize_metrics(|| -> Result<_, &str> { Err("boom") });
    assert!(metrics.is_none(), "expected metrics to be absent on error");
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
    });

    assert!(
        metrics.is_some(),
        "expected metrics to be present on success"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_metrics(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let metrics = PrometheusMetricsBuilder::new("test")
        .endpoint("/metrics")
        .build()
        .expect("metrics should build for tests");
    let _server = create_server(health_state.clone(), config.with_metrics(Some(metrics)))
        .expect("server should build with metrics");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server =
        create_server(health_state.clone(), config).expect("server should build on loopback");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn drain_fails_liveness_and_stops_the_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let server =
        create_server(health_state.clone(), config).expect("server should build on loopback");
    assert!(health_state.is_alive(), "state should start live");

    actix_web::rt::spawn(drain_on(
        std::future::ready(Ok(())),
        server.handle(),
        health_state.clone(),
    ));
    server.await.expect("server stops cleanly");

    assert!(!health_state.is_alive(), "draining should fail liveness");
}
