//! Backend entry-point: loads settings, selects storage, and starts the REST API.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_repository, create_server, drain_on, seed_example_data};
use swissparcel::ServerSettings;
use swissparcel::inbound::http::health::HealthState;

/// Build Prometheus middleware, logging and discarding failures so the API
/// still starts without metrics.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| io_error("invalid configuration", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io_error("invalid configuration", err))?;
    let api_key = settings
        .api_key()
        .map_err(|err| io_error("invalid configuration", err))?;
    info!(fingerprint = %api_key.fingerprint(), "API key configured");

    let (repository, kind) = build_repository(&settings).await?;
    info!(backend = kind.as_str(), "parcel repository selected");
    if settings.seed_example_data {
        seed_example_data(repository.clone()).await?;
    }

    let config = ServerConfig::new(bind_addr, api_key, repository);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("swissparcel")
            .endpoint("/metrics")
            .build()
    }));

    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(
        tokio::signal::ctrl_c(),
        server.handle(),
        health_state,
    ));
    server.await
}

#[cfg(test)]
mod tests;
