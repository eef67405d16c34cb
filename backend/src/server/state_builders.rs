//! Builders for the parcel repository and the HTTP state wrapping it.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use swissparcel::ServerSettings;
use swissparcel::domain::ports::ParcelRepository;
use swissparcel::domain::{ExampleParcelSeeder, ParcelService};
use swissparcel::inbound::http::api_key::ApiKey;
use swissparcel::inbound::http::state::{HttpState, HttpStatePorts};
use swissparcel::outbound::InMemoryParcelRepository;
use swissparcel::outbound::persistence::{
    DbPool, DieselParcelRepository, PoolConfig, run_migrations,
};

/// Storage backend selected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RepositoryKind {
    Memory,
    Postgres,
}

impl RepositoryKind {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

async fn connect_postgres(
    database_url: &str,
    max_connections: u32,
) -> io::Result<Arc<dyn ParcelRepository>> {
    let url = database_url.to_owned();
    let applied = web::block(move || run_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| io::Error::other(format!("database migration failed: {err}")))?;
    info!(applied, "database migrations applied");

    let config = PoolConfig::new(database_url).with_max_size(max_connections);
    let pool = DbPool::new(config)
        .await
        .map_err(|err| io::Error::other(format!("database pool failed: {err}")))?;
    Ok(Arc::new(DieselParcelRepository::new(pool)))
}

/// Choose the repository adapter: PostgreSQL when a database URL is
/// configured, otherwise the in-memory store.
///
/// # Errors
/// Propagates migration and pool construction failures as [`io::Error`].
pub(crate) async fn build_repository(
    settings: &ServerSettings,
) -> io::Result<(Arc<dyn ParcelRepository>, RepositoryKind)> {
    match settings.database_url() {
        Some(url) => {
            let repository = connect_postgres(url, settings.db_max_connections()).await?;
            Ok((repository, RepositoryKind::Postgres))
        }
        None => Ok((
            Arc::new(InMemoryParcelRepository::new()),
            RepositoryKind::Memory,
        )),
    }
}

/// Insert the example parcels, skipping ids that already exist.
///
/// # Errors
/// Returns [`io::Error`] when the fixtures are invalid or storage fails.
pub(crate) async fn seed_example_data(repository: Arc<dyn ParcelRepository>) -> io::Result<()> {
    let outcome = ExampleParcelSeeder::new(repository)
        .seed()
        .await
        .map_err(|err| io::Error::other(format!("example data seeding failed: {err}")))?;
    info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        "example parcels seeded"
    );
    Ok(())
}

/// Wire the parcel service into the HTTP adapter state.
pub(crate) fn build_http_state(
    repository: Arc<dyn ParcelRepository>,
    api_key: ApiKey,
) -> web::Data<HttpState> {
    let service = Arc::new(ParcelService::new(repository));
    let ports = HttpStatePorts {
        parcels: service.clone(),
        parcel_commands: service,
    };
    web::Data::new(HttpState::new(ports, api_key))
}
