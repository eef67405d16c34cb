//! Embedded PostgreSQL helpers shared by the Diesel integration tests.
//!
//! Each suite boots its own `pg-embed-setup-unpriv` cluster, recreates a
//! named database and applies the crate's embedded migrations. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start; otherwise a failed
//! bootstrap fails the test.

use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use diesel::{Connection, RunQueryDsl, pg::PgConnection, sql_query};
use pg_embedded_setup_unpriv::TestCluster;
use swissparcel::outbound::persistence::run_migrations;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const BOOTSTRAP_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Start a cluster, retrying binary downloads that fail transiently.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _guard = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let mut last_error = String::new();
    for attempt in 1..=BOOTSTRAP_ATTEMPTS {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                let lowered = last_error.to_lowercase();
                let transient = ["timed out", "timeout", "connection reset", "dns error"]
                    .iter()
                    .any(|pattern| lowered.contains(pattern));
                if !transient || attempt == BOOTSTRAP_ATTEMPTS {
                    break;
                }
                thread::sleep(RETRY_DELAY * attempt);
            }
        }
    }
    Err(last_error)
}

/// Drop and recreate `name`, then migrate it. Returns its connection URL.
pub fn fresh_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = PgConnection::establish(&admin_url).map_err(|err| err.to_string())?;
    sql_query(format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut admin)
        .map_err(|err| err.to_string())?;
    sql_query(format!("CREATE DATABASE \"{name}\""))
        .execute(&mut admin)
        .map_err(|err| err.to_string())?;

    let url = cluster.connection().database_url(name);
    run_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
