//! Embedded PostgreSQL helpers for the Diesel adapter suites.
//!
//! Every test gets its own temporary database on a process-wide cluster from
//! `pg-embed-setup-unpriv`, with `sql/schema.sql` applied. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start; otherwise a setup
//! failure fails the test.

use std::time::Duration;

use board_backend::outbound::persistence::{DbPool, PoolConfig};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

const SCHEMA: &str = include_str!("../../sql/schema.sql");
const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "board_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Run raw SQL outside the pool, e.g. to reshape fixtures or drop tables.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| err.to_string())?;
    client.batch_execute(sql).map_err(|err| err.to_string())
}

/// A schema-initialised database plus the runtime that drives the adapters.
///
/// Adapter calls go through [`TestDatabase::block_on`]; the tests themselves
/// stay synchronous so the blocking cluster bootstrap never runs inside Tokio.
pub struct TestDatabase {
    runtime: Runtime,
    pool: DbPool,
    url: String,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = cluster
            .temporary_database(format!("board_{}", uuid::Uuid::new_v4().simple()))
            .map_err(|err| format!("create temporary database: {err:?}"))?;
        let url = database.url().to_string();
        execute_sql(&url, SCHEMA).map_err(|err| format!("apply schema: {err}"))?;

        let config = PoolConfig::new(&url).with_max_size(2);
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _database: database,
        })
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "block_on must not be called from inside a Tokio runtime"
        );
        self.runtime.block_on(future)
    }
}

/// Fresh database for one test, or `None` when cluster tests are skipped.
pub fn test_database() -> Option<TestDatabase> {
    match TestDatabase::provision() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
