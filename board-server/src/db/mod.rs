use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;

pub mod jobs;
pub mod models;

pub use models::{JobRecord, JobType, NewJob};

/// Migrations compiled into the binary, applied in order.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_jobs.sql",
    include_str!("../../migrations/001_create_jobs.sql"),
)];

/// Database-related errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database configuration error: {0}")]
    Config(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Persistence seam used by the submission handler and the read interface.
///
/// The store owns identifier and timestamp assignment: callers hand over a
/// validated [`NewJob`] and get back the stored [`JobRecord`].
pub trait JobStore: Send + Sync {
    /// Insert one posting, assigning its id and `created_at`.
    fn insert_job(&self, job: NewJob) -> Result<JobRecord>;

    /// All postings, newest first.
    fn list_jobs(&self) -> Result<Vec<JobRecord>>;
}

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Create a new database connection pool
    pub fn new(database_path: &str) -> Result<Self> {
        Self::with_pool_size(database_path, 10)
    }

    /// Create a new pool capped at `max_size` connections
    pub fn with_pool_size(database_path: &str, max_size: u32) -> Result<Self> {
        tracing::info!(path = %database_path, max_size, "Connecting to database");

        let is_memory = database_path == ":memory:" || database_path.contains("mode=memory");

        if !is_memory {
            if let Some(parent) = std::path::Path::new(database_path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbError::Config(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        // Shared cache keeps every pooled connection on the same in-memory database
        let connection_string = if database_path == ":memory:" {
            "file::memory:?cache=shared"
        } else {
            database_path
        };

        let manager = SqliteConnectionManager::file(connection_string).with_init(move |conn| {
            if !is_memory {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            Ok(())
        });

        let pool = Pool::builder().max_size(max_size).build(manager)?;

        tracing::info!("Database connected successfully");

        Ok(Self { pool })
    }

    /// Run database migrations
    pub fn migrate(&self) -> Result<()> {
        let conn = self.pool.get()?;

        for (name, sql) in MIGRATIONS {
            tracing::info!(migration = %name, "Applying migration");
            conn.execute_batch(sql)?;
        }

        tracing::info!(count = MIGRATIONS.len(), "Migrations completed successfully");
        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_conn(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

#[cfg(test)]
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(test)]
static TEST_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create a unique in-memory database for testing
/// Each call returns a new isolated database
#[cfg(test)]
pub(crate) fn create_test_db() -> Database {
    let id = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db_name = format!("file:jobs_testdb{}?mode=memory&cache=shared", id);
    let db = Database::new(&db_name).expect("Failed to create test database");
    db.migrate().expect("Failed to run migrations");
    db
}
