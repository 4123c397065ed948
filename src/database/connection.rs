// Database Connection Management
//
// Handles PostgreSQL connection pooling using tokio-postgres and deadpool.
// All credential-store queries live here as methods on the owned
// connection wrapper, which is constructed once at startup and passed into
// the services.
use anyhow::{Context, Result, anyhow};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use std::env;
use std::time::Duration;

use crate::database::models::{FromRow, User, UserRecord};
use crate::errors::ApiError;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub max_size: usize,
    pub timeouts: deadpool_postgres::Timeouts,
}

impl DatabaseConfig {
    /// Create configuration from environment variables.
    ///
    /// `PG_HOST`, `PG_USER`, `PG_PASSWORD`, and `PG_DATABASE` are required;
    /// the rest have defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("PG_HOST")
                .map_err(|_| anyhow!("PG_HOST environment variable is required"))?,
            port: env::var("PG_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .unwrap_or(5432),
            user: env::var("PG_USER")
                .map_err(|_| anyhow!("PG_USER environment variable is required"))?,
            password: env::var("PG_PASSWORD")
                .map_err(|_| anyhow!("PG_PASSWORD environment variable is required"))?,
            dbname: env::var("PG_DATABASE")
                .map_err(|_| anyhow!("PG_DATABASE environment variable is required"))?,
            max_size: env::var("PG_POOL_SIZE")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .unwrap_or(16),
            timeouts: deadpool_postgres::Timeouts {
                wait: Some(Duration::from_secs(30)),
                create: Some(Duration::from_secs(30)),
                recycle: Some(Duration::from_secs(30)),
            },
        })
    }
}

/// Database connection wrapper
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: Pool,
}

impl DatabaseConnection {
    /// Create a new database connection with the provided configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let masked_host = format!("{}:{}/{}", config.host, config.port, config.dbname);
        tracing::info!("🔌 Connecting to database: {}", masked_host);

        let mut pg_config = tokio_postgres::Config::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.dbname(&config.dbname);

        let tls_connector = TlsConnector::builder()
            .build()
            .context("Failed to build TLS connector")?;
        let tls = MakeTlsConnector::new(tls_connector);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, tls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(config.max_size)
            .wait_timeout(config.timeouts.wait)
            .create_timeout(config.timeouts.create)
            .recycle_timeout(config.timeouts.recycle)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .context("Failed to create database pool")?;

        // Test the connection
        let client = pool
            .get()
            .await
            .context("Failed to get connection from pool")?;

        client
            .query("SELECT 1", &[])
            .await
            .context("Failed to test database connection")?;

        tracing::info!("✅ Database connection established successfully");

        Ok(Self { pool })
    }

    /// Run pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        crate::database::migrations::run_migrations(&self.pool).await
    }

    /// Insert a new user row. Email uniqueness is enforced solely by the
    /// UNIQUE constraint; a violation surfaces as `ApiError::Db` with
    /// SQLSTATE 23505 for the caller to re-kind.
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id, name, email",
                &[&name, &email, &password_hash],
            )
            .await?;
        Ok(User::from_row(&row)?)
    }

    /// Fetch the full credential row by email, hash included
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password_hash FROM users WHERE email = $1",
                &[&email],
            )
            .await?;
        row.map(|r| UserRecord::from_row(&r)).transpose().map_err(ApiError::from)
    }

    /// Fetch a user by id, without the password hash
    pub async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT id, name, email FROM users WHERE id = $1", &[&id])
            .await?;
        row.map(|r| User::from_row(&r)).transpose().map_err(ApiError::from)
    }

    /// Fetch all users in natural store order
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT id, name, email FROM users", &[])
            .await?;
        rows.iter()
            .map(|r| User::from_row(r).map_err(ApiError::from))
            .collect()
    }

    /// Overwrite name and email for a user. Returns `None` when the id does
    /// not exist; an email collision surfaces as SQLSTATE 23505.
    pub async fn update_user(
        &self,
        id: i32,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "UPDATE users SET name = $1, email = $2 WHERE id = $3 RETURNING id, name, email",
                &[&name, &email, &id],
            )
            .await?;
        row.map(|r| User::from_row(&r)).transpose().map_err(ApiError::from)
    }

    /// Hard-delete a user row. Returns the number of rows removed.
    pub async fn delete_user(&self, id: i32) -> Result<u64, ApiError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM users WHERE id = $1", &[&id])
            .await?;
        Ok(deleted)
    }
}
