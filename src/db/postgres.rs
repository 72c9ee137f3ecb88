use crate::db::retry::{is_transient_connect, is_transient_write, RetryPolicy};
use crate::models::employee::{Employee, NewEmployee};
use log::info;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

/// How long one attempt may wait for a pooled connection.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PgStore {
    pub async fn connect(options: PgConnectOptions, retry: RetryPolicy) -> Result<Self, sqlx::Error> {
        let pool = retry
            .run_when("database connect", is_transient_connect, || {
                PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_with(options.clone())
            })
            .await?;
        info!("Connected to PostgreSQL");
        Ok(PgStore { pool, retry })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    pub async fn has_employees(&self) -> Result<bool, sqlx::Error> {
        self.retry
            .run("employee existence check", || {
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees)")
                    .fetch_one(&self.pool)
            })
            .await
    }

    pub async fn fetch_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        self.retry
            .run("employee listing", || {
                sqlx::query_as::<_, Employee>("SELECT id, name, joining_date FROM employees ORDER BY id")
                    .fetch_all(&self.pool)
            })
            .await
    }

    pub async fn insert(&self, draft: NewEmployee) -> Result<Employee, sqlx::Error> {
        self.retry
            .run_when("employee insert", is_transient_write, || {
                sqlx::query_as::<_, Employee>(
                    "INSERT INTO employees (name, joining_date) VALUES ($1, $2) RETURNING id, name, joining_date",
                )
                .bind(&draft.name)
                .bind(draft.joining_date)
                .fetch_one(&self.pool)
            })
            .await
    }

    /// Inserts every draft inside one transaction.
    pub async fn insert_many(&self, drafts: Vec<NewEmployee>) -> Result<Vec<Employee>, sqlx::Error> {
        self.retry
            .run_when("employee batch insert", is_transient_write, || async {
                let mut tx = self.pool.begin().await?;
                let mut stored = Vec::with_capacity(drafts.len());
                for draft in &drafts {
                    let employee = sqlx::query_as::<_, Employee>(
                        "INSERT INTO employees (name, joining_date) VALUES ($1, $2) RETURNING id, name, joining_date",
                    )
                    .bind(&draft.name)
                    .bind(draft.joining_date)
                    .fetch_one(&mut *tx)
                    .await?;
                    stored.push(employee);
                }
                tx.commit().await?;
                Ok::<_, sqlx::Error>(stored)
            })
            .await
    }
}
