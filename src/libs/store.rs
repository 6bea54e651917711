// store.rs
use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::{Any, AnyPool, Transaction, query};
use tracing::warn;

use crate::libs::config::StoreConfig;
use crate::libs::error::{Result, SchemaError};

/// A relational store that schema statements can be applied to.
#[async_trait]
pub trait Store: Send + Sync {
    fn locator(&self) -> &str;

    async fn open(&self) -> Result<Box<dyn StoreConnection>>;
}

#[async_trait]
impl<T: Store + ?Sized> Store for &T {
    fn locator(&self) -> &str {
        (**self).locator()
    }

    async fn open(&self) -> Result<Box<dyn StoreConnection>> {
        (**self).open().await
    }
}

/// One unit of work against a store.
///
/// Work not followed by `commit` is rolled back when the connection closes.
#[async_trait]
pub trait StoreConnection: Send {
    async fn execute(&mut self, sql: &str) -> Result<()>;

    async fn commit(&mut self) -> Result<()>;

    async fn close(&mut self);
}

/// sqlx-backed store; the locator scheme picks the driver.
#[derive(Debug, Clone)]
pub struct SqlStore {
    config: StoreConfig,
}

impl SqlStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

impl Default for SqlStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl Store for SqlStore {
    fn locator(&self) -> &str {
        &self.config.locator
    }

    async fn open(&self) -> Result<Box<dyn StoreConnection>> {
        install_default_drivers();
        let locator = self.locator();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(locator)
            .await
            .map_err(SchemaError::store(locator))?;
        Ok(Box::new(SqlConnection {
            locator: locator.to_string(),
            pool,
            tx: None,
        }))
    }
}

struct SqlConnection {
    locator: String,
    pool: AnyPool,
    tx: Option<Transaction<'static, Any>>,
}

#[async_trait]
impl StoreConnection for SqlConnection {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        if self.tx.is_none() {
            let tx = self
                .pool
                .begin()
                .await
                .map_err(SchemaError::store(&self.locator))?;
            self.tx = Some(tx);
        }
        if let Some(tx) = self.tx.as_mut() {
            query(sql)
                .execute(&mut **tx)
                .await
                .map_err(SchemaError::store(&self.locator))?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await.map_err(SchemaError::store(&self.locator))?;
        }
        Ok(())
    }

    async fn close(&mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(error) = tx.rollback().await {
                warn!(locator = %self.locator, %error, "rollback failed, closing anyway");
            }
        }
        self.pool.close().await;
    }
}
