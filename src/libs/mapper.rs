// mapper.rs
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::libs::error::{Result, SchemaError};
use crate::libs::schema::{ColumnDefinition, ColumnType, SchemaStatement, SemanticType, TypeDescriptor};
use crate::libs::store::Store;

/// Outcome of a successful `create_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCreated {
    pub table_name: String,
    pub locator: String,
    pub statement: String,
}

/// Builds the create-table statement for a descriptor without touching any store.
pub fn translate(descriptor: &TypeDescriptor) -> Result<SchemaStatement> {
    if descriptor.is_empty() {
        return Err(SchemaError::NoFields {
            table: descriptor.name().to_string(),
        });
    }

    let columns = descriptor
        .fields()
        .iter()
        .map(|(name, ty)| {
            if let SemanticType::Unknown(tag) = ty {
                warn!(table = descriptor.name(), field = %name, tag = %tag, "unrecognized type, storing as TEXT");
            }
            ColumnDefinition {
                name: name.clone(),
                column_type: ColumnType::from(ty),
            }
        })
        .collect();

    Ok(SchemaStatement {
        table_name: descriptor.name().to_string(),
        columns,
    })
}

/// Applies type descriptors to a store as tables.
pub struct SchemaMapper<S> {
    store: S,
}

impl<S: Store> SchemaMapper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates the descriptor's table unless it already exists.
    ///
    /// An existing table is left untouched, whatever its columns.
    pub async fn create_table(&self, descriptor: &TypeDescriptor) -> Result<TableCreated> {
        let statement = translate(descriptor)?;
        let sql = statement.to_sql();
        debug!(locator = self.store.locator(), %sql, "applying schema");

        let mut conn = self.store.open().await?;
        let applied = match conn.execute(&sql).await {
            Ok(()) => conn.commit().await,
            Err(e) => Err(e),
        };
        conn.close().await;
        applied?;

        info!(table = %statement.table_name, locator = self.store.locator(), "table ready");
        Ok(TableCreated {
            table_name: statement.table_name,
            locator: self.store.locator().to_string(),
            statement: sql,
        })
    }

    /// Creates each table in order, stopping at the first failure.
    pub async fn migrate(&self, descriptors: &[TypeDescriptor]) -> Result<Vec<TableCreated>> {
        let mut created = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            created.push(self.create_table(descriptor).await?);
        }
        Ok(created)
    }
}

/// One-shot form of [`SchemaMapper::create_table`].
pub async fn create_table<S: Store>(descriptor: &TypeDescriptor, store: &S) -> Result<TableCreated> {
    SchemaMapper::new(store).create_table(descriptor).await
}
