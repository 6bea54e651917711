// error.rs

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("type `{table}` declares no fields; a table needs at least one column")]
    NoFields { table: String },

    #[error("store `{locator}` is unavailable: {source}")]
    StoreUnavailable {
        locator: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid type descriptor: {0}")]
    InvalidDescriptor(#[source] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn store(locator: &str) -> impl FnOnce(sqlx::Error) -> SchemaError + '_ {
        move |source| SchemaError::StoreUnavailable {
            locator: locator.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
