//! Turns struct descriptors into relational tables.
//!
//! ```no_run
//! use schemamap::{SchemaMapper, SemanticType, SqlStore, StoreConfig, TypeDescriptor};
//!
//! # async fn run() -> schemamap::Result<()> {
//! let user = TypeDescriptor::new("User")
//!     .field("id", SemanticType::Integer)
//!     .field("name", SemanticType::Text);
//!
//! let mapper = SchemaMapper::new(SqlStore::new(StoreConfig::new("app.db")));
//! let created = mapper.create_table(&user).await?;
//! assert_eq!(created.table_name, "User");
//! # Ok(())
//! # }
//! ```

pub mod libs;

pub use libs::*;
pub use schemamap_derive::schema;
