use schemamap::*;
use tracing_subscriber::EnvFilter;

#[schema]
#[derive(Debug)]
#[allow(dead_code)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub is_active: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::default(),
    };

    let mapper = SchemaMapper::new(SqlStore::new(config));
    let created = mapper.create_table(&User::descriptor()).await?;
    tracing::info!(table = %created.table_name, store = %created.locator, "done");

    Ok(())
}
