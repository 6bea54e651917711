pub mod config;
pub mod error;
pub mod mapper;
pub mod schema;
pub mod store;

// Re-export them for easier access from the crate root
pub use config::*;
pub use error::*;
pub use mapper::*;
pub use schema::*;
pub use store::*;
