mod postgres_reference_store;
mod query_builder;
mod sqlite_reference_store;

pub use postgres_reference_store::PostgresReferenceStore;
pub use query_builder::{IdentifierQuote, QueryBuilder};
pub use sqlite_reference_store::SqliteReferenceStore;
