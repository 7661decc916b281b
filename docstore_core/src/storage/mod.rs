pub mod schema;
pub mod table;
pub mod catalog;

// Re-export main types for convenience
pub use schema::{FieldSpec, Schema};
pub use table::Table;
pub use catalog::Catalog;
