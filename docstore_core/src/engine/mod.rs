pub mod ddl;
pub mod dml;
pub mod select;
pub mod validate;

pub use ddl::{handle_create_table, handle_drop_table};
pub use dml::{handle_delete, handle_insert, handle_update};
pub use select::{QueryOptions, QueryResult, RowFilter, handle_query};
pub use validate::validate_fields;
