pub mod datatype;
pub mod value;

use serde_json::{Map, Value};

/// Name of the engine-owned identity field carried by every stored row
pub const ID_FIELD: &str = "id";

/// Row ids are assigned by the engine, starting at 1
pub type RowId = u64;

/// A row is a JSON object keyed by field name
pub type Row = Map<String, Value>;

/// Returns the engine-assigned id of a row, if it has one
pub fn row_id(row: &Row) -> Option<RowId> {
    row.get(ID_FIELD).and_then(Value::as_u64)
}
