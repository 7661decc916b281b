use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::types::value::kind_name;
use crate::types::{ID_FIELD, Row};

/// Checks every declared field present in `row` against its declared type.
///
/// Undeclared fields pass through untouched and `id` is skipped since the
/// engine owns it.
pub fn validate_fields(table: &str, schema: &Schema, row: &Row) -> StoreResult<()> {
    for (name, value) in row {
        if name == ID_FIELD {
            continue;
        }
        let Some(spec) = schema.field(name) else {
            continue;
        };
        if !spec.field_type.accepts(value) {
            return Err(StoreError::Validation {
                table: table.to_string(),
                field: name.clone(),
                expected: spec.field_type,
                found: kind_name(value),
            });
        }
    }
    Ok(())
}
