use tracing::debug;

use crate::engine::validate::validate_fields;
use crate::error::{StoreError, StoreResult};
use crate::storage::Catalog;
use crate::types::{ID_FIELD, Row, RowId};

pub fn handle_insert(
    catalog: &mut Catalog,
    table: &str,
    row: Row,
    validate: bool,
) -> StoreResult<RowId> {
    let t = catalog.table_mut(table)?;
    if validate {
        validate_fields(table, &t.schema, &row)?;
    }
    let id = t.append(row);
    debug!(table, id, "inserted row");
    Ok(id)
}

/// Shallow merge of `patch` into the row with `id`.
/// Fields absent from the patch are kept; an `id` key in the patch is ignored.
pub fn handle_update(
    catalog: &mut Catalog,
    table: &str,
    id: RowId,
    patch: Row,
    validate: bool,
) -> StoreResult<()> {
    let t = catalog.table_mut(table)?;
    // a missing row wins over a bad patch
    let idx = t.position(id).ok_or_else(|| StoreError::RowNotFound {
        table: table.to_string(),
        id,
    })?;
    if validate {
        validate_fields(table, &t.schema, &patch)?;
    }
    let row = &mut t.data[idx];

    let mut changed = 0usize;
    for (field, value) in patch {
        if field == ID_FIELD {
            continue;
        }
        row.insert(field, value);
        changed += 1;
    }
    debug!(table, id, changed, "updated row");
    Ok(())
}

pub fn handle_delete(catalog: &mut Catalog, table: &str, id: RowId) -> StoreResult<Row> {
    let t = catalog.table_mut(table)?;
    let removed = t.remove(id).ok_or_else(|| StoreError::RowNotFound {
        table: table.to_string(),
        id,
    })?;
    debug!(table, id, "deleted row");
    Ok(removed)
}
