use tracing::debug;

use crate::error::StoreResult;
use crate::storage::{Catalog, Schema};

pub fn handle_create_table(catalog: &mut Catalog, name: &str, schema: Schema) -> StoreResult<()> {
    let fields = schema.field_count();
    catalog.create_table(name, schema)?;
    debug!(table = name, fields, "created table");
    Ok(())
}

pub fn handle_drop_table(catalog: &mut Catalog, name: &str) -> StoreResult<()> {
    let dropped = catalog.drop_table(name)?;
    debug!(table = name, rows = dropped.row_count(), "dropped table");
    Ok(())
}
