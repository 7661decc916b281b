use docstore_core::types::ID_FIELD;
use docstore_core::types::value::value_to_string;
use docstore_core::{Row, Schema};

/// Column order for a table view: `id`, the declared fields, then any
/// undeclared fields in order of first appearance.
pub fn columns(schema: &Schema, rows: &[Row]) -> Vec<String> {
    let mut cols = vec![ID_FIELD.to_string()];
    for name in schema.field_names() {
        if name != ID_FIELD {
            cols.push(name.to_string());
        }
    }
    for row in rows {
        for key in row.keys() {
            if !cols.iter().any(|c| c == key) {
                cols.push(key.clone());
            }
        }
    }
    cols
}

/// Formats rows as a tab-separated table
pub fn format_rows(schema: &Schema, rows: &[Row]) -> String {
    let cols = columns(schema, rows);
    let header = cols.join("\t");

    if rows.is_empty() {
        return header;
    }

    let row_lines = rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|c| row.get(c).map(value_to_string).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header, row_lines)
}

/// One line per field: `name  type  [pk]`
pub fn format_schema(schema: &Schema) -> String {
    schema
        .fields
        .iter()
        .map(|(name, spec)| {
            if spec.is_primary_key() {
                format!("{name}\t{}\tpk", spec.field_type)
            } else {
                format!("{name}\t{}", spec.field_type)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
