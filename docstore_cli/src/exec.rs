use crate::client::TableClient;
use crate::format::{format_rows, format_schema};
use crate::parser::Command;

/// Runs a parsed command against `client` and renders its output
pub fn execute(cmd: Command, client: &dyn TableClient) -> anyhow::Result<String> {
    match cmd {
        Command::Tables => {
            let names = client.list_tables()?;
            if names.is_empty() {
                Ok("(no tables)".to_string())
            } else {
                Ok(names.join("\n"))
            }
        }
        Command::Create { table, schema } => {
            client.create_table(&table, &schema)?;
            if schema.is_empty() {
                Ok(format!("created table {table}"))
            } else {
                Ok(format!("created table {table}\n{}", format_schema(&schema)))
            }
        }
        Command::Show {
            table,
            sort_by,
            filter,
        } => {
            let filter = filter.as_ref().map(|(f, v)| (f.as_str(), v.as_str()));
            let result = client.table_data(&table, sort_by.as_deref(), filter)?;
            Ok(format_rows(&result.schema, &result.data))
        }
        Command::Insert { table, row } => {
            client.insert(&table, &row)?;
            Ok(format!("inserted row into {table}"))
        }
        Command::Update { table, id, patch } => {
            client.update(&table, id, &patch)?;
            Ok(format!("updated row {id} in {table}"))
        }
        Command::Delete { table, id } => {
            client.delete(&table, id)?;
            Ok(format!("deleted row {id} from {table}"))
        }
        Command::Drop { table } => {
            client.drop_table(&table)?;
            Ok(format!("dropped table {table}"))
        }
    }
}
