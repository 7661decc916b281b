use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use crate::storage::{Catalog, Schema};
use crate::types::{Row, RowId, row_id};
use crate::types::value::{compare_values, value_to_string};

pub type RowFilter = Box<dyn Fn(&Row) -> bool + Send + Sync>;

/// Optional filter and sort applied to a table snapshot
#[derive(Default)]
pub struct QueryOptions {
    pub filter: Option<RowFilter>,
    pub sort_by: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only rows for which `pred` returns true.
    /// The predicate runs while the database lock is held and must not call
    /// back into the same database.
    pub fn filter<F>(mut self, pred: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(pred));
        self
    }

    /// Keeps rows whose `field` renders to exactly `expected`
    /// (strings unquoted, numbers as JSON text).
    pub fn field_equals(self, field: impl Into<String>, expected: impl Into<String>) -> Self {
        let field = field.into();
        let expected = expected.into();
        self.filter(move |row| {
            row.get(&field)
                .is_some_and(|v| !v.is_null() && value_to_string(v) == expected)
        })
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("sort_by", &self.sort_by)
            .finish()
    }
}

/// Owned snapshot returned by a query; changing it never touches the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<Row>,
    pub schema: Schema,
}

impl QueryResult {
    /// Row ids in result order
    pub fn ids(&self) -> Vec<RowId> {
        self.data.iter().filter_map(row_id).collect()
    }
}

pub fn handle_query(catalog: &Catalog, table: &str, options: &QueryOptions) -> StoreResult<QueryResult> {
    let t = catalog.table(table)?;

    let mut data: Vec<Row> = match &options.filter {
        Some(pred) => t.data.iter().filter(|r| pred(*r)).cloned().collect(),
        None => t.data.clone(),
    };

    if let Some(field) = &options.sort_by {
        data.sort_by(|a, b| compare_values(a.get(field), b.get(field)));
    }

    debug!(table, rows = data.len(), sort_by = ?options.sort_by, "queried table");
    Ok(QueryResult {
        data,
        schema: t.schema.clone(),
    })
}
