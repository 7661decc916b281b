use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::schema::Schema;
use crate::types::{ID_FIELD, Row, RowId, row_id};

/// One table: its schema, rows in insertion order, and the id counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub schema: Schema,
    pub data: Vec<Row>,
    #[serde(rename = "nextId")]
    pub next_id: RowId,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            data: Vec::new(),
            next_id: 1,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Stamps `row` with the next id and appends it. Any caller-supplied id
    /// is overwritten.
    pub fn append(&mut self, mut row: Row) -> RowId {
        let id = self.next_id;
        row.insert(ID_FIELD.to_string(), Value::from(id));
        self.data.push(row);
        self.next_id += 1;
        id
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.data.iter().position(|r| row_id(r) == Some(id))
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.data.iter().find(|r| row_id(r) == Some(id))
    }

    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let idx = self.position(id)?;
        Some(self.data.remove(idx))
    }

    pub fn max_row_id(&self) -> Option<RowId> {
        self.data.iter().filter_map(row_id).max()
    }

    /// Restores `next_id > max(id)` for tables loaded from a hand-edited file.
    /// Returns true if the counter had to move.
    pub fn repair_next_id(&mut self) -> bool {
        let floor = self.max_row_id().map_or(1, |max| max + 1);
        if self.next_id < floor {
            self.next_id = floor;
            return true;
        }
        false
    }
}
