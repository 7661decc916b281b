use docstore_core::{Row, RowId, Schema};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tables,

    Create {
        table: String,
        schema: Schema,
    },

    Show {
        table: String,
        sort_by: Option<String>,
        filter: Option<(String, String)>,
    },

    Insert {
        table: String,
        row: Row,
    },

    Update {
        table: String,
        id: RowId,
        patch: Row,
    },

    Delete {
        table: String,
        id: RowId,
    },

    Drop {
        table: String,
    },
}
