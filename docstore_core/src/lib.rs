use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::info;

pub mod error;
pub mod types;
pub mod storage;
pub mod engine;

pub use engine::{QueryOptions, QueryResult};
pub use error::{StoreError, StoreResult};
pub use storage::{Catalog, FieldSpec, Schema};
pub use types::datatype::FieldType;
pub use types::{Row, RowId};

/// Settings fixed when a database is opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Reject inserts and patches whose declared fields carry the wrong JSON kind.
    /// Off by default: rows are accepted as-is.
    pub validate_rows: bool,
}

/// A named collection of tables, written through to one JSON file.
///
/// Every operation takes the internal lock for its whole duration, so a
/// mutation and the file write that follows it are never interleaved with
/// another caller's. Share it across threads with an `Arc`.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    options: OpenOptions,
    catalog: Mutex<Catalog>,
}

/// `<dir>/<name>.json`
pub fn database_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.json"))
}

impl Database {
    /// Opens (or creates) the database `name` inside `dir`
    pub fn open(dir: impl AsRef<Path>, name: &str) -> StoreResult<Self> {
        Self::open_file(database_path(dir, name))
    }

    pub fn open_file(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with(path, OpenOptions::default())
    }

    /// Loads the file at `path`, or creates it holding an empty database
    pub fn open_with(path: impl Into<PathBuf>, options: OpenOptions) -> StoreResult<Self> {
        let path = path.into();
        let existed = path.exists();
        let catalog = Catalog::load_from_path(&path)?;

        if existed {
            info!(path = %path.display(), tables = catalog.table_count(), "loaded database");
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
            catalog.save_to_path(&path)?;
            info!(path = %path.display(), "created database");
        }

        Ok(Self {
            path,
            options,
            catalog: Mutex::new(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> OpenOptions {
        self.options
    }

    /// Runs `op` under the lock, then persists before releasing it
    fn mutate<T>(&self, op: impl FnOnce(&mut Catalog) -> StoreResult<T>) -> StoreResult<T> {
        let mut catalog = self.catalog.lock();
        let out = op(&mut catalog)?;
        catalog.save_to_path(&self.path)?;
        Ok(out)
    }

    pub fn create_table(&self, name: &str, schema: Schema) -> StoreResult<()> {
        self.mutate(|c| engine::handle_create_table(c, name, schema))
    }

    /// Appends `row` and returns the id the engine assigned to it
    pub fn insert(&self, table: &str, row: Row) -> StoreResult<RowId> {
        let validate = self.options.validate_rows;
        self.mutate(|c| engine::handle_insert(c, table, row, validate))
    }

    pub fn update(&self, table: &str, id: RowId, patch: Row) -> StoreResult<()> {
        let validate = self.options.validate_rows;
        self.mutate(|c| engine::handle_update(c, table, id, patch, validate))
    }

    pub fn delete(&self, table: &str, id: RowId) -> StoreResult<()> {
        self.mutate(|c| engine::handle_delete(c, table, id).map(|_| ()))
    }

    pub fn drop_table(&self, name: &str) -> StoreResult<()> {
        self.mutate(|c| engine::handle_drop_table(c, name))
    }

    pub fn query(&self, table: &str, options: &QueryOptions) -> StoreResult<QueryResult> {
        engine::handle_query(&self.catalog.lock(), table, options)
    }

    pub fn get_row(&self, table: &str, id: RowId) -> StoreResult<Row> {
        let catalog = self.catalog.lock();
        catalog
            .table(table)?
            .row(id)
            .cloned()
            .ok_or_else(|| StoreError::RowNotFound {
                table: table.to_string(),
                id,
            })
    }

    /// Table names in creation order
    pub fn table_names(&self) -> Vec<String> {
        self.catalog.lock().table_names()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.catalog.lock().exists(name)
    }

    /// Rewrites the file from the in-memory state
    pub fn save(&self) -> StoreResult<()> {
        self.catalog.lock().save_to_path(&self.path)
    }

    /// Replaces the in-memory state with what is currently on disk
    pub fn reload(&self) -> StoreResult<()> {
        let mut catalog = self.catalog.lock();
        *catalog = Catalog::load_from_path(&self.path)?;
        info!(path = %self.path.display(), tables = catalog.table_count(), "reloaded database");
        Ok(())
    }
}
