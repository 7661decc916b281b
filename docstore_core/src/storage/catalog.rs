use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::schema::Schema;
use crate::storage::table::Table;

/// All tables of one database, in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tables: IndexMap<String, Table>,
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    tables: &'a IndexMap<String, Table>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tables: IndexMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a table exists in the catalog
    pub fn exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Installs an empty table.
    /// Returns an error if the name is already taken.
    pub fn create_table(&mut self, name: &str, schema: Schema) -> StoreResult<()> {
        if self.exists(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        self.tables.insert(name.to_string(), Table::new(schema));
        Ok(())
    }

    pub fn drop_table(&mut self, name: &str) -> StoreResult<Table> {
        self.tables
            .shift_remove(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table(&self, name: &str) -> StoreResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> StoreResult<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Writes the whole catalog as pretty JSON.
    ///
    /// The payload goes to a sibling `.tmp` file first, is synced, then renamed
    /// over `path`, so an interrupted save never leaves a truncated file.
    pub fn save_to_path(&self, path: &Path) -> StoreResult<()> {
        let payload = serde_json::to_string_pretty(&CatalogFileRef {
            tables: &self.tables,
        })?;

        let tmp = temp_path(path);
        if let Err(e) = write_synced(&tmp, payload.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }

        // best effort: make the rename itself durable
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = File::open(dir) {
                let _ = dir.sync_all();
            }
        }

        debug!(path = %path.display(), bytes = payload.len(), "saved database file");
        Ok(())
    }

    /// Loads a catalog from disk.
    /// A missing or blank file yields an empty catalog.
    pub fn load_from_path(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| StoreError::Deserialization {
                path: path.to_path_buf(),
                source,
            })?;

        let mut tables = file.tables;
        for (name, table) in tables.iter_mut() {
            let stale = table.next_id;
            if table.repair_next_id() {
                warn!(
                    table = %name,
                    stale,
                    repaired = table.next_id,
                    "nextId was not above the largest stored id"
                );
            }
        }

        Ok(Self { tables })
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `<file>.tmp` next to the target, so the final rename stays on one filesystem
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
