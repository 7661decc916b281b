use std::env;
use std::path::PathBuf;

use docstore_core::database_path;

/// Server settings. Defaults to `127.0.0.1:4000` serving `./data/my-database.json`;
/// every field can be overridden from `DOCSTORE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub database: String,
    pub validate_rows: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            data_dir: PathBuf::from("./data"),
            database: "my-database".to_string(),
            validate_rows: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_overrides(|key| env::var(key).ok());
        cfg
    }

    /// Applies `DOCSTORE_HOST`, `DOCSTORE_PORT`, `DOCSTORE_DATA_DIR`,
    /// `DOCSTORE_DB` and `DOCSTORE_VALIDATE` from `lookup`.
    /// Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("DOCSTORE_HOST") {
            self.host = v;
        }
        if let Some(p) = lookup("DOCSTORE_PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.port = p;
        }
        if let Some(v) = lookup("DOCSTORE_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("DOCSTORE_DB").filter(|v| !v.trim().is_empty()) {
            self.database = v;
        }
        if let Some(v) = lookup("DOCSTORE_VALIDATE") {
            self.validate_rows = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_path(&self) -> PathBuf {
        database_path(&self.data_dir, &self.database)
    }
}
