use anyhow::{Context, anyhow, bail};
use docstore_core::{Database, QueryOptions, QueryResult, Row, RowId, Schema};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// What the REPL needs from a table store, local or remote
pub trait TableClient {
    fn list_tables(&self) -> anyhow::Result<Vec<String>>;

    fn create_table(&self, name: &str, schema: &Schema) -> anyhow::Result<()>;

    fn table_data(
        &self,
        name: &str,
        sort_by: Option<&str>,
        filter: Option<(&str, &str)>,
    ) -> anyhow::Result<QueryResult>;

    fn insert(&self, name: &str, row: &Row) -> anyhow::Result<()>;

    fn update(&self, name: &str, id: RowId, patch: &Row) -> anyhow::Result<()>;

    fn delete(&self, name: &str, id: RowId) -> anyhow::Result<()>;

    fn drop_table(&self, name: &str) -> anyhow::Result<()>;
}

/// Opens the database file in-process
pub struct LocalClient {
    db: Database,
}

impl LocalClient {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl TableClient for LocalClient {
    fn list_tables(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.db.table_names())
    }

    fn create_table(&self, name: &str, schema: &Schema) -> anyhow::Result<()> {
        Ok(self.db.create_table(name, schema.clone())?)
    }

    fn table_data(
        &self,
        name: &str,
        sort_by: Option<&str>,
        filter: Option<(&str, &str)>,
    ) -> anyhow::Result<QueryResult> {
        let mut opts = QueryOptions::new();
        if let Some((field, value)) = filter {
            opts = opts.field_equals(field, value);
        }
        if let Some(field) = sort_by {
            opts = opts.sort_by(field);
        }
        Ok(self.db.query(name, &opts)?)
    }

    fn insert(&self, name: &str, row: &Row) -> anyhow::Result<()> {
        self.db.insert(name, row.clone())?;
        Ok(())
    }

    fn update(&self, name: &str, id: RowId, patch: &Row) -> anyhow::Result<()> {
        Ok(self.db.update(name, id, patch.clone())?)
    }

    fn delete(&self, name: &str, id: RowId) -> anyhow::Result<()> {
        Ok(self.db.delete(name, id)?)
    }

    fn drop_table(&self, name: &str) -> anyhow::Result<()> {
        Ok(self.db.drop_table(name)?)
    }
}

/// Talks to a running `docstore_server` over HTTP
pub struct RemoteClient {
    base: Url,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    message: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid server url '{base_url}'"))?;
        if base.cannot_be_a_base() {
            bail!("server url '{base_url}' cannot carry a path");
        }
        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// `<base>/tables[/<segment>...]`, each segment percent-encoded
    fn url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow!("server url cannot carry a path"))?;
            path.pop_if_empty().push("tables");
            for s in segments {
                path.push(s);
            }
        }
        Ok(url)
    }

    fn send(&self, req: RequestBuilder) -> anyhow::Result<Response> {
        let res = req.send().context("request to docstore server failed")?;
        let status = res.status();
        debug!(status = status.as_u16(), url = %res.url(), "server replied");
        if status.is_success() {
            return Ok(res);
        }
        match res.json::<FailureBody>() {
            Ok(body) => bail!("{} ({})", body.message, status),
            Err(_) => bail!("server returned {status}"),
        }
    }
}

impl TableClient for RemoteClient {
    fn list_tables(&self) -> anyhow::Result<Vec<String>> {
        let res = self.send(self.http.get(self.url(&[])?))?;
        Ok(res.json()?)
    }

    fn create_table(&self, name: &str, schema: &Schema) -> anyhow::Result<()> {
        let body = json!({ "name": name, "schema": schema });
        self.send(self.http.post(self.url(&[])?).json(&body))?;
        Ok(())
    }

    fn table_data(
        &self,
        name: &str,
        sort_by: Option<&str>,
        filter: Option<(&str, &str)>,
    ) -> anyhow::Result<QueryResult> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(field) = sort_by {
            params.push(("sortBy", field));
        }
        if let Some((field, value)) = filter {
            params.push(("field", field));
            params.push(("eq", value));
        }
        let res = self.send(self.http.get(self.url(&[name])?).query(&params))?;
        Ok(res.json()?)
    }

    fn insert(&self, name: &str, row: &Row) -> anyhow::Result<()> {
        self.send(self.http.post(self.url(&[name])?).json(row))?;
        Ok(())
    }

    fn update(&self, name: &str, id: RowId, patch: &Row) -> anyhow::Result<()> {
        let id = id.to_string();
        self.send(self.http.put(self.url(&[name, &id])?).json(patch))?;
        Ok(())
    }

    fn delete(&self, name: &str, id: RowId) -> anyhow::Result<()> {
        let id = id.to_string();
        self.send(self.http.delete(self.url(&[name, &id])?))?;
        Ok(())
    }

    fn drop_table(&self, name: &str) -> anyhow::Result<()> {
        self.send(self.http.delete(self.url(&[name])?))?;
        Ok(())
    }
}
