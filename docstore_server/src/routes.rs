use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use docstore_core::{Database, QueryOptions, QueryResult, Row, RowId, Schema, StoreResult};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTableBody {
    pub name: String,
    #[serde(default)]
    pub schema: Schema,
}

/// Query string accepted by `GET /tables/{name}`
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub field: Option<String>,
    pub eq: Option<String>,
}

impl TableQuery {
    fn into_options(self) -> ApiResult<QueryOptions> {
        let mut opts = QueryOptions::new();
        match (self.field, self.eq) {
            (Some(field), Some(expected)) => opts = opts.field_equals(field, expected),
            (None, None) => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "'field' and 'eq' must be given together".to_string(),
                ));
            }
        }
        if let Some(sort_by) = self.sort_by.filter(|s| !s.is_empty()) {
            opts = opts.sort_by(sort_by);
        }
        Ok(opts)
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/tables", get(list_tables).post(create_table))
        .route(
            "/tables/{name}",
            get(table_data).post(insert_row).delete(drop_table),
        )
        .route("/tables/{name}/{id}", put(update_row).delete(delete_row))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Engine calls do synchronous file I/O, so they run on the blocking pool
async fn with_db<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let db = Arc::clone(&state.db);
    let out = tokio::task::spawn_blocking(move || op(&db)).await??;
    Ok(out)
}

async fn list_tables(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = with_db(&state, |db| Ok(db.table_names())).await?;
    Ok(Json(names))
}

async fn create_table(
    State(state): State<AppState>,
    Json(body): Json<CreateTableBody>,
) -> ApiResult<Json<Value>> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Table name must not be empty".to_string()));
    }
    debug!(table = %body.name, fields = body.schema.field_count(), "create table request");
    let CreateTableBody { name, schema } = body;
    with_db(&state, move |db| db.create_table(&name, schema)).await?;
    Ok(success())
}

async fn table_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<TableQuery>,
) -> ApiResult<Json<QueryResult>> {
    let opts = params.into_options()?;
    let result = with_db(&state, move |db| db.query(&name, &opts)).await?;
    Ok(Json(result))
}

async fn insert_row(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(row): Json<Row>,
) -> ApiResult<Json<Value>> {
    with_db(&state, move |db| db.insert(&name, row)).await?;
    Ok(success())
}

async fn update_row(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, RowId)>,
    Json(patch): Json<Row>,
) -> ApiResult<Json<Value>> {
    with_db(&state, move |db| db.update(&name, id, patch)).await?;
    Ok(success())
}

async fn delete_row(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, RowId)>,
) -> ApiResult<Json<Value>> {
    with_db(&state, move |db| db.delete(&name, id)).await?;
    Ok(success())
}

async fn drop_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    with_db(&state, move |db| db.drop_table(&name)).await?;
    Ok(success())
}

/// Allows any origin, answering preflights directly
async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut res = StatusCode::NO_CONTENT.into_response();
        allow_any_origin(res.headers_mut());
        return res;
    }
    let mut res = next.run(req).await;
    allow_any_origin(res.headers_mut());
    res
}

fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("content-type"));
}
