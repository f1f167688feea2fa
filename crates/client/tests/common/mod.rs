//! In-process stub of the back-office API.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use tesoreria_client::ApiClient;
use tesoreria_shared::config::{ApiConfig, AppConfig, CacheConfig, SessionConfig};
use tesoreria_shared::types::Cents;

/// Acting user configured on every test client.
pub const USER: i64 = 7;

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Default)]
pub struct StubState {
    pub requests: Vec<Recorded>,
    pub accounts: HashMap<i64, Value>,
    pub next_id: i64,
    pub account_list_hits: usize,
    pub applied_keys: HashSet<String>,
    pub applied: Vec<(i64, String)>,
    /// Available balance per cheque; an application lowers it.
    pub balances: HashMap<i64, Cents>,
    pub fail_cheque: Option<i64>,
}

/// Shared stub state.
#[derive(Clone, Default)]
pub struct Backend(Arc<Mutex<StubState>>);

impl Backend {
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.0.lock().expect("stub state lock")
    }

    fn record(&self, path: String, query: Option<String>, headers: HeaderMap, body: Value) {
        self.state().requests.push(Recorded {
            path,
            query,
            headers,
            body,
        });
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn ok(data: Value) -> Response {
    Json(json!({ "ok": true, "data": data })).into_response()
}

fn fail(status: StatusCode, code: &str, message: &str, details: Option<Value>) -> Response {
    let mut body = json!({ "ok": false, "code": code, "mensajeError": message });
    if let Some(details) = details {
        body["details"] = details;
    }
    (status, Json(body)).into_response()
}

async fn create_account(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/banco-cuentas".into(), None, headers, body.clone());
    let mut state = backend.state();
    state.next_id += 1;
    let id = state.next_id;
    let mut account = body;
    account["id"] = json!(id);
    account["activa"] = json!(true);
    state.accounts.insert(id, account.clone());
    ok(account)
}

async fn list_accounts(State(backend): State<Backend>, RawQuery(query): RawQuery) -> Response {
    backend.record("/banco-cuentas".into(), query, HeaderMap::new(), Value::Null);
    let mut state = backend.state();
    state.account_list_hits += 1;
    let accounts: Vec<Value> = state.accounts.values().cloned().collect();
    // Plain arrays, without the envelope, are accepted too.
    Json(Value::Array(accounts)).into_response()
}

async fn get_account(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    backend.record(format!("/banco-cuentas/{id}"), query, HeaderMap::new(), Value::Null);
    match backend.state().accounts.get(&id) {
        Some(account) => ok(account.clone()),
        None => fail(StatusCode::NOT_FOUND, "NO_ENCONTRADO", "Cuenta inexistente", None),
    }
}

async fn delete_account(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    backend.record(format!("/banco-cuentas/{id}"), query.clone(), HeaderMap::new(), Value::Null);
    if query.as_deref().is_some_and(|q| q.contains("force=true")) {
        if let Some(account) = backend.state().accounts.get_mut(&id) {
            account["activa"] = json!(false);
        }
        return ok(Value::Null);
    }
    fail(
        StatusCode::CONFLICT,
        "CUENTA_CON_MOVIMIENTOS",
        "La cuenta tiene movimientos",
        None,
    )
}

async fn create_checkbook(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/chequeras".into(), None, headers, body.clone());
    let desde = body["nro_desde"].as_i64().unwrap_or_default();
    if desde <= 100 {
        return fail(
            StatusCode::CONFLICT,
            "CHEQUERA_RANGO_SUPERPUESTO",
            "El rango se superpone con otra chequera",
            Some(json!({ "sugerencia": { "nro_desde": 101, "nro_hasta": 150 } })),
        );
    }
    let mut checkbook = body;
    checkbook["id"] = json!(30);
    checkbook["activa"] = json!(true);
    ok(checkbook)
}

async fn apply_cheque(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(format!("/cheques-usos/usar/{id}"), None, headers.clone(), body.clone());
    let mut state = backend.state();
    if state.fail_cheque == Some(id) {
        return fail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "SALDO_INSUFICIENTE",
            "El cheque no tiene saldo suficiente",
            None,
        );
    }
    let key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !state.applied_keys.insert(key) {
        return ok(json!({ "cheque_id": id, "duplicado": true }));
    }
    let monto = body["monto_usado"].as_str().unwrap_or_default().to_string();
    if let (Some(balance), Ok(used)) = (
        state.balances.get_mut(&id),
        serde_json::from_value::<Cents>(body["monto_usado"].clone()),
    ) {
        *balance -= used;
    }
    state.applied.push((id, monto));
    ok(json!({ "cheque_id": id, "duplicado": false }))
}

async fn transition(
    State(backend): State<Backend>,
    Path((id, action)): Path<(i64, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(format!("/cheques/{id}/{action}"), None, headers, body);
    let estado = match action.as_str() {
        "depositar" => "depositado",
        "entregar" => "entregado",
        _ => "registrado",
    };
    ok(json!({
        "id": id,
        "tipo": "recibido",
        "numero": 1001,
        "monto": "1000.00",
        "estado": estado,
    }))
}

async fn upload_image(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    let mut fields = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes");
        if name == "file" {
            fields.insert("file_name".into(), json!(file_name));
            fields.insert("content_type".into(), json!(content_type));
            fields.insert("size".into(), json!(bytes.len()));
        } else {
            fields.insert(name, json!(String::from_utf8_lossy(&bytes)));
        }
    }
    let tipo = fields.get("tipo").cloned().unwrap_or(Value::Null);
    backend.record(
        format!("/cheques/{id}/imagenes"),
        None,
        HeaderMap::new(),
        Value::Object(fields),
    );
    ok(json!({ "id": 55, "cheque_id": id, "tipo": tipo }))
}

async fn download_image(Path((_id, _image)): Path<(i64, i64)>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"dorso\""),
        ],
        vec![0x89, b'P', b'N', b'G'],
    )
        .into_response()
}

async fn record_event(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    backend.record(format!("/cheques/{id}/eventos"), None, HeaderMap::new(), body);
    (StatusCode::INTERNAL_SERVER_ERROR, "event store down").into_response()
}

async fn create_stock(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/stock-movimientos".into(), None, HeaderMap::new(), body.clone());
    let mut movement = body;
    movement["id"] = json!(900);
    ok(movement)
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    ok(Value::Null)
}

async fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

fn router(backend: Backend) -> Router {
    let api = Router::new()
        .route("/banco-cuentas", post(create_account).get(list_accounts))
        .route("/banco-cuentas/{id}", get(get_account).delete(delete_account))
        .route("/chequeras", post(create_checkbook))
        .route("/cheques-usos/usar/{id}", post(apply_cheque))
        .route("/cheques/{id}/imagenes", post(upload_image))
        .route("/cheques/{id}/imagenes/{image}", get(download_image))
        .route("/cheques/{id}/eventos", post(record_event))
        .route("/cheques/{id}/{action}", post(transition))
        .route("/stock-movimientos", post(create_stock))
        .route("/slow", get(slow))
        .route("/gateway", delete(bad_gateway).get(bad_gateway));
    Router::new().nest("/api", api).with_state(backend)
}

/// Starts the stub on an ephemeral port and returns its API base URL.
pub async fn spawn(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router(backend))
            .await
            .expect("serve stub");
    });
    format!("http://{addr}/api")
}

/// Client configuration pointing at `base_url`, acting as [`USER`].
pub fn config(base_url: &str) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            timeout_secs: 1,
            ..ApiConfig::new(base_url)
        },
        session: SessionConfig {
            usuario_id: Some(USER),
        },
        cache: CacheConfig::default(),
    }
}

/// Spawns a fresh stub and a client for it.
pub async fn client() -> (ApiClient, Backend) {
    let backend = Backend::default();
    let base_url = spawn(backend.clone()).await;
    let client = ApiClient::new(&config(&base_url)).expect("client");
    (client, backend)
}
