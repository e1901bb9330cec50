// Demo mode: an in-process backend speaking the storefront API
//
// Serves the same HTTP contract as the real backend over a seeded in-memory
// catalog, so the client can be tried without any external service:
//
//   STOREFRONT_DEMO=1 cargo run --release      (or: storefront --demo)
//
// Log in as alice@example.com / password123. The tests also use this server
// as a real HTTP peer for the API client.

mod catalog;
mod recommend;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog::{DemoStore, DemoUser, StoredInteraction};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Products endpoint never returns more than this
const PRODUCT_LIMIT: usize = 50;

/// Default `n` for the recommendations endpoint
const DEFAULT_RECOMMENDATIONS: usize = 10;

type SharedStore = Arc<Mutex<DemoStore>>;

/// Handle to a running demo backend
pub struct DemoServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    store: SharedStore,
}

impl DemoServer {
    /// Bind to `addr` (use port 0 for an ephemeral port) and start serving
    pub async fn start(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind demo backend to {}", addr))?;
        let addr = listener
            .local_addr()
            .context("Failed to read demo backend address")?;

        let store: SharedStore = Arc::new(Mutex::new(DemoStore::seeded()));
        let app = router(store.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Demo backend failed: {}", e);
            }
        });

        tracing::info!("Demo backend listening on http://{}", addr);

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
            store,
        })
    }

    /// Base URL to point the API client at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of interactions recorded so far, optionally of one kind
    #[cfg(test)]
    pub fn interaction_count(&self, kind: Option<&str>) -> usize {
        let store = self.store.lock().unwrap();
        store
            .interactions
            .iter()
            .filter(|i| kind.map_or(true, |k| i.kind == k))
            .count()
    }

    /// Stop serving and wait for the server task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
        let recorded = self.store.lock().map(|s| s.interactions.len()).unwrap_or(0);
        tracing::debug!("Demo backend stopped ({} interactions recorded)", recorded);
    }
}

fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/categories", get(categories))
        .route("/api/products", get(products))
        .route("/api/interactions", post(record_interaction))
        .route("/api/recommendations/:user_id", get(recommendations))
        .with_state(store)
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error responses carry `{"detail": "..."}` like the real backend
#[derive(Debug)]
enum DemoError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for DemoError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            DemoError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            DemoError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DemoError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DemoError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::debug!("Demo backend error: {} - {}", status, detail);

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

fn lock(store: &SharedStore) -> Result<std::sync::MutexGuard<'_, DemoStore>, DemoError> {
    store
        .lock()
        .map_err(|_| DemoError::Internal("Store lock poisoned".to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn root() -> Json<Value> {
    Json(json!({ "message": "E-commerce Recommendation API", "status": "running" }))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(store): State<SharedStore>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, DemoError> {
    let store = lock(&store)?;
    match store.user_by_email(&req.email) {
        Some(user) if user.password == req.password => Ok(Json(json!({
            "message": "Login successful",
            "user_id": user.id,
            "username": user.username,
        }))),
        _ => Err(DemoError::Unauthorized("Invalid credentials".to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    #[serde(default)]
    preferences: Vec<String>,
}

async fn register(
    State(store): State<SharedStore>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, DemoError> {
    let mut store = lock(&store)?;

    if store.user_by_email(&req.email).is_some() {
        return Err(DemoError::BadRequest("Email already registered".to_string()));
    }
    if store.users.iter().any(|u| u.username == req.username) {
        return Err(DemoError::BadRequest("Username already taken".to_string()));
    }

    let id = format!("u{:03}", store.users.len() + 1);
    store.users.push(DemoUser {
        id: id.clone(),
        username: req.username.clone(),
        email: req.email,
        password: req.password,
        preferences: req.preferences,
    });

    Ok(Json(json!({
        "message": "User registered successfully",
        "user_id": id,
        "username": req.username,
    })))
}

async fn categories(State(store): State<SharedStore>) -> Result<Json<Value>, DemoError> {
    let store = lock(&store)?;
    Ok(Json(json!({ "categories": store.categories() })))
}

#[derive(Debug, Deserialize)]
struct ProductParams {
    search: Option<String>,
    category: Option<String>,
}

async fn products(
    State(store): State<SharedStore>,
    Query(params): Query<ProductParams>,
) -> Result<Json<Value>, DemoError> {
    let store = lock(&store)?;
    let search = params.search.as_deref().filter(|s| !s.is_empty());
    let category = params.category.as_deref().filter(|c| !c.is_empty());

    let products = store.search(search, category, PRODUCT_LIMIT);
    let count = products.len();
    Ok(Json(json!({ "products": products, "count": count })))
}

#[derive(Debug, Deserialize)]
struct InteractionRequest {
    user_id: String,
    product_id: String,
    interaction_type: String,
}

async fn record_interaction(
    State(store): State<SharedStore>,
    Json(req): Json<InteractionRequest>,
) -> Result<Json<Value>, DemoError> {
    let mut store = lock(&store)?;

    if store.user(&req.user_id).is_none() || store.product(&req.product_id).is_none() {
        return Err(DemoError::NotFound("User or Product not found".to_string()));
    }

    store.interactions.push(StoredInteraction {
        user_id: req.user_id,
        product_id: req.product_id,
        kind: req.interaction_type,
    });

    Ok(Json(json!({
        "message": "Interaction tracked",
        "interaction_id": format!("i{:05}", store.interactions.len()),
    })))
}

#[derive(Debug, Deserialize)]
struct RecommendationParams {
    n: Option<usize>,
    method: Option<String>,
}

async fn recommendations(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<Value>, DemoError> {
    let store = lock(&store)?;
    let n = params.n.unwrap_or(DEFAULT_RECOMMENDATIONS);
    let method = params.method.unwrap_or_else(|| "collaborative".to_string());

    let recs = match (store.user(&user_id), method.as_str()) {
        (Some(user), "collaborative") => recommend::collaborative(&store, user, n),
        (Some(user), "content") => recommend::content_based(&store, user, n),
        (None, "collaborative" | "content") => recommend::popular(&store, n),
        _ => {
            return Err(DemoError::BadRequest(
                "Invalid method. Use 'collaborative' or 'content'".to_string(),
            ))
        }
    };

    let count = recs.len();
    Ok(Json(json!({
        "user_id": user_id,
        "method": method,
        "recommendations": recs,
        "count": count,
    })))
}
