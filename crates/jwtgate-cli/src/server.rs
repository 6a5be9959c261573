//! Demo HTTP server with one protected route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use jwtgate::{Attachments, JwtAuth};
use serde_json::{json, Value};

/// `GET /health` (open) and `GET /whoami` (behind the JWT layer).
pub fn router(auth: JwtAuth) -> Router {
    let context_key = Arc::new(auth.config().context_key.clone());

    let protected = Router::new()
        .route("/whoami", get(whoami))
        .layer(auth.layer())
        .with_state(context_key);

    Router::new().route("/health", get(health)).merge(protected)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn whoami(
    State(context_key): State<Arc<String>>,
    Extension(attachments): Extension<Attachments>,
) -> Result<Json<Value>, StatusCode> {
    let token = attachments
        .get(&context_key)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    tracing::debug!(subject = ?token.subject(), "whoami");
    Ok(Json(Value::Object(token.claims.clone())))
}
