use crate::web::state::AppState;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

/// GET /health: liveness plus a database connectivity probe.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let database = match state.db.get() {
        Ok(conn) => match conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
            Ok(_) => "connected",
            Err(_) => "disconnected",
        },
        Err(_) => "disconnected",
    };

    Json(serde_json::json!({
        "status": if database == "connected" { "ok" } else { "error" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}
