use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service info
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Notebook API",
            "version": version,
            "description": "Token-authenticated notes backend API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "list": "GET /api/notes/fetchallnotes (protected)",
                "create": "POST /api/notes/addnote (protected)",
                "update": "PUT /api/notes/updatenote/:id (protected)",
                "delete": "DELETE /api/notes/deletenote/:id (protected)",
            }
        }
    }))
}
