//! Hilfsfunktionen fuer Handler: Fehlerantworten und Client-IP

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Extrahiert die Client-IP aus den Request-Headern
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Einheitliche JSON-Fehlerantwort
///
/// Payload-Form: `{"error": {"message": ..., "detail": ...?}}` - `detail`
/// erscheint nur wenn vorhanden.
pub fn fehler_antwort(status: StatusCode, nachricht: &str, detail: Option<String>) -> Response {
    let mut fehler = json!({ "message": nachricht });
    if let Some(d) = detail {
        fehler["detail"] = json!(d);
    }
    (status, Json(json!({ "error": fehler }))).into_response()
}
