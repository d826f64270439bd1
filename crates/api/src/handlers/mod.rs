//! HTTP-Handler fuer die Wortschatz-API

pub mod benutzer;
pub mod woerter;

use axum::{http::StatusCode, response::Response};

use crate::middleware::fehler_antwort;

/// Fallback fuer unbekannte Routen
pub async fn route_nicht_gefunden() -> Response {
    fehler_antwort(StatusCode::NOT_FOUND, "Route existiert nicht", None)
}
