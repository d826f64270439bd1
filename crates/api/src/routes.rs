//! Route-Definitionen fuer die Wortschatz-API

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{handlers, ApiState};

fn routen() -> Router<ApiState> {
    Router::new()
        // Konto
        .route("/register", post(handlers::benutzer::register))
        .route("/login", post(handlers::benutzer::login))
        .route("/logout", post(handlers::benutzer::logout))
        .route("/profile", get(handlers::benutzer::profile))
        // Woerter
        .route("/define", get(handlers::woerter::define))
        // Warenkorb
        .route("/addWordToCart", post(handlers::woerter::add_word_to_cart))
        .route("/removeWord", post(handlers::woerter::remove_word))
        .route("/emptyCart", post(handlers::woerter::empty_cart))
}

/// Erstellt den vollstaendigen API-Router (unbekannte Pfade: JSON-404)
pub fn api_router() -> Router<ApiState> {
    routen().fallback(handlers::route_nicht_gefunden)
}

/// Router fuer den Produktionsmodus: unbekannte Pfade liefern statische
/// Dateien aus dem angegebenen Verzeichnis, mit index.html als Fallback.
pub fn api_router_mit_statik(verzeichnis: &str) -> Router<ApiState> {
    let index = std::path::Path::new(verzeichnis).join("index.html");
    routen().fallback_service(ServeDir::new(verzeichnis).not_found_service(ServeFile::new(index)))
}
