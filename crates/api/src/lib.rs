//! wortschatz-api - HTTP-Schicht (Axum)
//!
//! Dieses Crate buendelt Routen, Handler, das Auth-Gate und den
//! Rate Limiter. Die Fachlogik lebt in wortschatz-auth und
//! wortschatz-lexikon; hier wird nur noch HTTP auf Services abgebildet.

pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::Response,
};
use uuid::Uuid;

use wortschatz_auth::{AuthService, SessionStore};
use wortschatz_db::SqliteDb;
use wortschatz_lexikon::{WarenkorbService, WoerterbuchAnbieter, WortService};

use crate::middleware::fehler_antwort;

/// Axum-State fuer den Wortschatz-Server
#[derive(Clone)]
pub struct ApiState {
    pub auth: Arc<AuthService<SqliteDb>>,
    pub woerter: Arc<WortService<SqliteDb>>,
    pub warenkorb: Arc<WarenkorbService<SqliteDb, SqliteDb>>,
    pub sessions: Arc<SessionStore>,
    pub benutzer_repo: Arc<SqliteDb>,
}

impl ApiState {
    /// Verdrahtet alle Services auf einer gemeinsamen Datenbank
    pub fn neu(
        db: Arc<SqliteDb>,
        sessions: Arc<SessionStore>,
        anbieter: Arc<dyn WoerterbuchAnbieter>,
    ) -> Self {
        let auth = Arc::new(AuthService::neu(Arc::clone(&db), Arc::clone(&sessions)));
        let woerter = Arc::new(WortService::neu(Arc::clone(&db), anbieter));
        let warenkorb = Arc::new(WarenkorbService::neu(Arc::clone(&db), Arc::clone(&db)));

        Self {
            auth,
            woerter,
            warenkorb,
            sessions,
            benutzer_repo: db,
        }
    }
}

/// Loest den Session-Token aus den Request-Headern zur Benutzer-ID auf
///
/// Der `authorization`-Header wird woertlich als Token verglichen (kein
/// "Bearer "-Praefix, das ist Teil des Wire-Vertrags). Fehlender Header
/// ergibt 401, ein unbekannter oder abgelaufener Token 400. Das Gate ist
/// rein lesend und veraendert den SessionStore nie.
pub async fn benutzer_aus_headers(
    headers: &HeaderMap,
    state: &ApiState,
) -> Result<Uuid, Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            fehler_antwort(StatusCode::UNAUTHORIZED, "Nicht authentifiziert", None)
        })?;

    match state.sessions.validieren(token).await {
        Ok(session) => Ok(session.user_id),
        Err(_) => Err(fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Autorisierung verweigert",
            None,
        )),
    }
}
