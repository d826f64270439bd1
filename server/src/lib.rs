//! wortschatz-server - Bibliotheks-Root
//!
//! Verdrahtet Datenbank, Services und HTTP-Schicht und stellt den
//! oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::middleware;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use wortschatz_api::{
    rate_limit::{rate_limit_middleware, RateLimitState, RateLimiter},
    routes, ApiState,
};
use wortschatz_auth::SessionStore;
use wortschatz_db::SqliteDb;
use wortschatz_lexikon::HttpWoerterbuchAnbieter;

use config::ServerConfig;

/// Intervall fuer den Rate-Limiter-Bucket-Sweep
const RATE_LIMIT_SWEEP_INTERVALL: Duration = Duration::from_secs(5 * 60);

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbank oeffnen (inklusive Migrationen)
    /// 2. SessionStore mit Cleanup-Task starten
    /// 3. Woerterbuch-Anbieter und Services verdrahten
    /// 4. Router mit Rate-Limit-, Trace- und CORS-Layern bauen
    /// 5. HTTP-Server binden und auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        let db = Arc::new(SqliteDb::oeffnen(&self.config.datenbank_config()).await?);

        let sessions = SessionStore::mit_cleanup(SessionStore::neu());
        let anbieter = Arc::new(HttpWoerterbuchAnbieter::neu(self.config.anbieter_konfig())?);
        let state = ApiState::neu(db, Arc::clone(&sessions), anbieter);

        let limiter = RateLimiter::neu(self.config.rate_limit_konfig());
        {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move {
                let mut intervall = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVALL);
                loop {
                    intervall.tick().await;
                    limiter.cleanup();
                }
            });
        }

        // Im Produktionsmodus bedienen unbekannte Pfade das Frontend
        let router = if self.config.server.modus == "production" {
            tracing::info!(
                verzeichnis = %self.config.server.statisch_verzeichnis,
                "Statische Dateien werden bedient"
            );
            routes::api_router_mit_statik(&self.config.server.statisch_verzeichnis)
        } else {
            routes::api_router()
        };

        let rls = RateLimitState { limiter };
        let app = router
            // Rate Limiter als innerster Layer (laeuft vor den Handlern)
            .layer(middleware::from_fn_with_state(rls, rate_limit_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let bind_adresse = self.config.http_bind_adresse();
        let listener = tokio::net::TcpListener::bind(&bind_adresse).await?;
        tracing::info!(adresse = %bind_adresse, modus = %self.config.server.modus, "Wortschatz-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Shutdown-Signal nicht verfuegbar");
        return;
    }
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}
