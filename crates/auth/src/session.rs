//! Session-Management fuer Wortschatz
//!
//! Bearer-Tokens werden im Speicher gehalten (HashMap mit absoluter
//! Ablaufzeit). Die TTL betraegt fest 3 Tage und wird durch Nutzung NICHT
//! verlaengert - ein aktiver Benutzer ist nach 3 Tagen abgemeldet. Ein
//! Hintergrund-Task bereinigt abgelaufene Eintraege; die Validierung prueft
//! die Ablaufzeit zusaetzlich selbst und haengt damit nicht am Task.

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use rand::RngCore;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Feste Session-Lebensdauer: 3 Tage (keine gleitende Ablaufzeit)
pub const SESSION_TTL_SEKUNDEN: i64 = 3 * 24 * 60 * 60;

/// Intervall fuer den automatischen Cleanup-Task: 15 Minuten
const CLEANUP_INTERVALL: Duration = Duration::from_secs(15 * 60);

/// Ein aktives Session-Token
#[derive(Debug, Clone)]
pub struct Session {
    /// Der Token-String (URL-sicheres Base64, 32 Zufallsbytes)
    pub token: String,
    /// ID des Benutzers dem diese Session gehoert
    pub user_id: Uuid,
    /// Zeitpunkt der Session-Erstellung
    pub erstellt_am: DateTime<Utc>,
    /// Absoluter Zeitpunkt des Session-Ablaufs
    pub laeuft_ab_am: DateTime<Utc>,
}

impl Session {
    /// Gibt `true` zurueck wenn die Session noch gueltig ist
    pub fn ist_gueltig(&self) -> bool {
        Utc::now() < self.laeuft_ab_am
    }
}

/// In-Memory Session-Store mit TTL-Unterstuetzung
#[derive(Debug, Default)]
pub struct SessionStore {
    /// token -> Session
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Erstellt einen neuen leeren Session-Store
    pub fn neu() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Startet den Cleanup-Task auf einem bestehenden Store
    pub fn mit_cleanup(store: Arc<Self>) -> Arc<Self> {
        let store_klon = Arc::clone(&store);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLEANUP_INTERVALL).await;
                let entfernt = store_klon.cleanup_abgelaufene().await;
                if entfernt > 0 {
                    tracing::debug!(anzahl = entfernt, "Abgelaufene Sessions bereinigt");
                }
            }
        });
        store
    }

    /// Erstellt eine neue Session fuer den angegebenen Benutzer
    ///
    /// Schlaegt das Speichern fehl, darf der Aufrufer den Benutzer NICHT
    /// als angemeldet behandeln.
    pub async fn erstellen(&self, user_id: Uuid) -> AuthResult<Session> {
        let token = token_generieren();
        let jetzt = Utc::now();
        let session = Session {
            token: token.clone(),
            user_id,
            erstellt_am: jetzt,
            laeuft_ab_am: jetzt + chrono::Duration::seconds(SESSION_TTL_SEKUNDEN),
        };

        self.sessions.write().await.insert(token, session.clone());
        tracing::debug!(user_id = %user_id, "Neue Session erstellt");
        Ok(session)
    }

    /// Validiert einen Session-Token und gibt die Session zurueck
    ///
    /// Nicht vorhandene und abgelaufene Tokens sind fuer den Aufrufer
    /// ununterscheidbar (`AuthError::SessionUngueltig`). Liest nur,
    /// veraendert den Store nie.
    pub async fn validieren(&self, token: &str) -> AuthResult<Session> {
        let sessions = self.sessions.read().await;
        match sessions.get(token) {
            Some(session) if session.ist_gueltig() => Ok(session.clone()),
            _ => Err(AuthError::SessionUngueltig),
        }
    }

    /// Invalidiert (loescht) eine Session anhand des Tokens
    ///
    /// Gibt `AuthError::SessionUngueltig` zurueck wenn kein solcher Token
    /// existierte - "nichts zu loeschen" und "geloescht" sind fuer die
    /// Logout-Statusmeldung verschiedene Faelle.
    pub async fn invalidieren(&self, token: &str) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(token) {
            Some(_) => {
                tracing::debug!("Session invalidiert");
                Ok(())
            }
            None => Err(AuthError::SessionUngueltig),
        }
    }

    /// Bereinigt abgelaufene Sessions und gibt die Anzahl der entfernten zurueck
    pub async fn cleanup_abgelaufene(&self) -> usize {
        let jetzt = Utc::now();
        let mut sessions = self.sessions.write().await;
        let vorher = sessions.len();
        sessions.retain(|_, s| s.laeuft_ab_am > jetzt);
        vorher - sessions.len()
    }

    /// Gibt die Anzahl der aktiven (nicht abgelaufenen) Sessions zurueck
    pub async fn anzahl_aktive(&self) -> usize {
        let jetzt = Utc::now();
        let sessions = self.sessions.read().await;
        sessions.values().filter(|s| s.laeuft_ab_am > jetzt).count()
    }

    /// Setzt die Ablaufzeit einer Session (nur fuer Tests)
    #[cfg(test)]
    pub(crate) async fn ablauf_setzen(&self, token: &str, laeuft_ab_am: DateTime<Utc>) {
        if let Some(session) = self.sessions.write().await.get_mut(token) {
            session.laeuft_ab_am = laeuft_ab_am;
        }
    }
}

/// Generiert einen kryptografisch sicheren Session-Token (URL-sicheres Base64)
///
/// Der Token ist reiner Zufall und aus der Benutzeridentitaet nicht
/// ableitbar; ohne den serverseitigen Store laesst er sich nicht faelschen.
fn token_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}
