//! Auth-Service fuer Wortschatz
//!
//! Zentraler Service fuer Registrierung, Login, Logout und Token-Aufloesung.
//! Nutzt das BenutzerRepository und den In-Memory-SessionStore.

use std::sync::Arc;

use uuid::Uuid;

use wortschatz_db::{models::NeuerBenutzer, BenutzerRepository};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    session::{Session, SessionStore},
};

use wortschatz_db::models::BenutzerRecord;

/// Auth-Service - zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<B: BenutzerRepository> {
    benutzer_repo: Arc<B>,
    session_store: Arc<SessionStore>,
}

impl<B: BenutzerRepository> AuthService<B> {
    /// Erstellt einen neuen AuthService
    pub fn neu(benutzer_repo: Arc<B>, session_store: Arc<SessionStore>) -> Self {
        Self {
            benutzer_repo,
            session_store,
        }
    }

    /// Registriert einen neuen Benutzer und meldet ihn sofort an
    ///
    /// Die E-Mail wird exakt verglichen (keine Normalisierung). Eine bereits
    /// vergebene Adresse fuehrt zu `EmailVergeben`; der Eindeutigkeitsindex
    /// schliesst das Zeitfenster zwischen Pruefung und Insert.
    pub async fn registrieren(
        &self,
        name: &str,
        email: &str,
        passwort: &str,
    ) -> AuthResult<(BenutzerRecord, Session)> {
        if self.benutzer_repo.laden_nach_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email.to_string()));
        }

        let password_hash = passwort_hashen(passwort)?;

        let benutzer = self
            .benutzer_repo
            .erstellen(NeuerBenutzer {
                name,
                email,
                password_hash: &password_hash,
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben(email.to_string())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        // Registrierung stellt direkt eine Session aus
        let session = self.session_store.erstellen(benutzer.id).await?;

        tracing::info!(user_id = %benutzer.id, "Neuer Benutzer registriert");

        Ok((benutzer, session))
    }

    /// Prueft E-Mail/Passwort und gibt die Benutzer-ID zurueck
    ///
    /// "Benutzer unbekannt", "Passwort falsch" und ein Fehler beim
    /// Hash-Vergleich liefern denselben Fehler, damit sich Konten nicht
    /// per Antwortverhalten aufzaehlen lassen. Rein lesend.
    pub async fn anmeldedaten_pruefen(&self, email: &str, passwort: &str) -> AuthResult<Uuid> {
        let benutzer = self
            .benutzer_repo
            .laden_nach_email(email)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        match passwort_verifizieren(passwort, &benutzer.password_hash) {
            Ok(true) => Ok(benutzer.id),
            Ok(false) => {
                tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
                Err(AuthError::UngueltigeAnmeldedaten)
            }
            Err(e) => {
                tracing::warn!(email = %email, fehler = %e, "Passwortvergleich fehlgeschlagen");
                Err(AuthError::UngueltigeAnmeldedaten)
            }
        }
    }

    /// Meldet einen Benutzer an und erstellt eine neue Session
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<(Uuid, Session)> {
        let user_id = self.anmeldedaten_pruefen(email, passwort).await?;
        let session = self.session_store.erstellen(user_id).await?;

        tracing::info!(user_id = %user_id, "Benutzer angemeldet");

        Ok((user_id, session))
    }

    /// Meldet einen Benutzer ab und invalidiert die Session
    ///
    /// `SessionUngueltig` bedeutet: es gab nichts zu loeschen.
    pub async fn abmelden(&self, token: &str) -> AuthResult<()> {
        self.session_store.invalidieren(token).await?;
        tracing::debug!("Session invalidiert (Abmeldung)");
        Ok(())
    }

    /// Loest einen Session-Token zur Benutzer-ID auf (Auth-Gate-Backend)
    pub async fn session_aufloesen(&self, token: &str) -> AuthResult<Uuid> {
        let session = self.session_store.validieren(token).await?;
        Ok(session.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use wortschatz_db::DbResult;

    // Minimales In-Memory BenutzerRepository fuer Tests
    #[derive(Default)]
    struct TestBenutzerRepo {
        benutzer: Mutex<Vec<BenutzerRecord>>,
    }

    impl BenutzerRepository for TestBenutzerRepo {
        async fn erstellen(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
            let record = BenutzerRecord {
                id: Uuid::new_v4(),
                name: data.name.to_string(),
                email: data.email.to_string(),
                password_hash: data.password_hash.to_string(),
                warenkorb: Vec::new(),
                created_at: Utc::now(),
            };
            self.benutzer.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn laden(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
            Ok(self.benutzer.lock().unwrap().iter().find(|b| b.id == id).cloned())
        }

        async fn laden_nach_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
            Ok(self.benutzer.lock().unwrap().iter().find(|b| b.email == email).cloned())
        }

        async fn warenkorb_speichern(&self, id: Uuid, warenkorb: &[Uuid]) -> DbResult<()> {
            let mut benutzer = self.benutzer.lock().unwrap();
            let eintrag = benutzer
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| wortschatz_db::DbError::nicht_gefunden(id.to_string()))?;
            eintrag.warenkorb = warenkorb.to_vec();
            Ok(())
        }
    }

    fn test_service() -> AuthService<TestBenutzerRepo> {
        AuthService::neu(Arc::new(TestBenutzerRepo::default()), SessionStore::neu())
    }

    #[tokio::test]
    async fn registrieren_stellt_session_aus() {
        let service = test_service();

        let (benutzer, session) = service
            .registrieren("Ann", "ann@x.com", "geheim1")
            .await
            .expect("Registrierung fehlgeschlagen");

        assert_eq!(benutzer.email, "ann@x.com");
        assert!(!session.token.is_empty());

        // Der ausgestellte Token loest direkt zur Benutzer-ID auf
        let user_id = service.session_aufloesen(&session.token).await.unwrap();
        assert_eq!(user_id, benutzer.id);
    }

    #[tokio::test]
    async fn registrieren_dann_anmelden() {
        let service = test_service();

        let (benutzer, _) = service
            .registrieren("Ann", "ann@x.com", "geheim1")
            .await
            .unwrap();

        let (user_id, session) = service.anmelden("ann@x.com", "geheim1").await.unwrap();
        assert_eq!(user_id, benutzer.id);

        let aufgeloest = service.session_aufloesen(&session.token).await.unwrap();
        assert_eq!(aufgeloest, benutzer.id);
    }

    #[tokio::test]
    async fn doppelte_registrierung_schlaegt_fehl() {
        let service = test_service();
        service.registrieren("Eins", "doppelt@x.com", "pw_eins").await.unwrap();

        let ergebnis = service.registrieren("Zwei", "doppelt@x.com", "pw_zwei").await;
        assert!(matches!(ergebnis, Err(AuthError::EmailVergeben(_))));

        // Der Passwort-Hash des Originals bleibt unveraendert
        let (_, session) = service.anmelden("doppelt@x.com", "pw_eins").await.unwrap();
        assert!(!session.token.is_empty());
        let falsch = service.anmelden("doppelt@x.com", "pw_zwei").await;
        assert!(matches!(falsch, Err(AuthError::UngueltigeAnmeldedaten)));
    }

    #[tokio::test]
    async fn falsches_passwort_und_unbekannte_email_gleicher_fehler() {
        let service = test_service();
        service.registrieren("Ann", "ann@x.com", "richtig").await.unwrap();

        let falsches_pw = service.anmelden("ann@x.com", "falsch").await;
        let keine_email = service.anmelden("niemand@x.com", "egal").await;

        assert!(matches!(falsches_pw, Err(AuthError::UngueltigeAnmeldedaten)));
        assert!(matches!(keine_email, Err(AuthError::UngueltigeAnmeldedaten)));
    }

    #[tokio::test]
    async fn abmelden_invalidiert_session() {
        let service = test_service();
        service.registrieren("Ann", "ann@x.com", "geheim1").await.unwrap();
        let (_, session) = service.anmelden("ann@x.com", "geheim1").await.unwrap();

        service.abmelden(&session.token).await.unwrap();
        let ergebnis = service.session_aufloesen(&session.token).await;
        assert!(matches!(ergebnis, Err(AuthError::SessionUngueltig)));
    }

    #[tokio::test]
    async fn abmelden_ohne_session_gibt_fehler() {
        let service = test_service();
        let ergebnis = service.abmelden("nie_ausgestellt").await;
        assert!(matches!(ergebnis, Err(AuthError::SessionUngueltig)));
    }
}
