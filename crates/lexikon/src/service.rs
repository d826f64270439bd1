//! WortService - Cache-first-Nachschlagen
//!
//! Aufloesung eines Worts bevorzugt den lokalen Cache; erst bei einem Miss
//! wird der externe Anbieter gefragt. Eintraege altern nicht und werden nie
//! aktualisiert (append-only Cache ohne Invalidierung).

use std::sync::Arc;

use wortschatz_db::{
    models::{NeuesWort, WortDefRecord},
    WortRepository,
};

use crate::{
    anbieter::{WoerterbuchAnbieter, WortInfo},
    error::LexikonResult,
};

impl From<WortDefRecord> for WortInfo {
    fn from(record: WortDefRecord) -> Self {
        Self {
            wort: record.wort,
            wortart: record.wortart,
            definitionen: record.definitionen,
        }
    }
}

/// Service fuer Wort-Aufloesung mit lokalem Cache und externem Fallback
pub struct WortService<W: WortRepository> {
    wort_repo: Arc<W>,
    anbieter: Arc<dyn WoerterbuchAnbieter>,
}

impl<W: WortRepository> WortService<W> {
    pub fn neu(wort_repo: Arc<W>, anbieter: Arc<dyn WoerterbuchAnbieter>) -> Self {
        Self { wort_repo, anbieter }
    }

    /// Loest ein Wort auf: Cache-Treffer sofort, sonst Anbieter-Abfrage.
    ///
    /// Das frisch geholte Ergebnis wird best-effort in den Cache
    /// geschrieben: ein Fehler beim Schreiben wird geloggt und verschluckt,
    /// denn der Lesepfad ist zu diesem Zeitpunkt bereits erfolgreich.
    pub async fn nachschlagen(&self, wort: &str) -> LexikonResult<WortInfo> {
        let schluessel = wort.to_lowercase();

        if let Some(record) = self.wort_repo.laden_nach_wort(&schluessel).await? {
            tracing::debug!(wort = %schluessel, "Cache-Treffer");
            return Ok(record.into());
        }

        let info = self.anbieter.nachschlagen(&schluessel).await?;

        if let Err(e) = self
            .wort_repo
            .erstellen(NeuesWort {
                wort: &info.wort,
                wortart: &info.wortart,
                definitionen: &info.definitionen,
            })
            .await
        {
            // Bewusst verschluckt: Cache-Befuellung ist nicht Teil des Lesepfads
            tracing::warn!(wort = %schluessel, fehler = %e, "Cache-Befuellung fehlgeschlagen");
        } else {
            tracing::debug!(wort = %schluessel, "Wort in den Cache uebernommen");
        }

        Ok(info)
    }

    /// Reiner Cache-Lookup, loest nie remote auf (fuer den Warenkorb)
    pub async fn aus_cache(&self, wort: &str) -> LexikonResult<Option<WortDefRecord>> {
        let schluessel = wort.to_lowercase();
        Ok(self.wort_repo.laden_nach_wort(&schluessel).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexikonError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;
    use wortschatz_db::models::Definition;
    use wortschatz_db::{DbError, DbResult};

    // In-Memory WortRepository fuer Tests
    #[derive(Default)]
    struct TestWortRepo {
        woerter: Mutex<Vec<WortDefRecord>>,
    }

    impl WortRepository for TestWortRepo {
        async fn erstellen(&self, data: NeuesWort<'_>) -> DbResult<WortDefRecord> {
            let mut woerter = self.woerter.lock().unwrap();
            if let Some(vorhanden) = woerter.iter().find(|w| w.wort == data.wort) {
                return Ok(vorhanden.clone());
            }
            let record = WortDefRecord {
                id: Uuid::new_v4(),
                wort: data.wort.to_string(),
                wortart: data.wortart.to_string(),
                definitionen: data.definitionen.to_vec(),
                created_at: Utc::now(),
            };
            woerter.push(record.clone());
            Ok(record)
        }

        async fn laden_nach_wort(&self, wort: &str) -> DbResult<Option<WortDefRecord>> {
            Ok(self.woerter.lock().unwrap().iter().find(|w| w.wort == wort).cloned())
        }
    }

    // WortRepository dessen Schreibpfad immer fehlschlaegt
    struct KaputtesWortRepo;

    impl WortRepository for KaputtesWortRepo {
        async fn erstellen(&self, _data: NeuesWort<'_>) -> DbResult<WortDefRecord> {
            Err(DbError::intern("Schreibpfad defekt"))
        }

        async fn laden_nach_wort(&self, _wort: &str) -> DbResult<Option<WortDefRecord>> {
            Ok(None)
        }
    }

    // Anbieter-Stub mit Aufrufzaehler
    struct StubAnbieter {
        aufrufe: AtomicU32,
        fehler: bool,
    }

    impl StubAnbieter {
        fn neu() -> Self {
            Self { aufrufe: AtomicU32::new(0), fehler: false }
        }

        fn defekt() -> Self {
            Self { aufrufe: AtomicU32::new(0), fehler: true }
        }

        fn anzahl_aufrufe(&self) -> u32 {
            self.aufrufe.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WoerterbuchAnbieter for StubAnbieter {
        async fn nachschlagen(&self, wort: &str) -> LexikonResult<WortInfo> {
            self.aufrufe.fetch_add(1, Ordering::SeqCst);
            if self.fehler {
                return Err(LexikonError::Anbieter("Stub-Fehler".into()));
            }
            Ok(WortInfo {
                wort: wort.to_string(),
                wortart: "noun".into(),
                definitionen: vec![Definition {
                    definition: format!("Bedeutung von {wort}"),
                    beispiele: vec![format!("Beispiel mit {wort}")],
                }],
            })
        }
    }

    #[tokio::test]
    async fn cache_miss_fragt_anbieter_und_befuellt_cache() {
        let repo = Arc::new(TestWortRepo::default());
        let anbieter = Arc::new(StubAnbieter::neu());
        let service = WortService::neu(Arc::clone(&repo), anbieter.clone());

        let info = service.nachschlagen("cat").await.unwrap();
        assert_eq!(info.wort, "cat");
        assert_eq!(anbieter.anzahl_aufrufe(), 1);

        let gecacht = service.aus_cache("cat").await.unwrap();
        assert!(gecacht.is_some());
    }

    #[tokio::test]
    async fn cache_treffer_fragt_anbieter_nicht() {
        let repo = Arc::new(TestWortRepo::default());
        let anbieter = Arc::new(StubAnbieter::neu());
        let service = WortService::neu(Arc::clone(&repo), anbieter.clone());

        service.nachschlagen("cat").await.unwrap();
        service.nachschlagen("cat").await.unwrap();

        assert_eq!(anbieter.anzahl_aufrufe(), 1);
    }

    #[tokio::test]
    async fn nachschlagen_ist_case_insensitiv() {
        let repo = Arc::new(TestWortRepo::default());
        let anbieter = Arc::new(StubAnbieter::neu());
        let service = WortService::neu(Arc::clone(&repo), anbieter.clone());

        let gross = service.nachschlagen("Cat").await.unwrap();
        let klein = service.nachschlagen("cat").await.unwrap();

        // Identischer Inhalt, genau ein Anbieter-Aufruf, ein Cache-Eintrag
        assert_eq!(gross, klein);
        assert_eq!(anbieter.anzahl_aufrufe(), 1);
        assert_eq!(repo.woerter.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn anbieterfehler_wird_durchgereicht() {
        let repo = Arc::new(TestWortRepo::default());
        let service = WortService::neu(Arc::clone(&repo), Arc::new(StubAnbieter::defekt()));

        let ergebnis = service.nachschlagen("cat").await;
        assert!(matches!(ergebnis, Err(LexikonError::Anbieter(_))));
        // Nichts wurde teilweise gecacht
        assert!(repo.woerter.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cache_schreibfehler_bricht_lesepfad_nicht() {
        let service = WortService::neu(Arc::new(KaputtesWortRepo), Arc::new(StubAnbieter::neu()));

        let info = service.nachschlagen("cat").await.unwrap();
        assert_eq!(info.wort, "cat");
    }

    #[tokio::test]
    async fn aus_cache_loest_nie_remote_auf() {
        let repo = Arc::new(TestWortRepo::default());
        let anbieter = Arc::new(StubAnbieter::neu());
        let service = WortService::neu(repo, anbieter.clone());

        let ergebnis = service.aus_cache("Cat").await.unwrap();
        assert!(ergebnis.is_none());
        assert_eq!(anbieter.anzahl_aufrufe(), 0);
    }
}
