//! WarenkorbService - identitaetsgebundene Mutationen der Wortliste
//!
//! Alle Operationen verlangen eine bereits aufgeloeste Benutzer-ID; ohne
//! Identitaet gibt es keinen Aufrufpfad hierher. Der Warenkorb hat
//! Listen-Semantik: wiederholtes Hinzufuegen desselben Worts erzeugt
//! Duplikate, Entfernen loescht alle Vorkommen der ID.
//!
//! Die Mutationen sind read-modify-write: zwei gleichzeitige Aenderungen am
//! selben Benutzer koennen sich gegenseitig ueberschreiben (letzter
//! Schreiber gewinnt). Das ist eine bewusst uebernommene Einschraenkung.

use std::sync::Arc;

use uuid::Uuid;

use wortschatz_db::{models::WortDefRecord, BenutzerRepository, WortRepository};

use crate::error::{LexikonError, LexikonResult};

/// Service fuer Warenkorb-Mutationen
pub struct WarenkorbService<B: BenutzerRepository, W: WortRepository> {
    benutzer_repo: Arc<B>,
    wort_repo: Arc<W>,
}

impl<B: BenutzerRepository, W: WortRepository> WarenkorbService<B, W> {
    pub fn neu(benutzer_repo: Arc<B>, wort_repo: Arc<W>) -> Self {
        Self {
            benutzer_repo,
            wort_repo,
        }
    }

    /// Legt ein Wort in den Warenkorb und gibt dessen Cache-Eintrag zurueck
    ///
    /// Das Wort muss bereits im Cache liegen - diese Operation loest nie
    /// remote auf. Duplikate werden nicht herausgefiltert.
    pub async fn hinzufuegen(&self, user_id: Uuid, wort: &str) -> LexikonResult<WortDefRecord> {
        let schluessel = wort.to_lowercase();

        let wort_record = self
            .wort_repo
            .laden_nach_wort(&schluessel)
            .await?
            .ok_or_else(|| LexikonError::WortNichtGefunden(schluessel.clone()))?;

        let benutzer = self
            .benutzer_repo
            .laden(user_id)
            .await?
            .ok_or_else(|| LexikonError::BenutzerNichtGefunden(user_id.to_string()))?;

        let mut warenkorb = benutzer.warenkorb;
        warenkorb.push(wort_record.id);
        self.benutzer_repo
            .warenkorb_speichern(user_id, &warenkorb)
            .await?;

        tracing::debug!(user_id = %user_id, wort = %schluessel, "Wort in den Warenkorb gelegt");

        Ok(wort_record)
    }

    /// Entfernt alle Vorkommen einer Wort-ID aus dem Warenkorb
    ///
    /// Eine nicht vorhandene ID ist kein Fehler (No-Op).
    pub async fn entfernen(&self, user_id: Uuid, wort_id: Uuid) -> LexikonResult<()> {
        let benutzer = self
            .benutzer_repo
            .laden(user_id)
            .await?
            .ok_or_else(|| LexikonError::BenutzerNichtGefunden(user_id.to_string()))?;

        let mut warenkorb = benutzer.warenkorb;
        warenkorb.retain(|id| *id != wort_id);
        self.benutzer_repo
            .warenkorb_speichern(user_id, &warenkorb)
            .await?;

        tracing::debug!(user_id = %user_id, wort_id = %wort_id, "Wort aus dem Warenkorb entfernt");

        Ok(())
    }

    /// Leert den Warenkorb vollstaendig (idempotent, auch bei leerem Korb)
    pub async fn leeren(&self, user_id: Uuid) -> LexikonResult<()> {
        self.benutzer_repo
            .laden(user_id)
            .await?
            .ok_or_else(|| LexikonError::BenutzerNichtGefunden(user_id.to_string()))?;

        self.benutzer_repo.warenkorb_speichern(user_id, &[]).await?;

        tracing::debug!(user_id = %user_id, "Warenkorb geleert");

        Ok(())
    }
}
