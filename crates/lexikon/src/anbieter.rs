//! Woerterbuch-Anbieter - HTTP-Client gegen die externe Definitions-API
//!
//! Die API liefert pro Wort eine Liste von Ergebnissen mit lexikalischen
//! Eintraegen. Ausgewertet wird ausschliesslich der erste lexikalische
//! Eintrag des ersten Ergebnisses; Bedeutungen ohne Beispielsaetze werden
//! verworfen. Jede Abweichung vom erwarteten Format fuehrt zu einem Fehler -
//! es wird nie ein Teilergebnis weitergereicht oder gecacht.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use wortschatz_db::models::Definition;

use crate::error::{LexikonError, LexikonResult};

/// Aufbereitete Wortdaten, unabhaengig vom Speicherformat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WortInfo {
    /// Kleingeschriebener Nachschlage-Schluessel
    pub wort: String,
    /// Wortart (kleingeschrieben)
    pub wortart: String,
    pub definitionen: Vec<Definition>,
}

/// Externer Woerterbuch-Anbieter
///
/// Als dyn-faehiges Trait geschnitten, damit Tests einen Stub einsetzen
/// koennen ohne HTTP zu sprechen.
#[async_trait]
pub trait WoerterbuchAnbieter: Send + Sync {
    /// Schlaegt ein (bereits kleingeschriebenes) Wort beim Anbieter nach
    async fn nachschlagen(&self, wort: &str) -> LexikonResult<WortInfo>;
}

/// Konfiguration fuer den HTTP-Anbieter
#[derive(Debug, Clone)]
pub struct AnbieterKonfig {
    /// Basis-URL, das Wort wird angehaengt
    pub api_url: String,
    /// Anwendungs-ID (Header `app_id`)
    pub app_id: String,
    /// API-Schluessel (Header `app_key`)
    pub app_key: String,
    /// Timeout fuer die Anfrage - der Anbieter ist der einzige externe
    /// Aufruf der einen Request unbegrenzt aufhalten koennte
    pub timeout_sekunden: u64,
}

impl Default for AnbieterKonfig {
    fn default() -> Self {
        Self {
            api_url: "https://od-api.oxforddictionaries.com/api/v2/entries/en-gb/".into(),
            app_id: String::new(),
            app_key: String::new(),
            timeout_sekunden: 10,
        }
    }
}

/// HTTP-Implementierung des Woerterbuch-Anbieters (reqwest)
pub struct HttpWoerterbuchAnbieter {
    konfig: AnbieterKonfig,
    client: reqwest::Client,
}

impl HttpWoerterbuchAnbieter {
    pub fn neu(konfig: AnbieterKonfig) -> LexikonResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(konfig.timeout_sekunden))
            .build()
            .map_err(|e| LexikonError::Anbieter(format!("Client-Aufbau: {e}")))?;

        Ok(Self { konfig, client })
    }
}

#[async_trait]
impl WoerterbuchAnbieter for HttpWoerterbuchAnbieter {
    async fn nachschlagen(&self, wort: &str) -> LexikonResult<WortInfo> {
        let url = format!("{}{}", self.konfig.api_url, wort);

        let antwort = self
            .client
            .get(&url)
            .header("app_id", &self.konfig.app_id)
            .header("app_key", &self.konfig.app_key)
            .send()
            .await
            .map_err(|e| LexikonError::Anbieter(e.to_string()))?;

        let status = antwort.status();
        if !status.is_success() {
            // 404 vom Anbieter heisst meist: kein echtes Wort
            return Err(LexikonError::Anbieter(format!(
                "Anbieter antwortete mit Status {status}"
            )));
        }

        let api_antwort: ApiAntwort = antwort
            .json()
            .await
            .map_err(|e| LexikonError::Antwortformat(e.to_string()))?;

        antwort_auswerten(wort, api_antwort)
    }
}

// ---------------------------------------------------------------------------
// Antwortformat des Anbieters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAntwort {
    #[serde(default)]
    pub results: Vec<ApiErgebnis>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErgebnis {
    #[serde(rename = "lexicalEntries", default)]
    pub lexical_entries: Vec<ApiLexikalischerEintrag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLexikalischerEintrag {
    #[serde(rename = "lexicalCategory")]
    pub lexical_category: ApiKategorie,
    #[serde(default)]
    pub entries: Vec<ApiEintrag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiKategorie {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiEintrag {
    #[serde(default)]
    pub senses: Vec<ApiSinn>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSinn {
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<ApiBeispiel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiBeispiel {
    pub text: String,
}

/// Wertet die Anbieter-Antwort aus: erster lexikalischer Eintrag des ersten
/// Ergebnisses, nur Bedeutungen mit mindestens einem Beispiel.
pub(crate) fn antwort_auswerten(wort: &str, antwort: ApiAntwort) -> LexikonResult<WortInfo> {
    let eintrag = antwort
        .results
        .first()
        .and_then(|r| r.lexical_entries.first())
        .ok_or_else(|| {
            LexikonError::Antwortformat("kein lexikalischer Eintrag vorhanden".into())
        })?;

    let erster = eintrag
        .entries
        .first()
        .ok_or_else(|| LexikonError::Antwortformat("Eintrag ohne entries".into()))?;

    let mut definitionen = Vec::new();
    for sinn in erster.senses.iter().filter(|s| !s.examples.is_empty()) {
        let definition = sinn
            .definitions
            .first()
            .ok_or_else(|| LexikonError::Antwortformat("Bedeutung ohne Definitionstext".into()))?;
        definitionen.push(Definition {
            definition: definition.clone(),
            beispiele: sinn.examples.iter().map(|b| b.text.clone()).collect(),
        });
    }

    Ok(WortInfo {
        wort: wort.to_string(),
        wortart: eintrag.lexical_category.text.to_lowercase(),
        definitionen,
    })
}
