//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die SQLite-Implementierung liegt in
//! `crate::sqlite`, die Services in wortschatz-auth und wortschatz-lexikon
//! sind ueber diese Traits generisch und damit mit In-Memory-Stubs testbar.

use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer, NeuesWort, WortDefRecord};

/// Result-Alias fuer Datenbankoperationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://wortschatz.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://wortschatz.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait BenutzerRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen (leerer Warenkorb)
    async fn erstellen(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn laden(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seiner E-Mail laden (exakter Vergleich,
    /// keine Normalisierung der Gross-/Kleinschreibung)
    async fn laden_nach_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Den kompletten Warenkorb eines Benutzers ueberschreiben
    async fn warenkorb_speichern(&self, id: Uuid, warenkorb: &[Uuid]) -> DbResult<()>;
}

/// Repository fuer den Wort-Cache
#[allow(async_fn_in_trait)]
pub trait WortRepository: Send + Sync {
    /// Einen Wort-Eintrag anlegen.
    ///
    /// Der Schluessel `wort` ist eindeutig: existiert bereits ein Eintrag,
    /// wird dieser unveraendert zurueckgegeben (Konflikt wird ignoriert,
    /// damit parallele Erst-Lookups hoechstens einen Eintrag erzeugen).
    async fn erstellen(&self, data: NeuesWort<'_>) -> DbResult<WortDefRecord>;

    /// Einen Eintrag anhand des kleingeschriebenen Schluessels laden
    async fn laden_nach_wort(&self, wort: &str) -> DbResult<Option<WortDefRecord>>;
}
