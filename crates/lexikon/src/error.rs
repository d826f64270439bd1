//! Fehlertypen fuer das Lexikon-Crate

use thiserror::Error;

/// Alle moeglichen Fehler in der Wort-Domaene
#[derive(Debug, Error)]
pub enum LexikonError {
    // --- Externer Anbieter ---
    #[error("Anbieter-Anfrage fehlgeschlagen: {0}")]
    Anbieter(String),

    #[error("Unerwartetes Antwortformat des Anbieters: {0}")]
    Antwortformat(String),

    // --- Warenkorb ---
    /// Das Wort liegt nicht im Cache; der Warenkorb loest nie remote auf.
    #[error("Wort nicht im Cache: {0}")]
    WortNichtGefunden(String),

    #[error("Benutzer nicht gefunden: {0}")]
    BenutzerNichtGefunden(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] wortschatz_db::DbError),
}

/// Result-Alias fuer die Wort-Domaene
pub type LexikonResult<T> = Result<T, LexikonError>;
