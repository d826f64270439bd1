//! Datenbankmodelle fuer Wortschatz
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind reine Datenuebertragungsobjekte ohne Geschaeftslogik.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
///
/// Der Warenkorb ist eine geordnete Liste von Wort-IDs. Duplikate sind
/// zulaessig (Listen-, keine Mengen-Semantik). Die Eintraege sind schwache
/// Referenzen: ein geloeschtes Wort raeumt keine Warenkoerbe auf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub warenkorb: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Woerter
// ---------------------------------------------------------------------------

/// Eine einzelne Bedeutung mit ihren Beispielsaetzen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    pub beispiele: Vec<String>,
}

/// Wort-Datensatz aus dem lokalen Cache
///
/// `wort` ist der kleingeschriebene Nachschlage-Schluessel. Eintraege werden
/// einmal geschrieben und danach weder aktualisiert noch geloescht
/// (append-only Cache ohne Invalidierung).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WortDefRecord {
    pub id: Uuid,
    pub wort: String,
    pub wortart: String,
    pub definitionen: Vec<Definition>,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Wort-Eintrags
#[derive(Debug, Clone)]
pub struct NeuesWort<'a> {
    pub wort: &'a str,
    pub wortart: &'a str,
    pub definitionen: &'a [Definition],
}
