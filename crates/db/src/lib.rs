//! wortschatz-db - Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit: Benutzer- und
//! Wort-Datensaetze hinter schmalen Traits, implementiert fuer SQLite.
//! Sessions liegen bewusst NICHT hier - sie leben als TTL-Eintraege im
//! Speicher (siehe wortschatz-auth).

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

// Bequeme Re-Exporte
pub use error::DbError;
pub use repository::{BenutzerRepository, DatabaseConfig, DbResult, WortRepository};
pub use sqlite::SqliteDb;
