//! SQLite-Implementierung der Repositories

mod benutzer;
mod pool;
mod woerter;

pub use pool::SqliteDb;
