//! wortschatz-auth - Auth- und Session-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Session-Management (in-memory mit fester TTL, keine gleitende Ablaufzeit)
//! - AuthService (Registrierung, Login, Logout, Token-Aufloesung)

pub mod error;
pub mod password;
pub mod service;
pub mod session;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::AuthService;
pub use session::{Session, SessionStore};
