//! wortschatz-lexikon - Wort-Domaene
//!
//! Dieses Crate implementiert:
//! - den Woerterbuch-Anbieter (HTTP-Client gegen die externe API)
//! - den WortService (Cache-first-Nachschlagen mit Best-Effort-Befuellung)
//! - den WarenkorbService (identitaetsgebundene Warenkorb-Mutationen)

pub mod anbieter;
pub mod error;
pub mod service;
pub mod warenkorb;

// Bequeme Re-Exporte
pub use anbieter::{AnbieterKonfig, HttpWoerterbuchAnbieter, WoerterbuchAnbieter, WortInfo};
pub use error::{LexikonError, LexikonResult};
pub use service::WortService;
pub use warenkorb::WarenkorbService;
