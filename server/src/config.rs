//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Die Anbieter-Zugangsdaten und das Logging lassen sich
//! zusaetzlich per Umgebungsvariablen uebersteuern.

use serde::{Deserialize, Serialize};

use wortschatz_api::rate_limit::RateLimitKonfig;
use wortschatz_db::DatabaseConfig;
use wortschatz_lexikon::AnbieterKonfig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Woerterbuch-Anbieter-Einstellungen
    pub lexikon: LexikonEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Rate-Limit-Einstellungen
    pub rate_limit: RateLimitEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse fuer die HTTP-API
    pub bind_adresse: String,
    /// Port fuer die HTTP-API
    pub port: u16,
    /// Betriebsmodus: "development" oder "production"
    pub modus: String,
    /// Verzeichnis mit statischen Dateien (nur im Produktionsmodus bedient)
    pub statisch_verzeichnis: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3000,
            modus: "development".into(),
            statisch_verzeichnis: "public".into(),
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://wortschatz.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Woerterbuch-Anbieter-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexikonEinstellungen {
    /// Basis-URL der Definitions-API (das Wort wird angehaengt)
    pub api_url: String,
    /// Anwendungs-ID (auch per WORTSCHATZ_APP_ID)
    pub app_id: String,
    /// API-Schluessel (auch per WORTSCHATZ_APP_KEY)
    pub app_key: String,
    /// Timeout fuer Anbieter-Anfragen in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for LexikonEinstellungen {
    fn default() -> Self {
        let konfig = AnbieterKonfig::default();
        Self {
            api_url: konfig.api_url,
            app_id: String::new(),
            app_key: String::new(),
            timeout_sekunden: konfig.timeout_sekunden,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    /// (auch per WORTSCHATZ_LOG_LEVEL)
    pub level: String,
    /// Format: "json" oder "text" (auch per WORTSCHATZ_LOG_FORMAT)
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Rate-Limit-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitEinstellungen {
    /// Maximale Anfragen pro Fenster pro IP
    pub anfragen_pro_ip: u32,
    /// Maximale Anfragen pro Fenster insgesamt
    pub anfragen_global: u32,
    /// Fensterlaenge in Minuten
    pub fenster_minuten: u64,
}

impl Default for RateLimitEinstellungen {
    fn default() -> Self {
        Self {
            anfragen_pro_ip: 100,
            anfragen_global: 2000,
            fenster_minuten: 15,
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert;
    /// Umgebungsvariablen werden danach in beiden Faellen angewendet.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };

        config.overrides_anwenden(
            std::env::var("WORTSCHATZ_APP_ID").ok(),
            std::env::var("WORTSCHATZ_APP_KEY").ok(),
            std::env::var("WORTSCHATZ_LOG_LEVEL").ok(),
            std::env::var("WORTSCHATZ_LOG_FORMAT").ok(),
        );

        Ok(config)
    }

    /// Wendet Umgebungs-Overrides auf die geladene Konfiguration an
    fn overrides_anwenden(
        &mut self,
        app_id: Option<String>,
        app_key: Option<String>,
        log_level: Option<String>,
        log_format: Option<String>,
    ) {
        if let Some(v) = app_id {
            self.lexikon.app_id = v;
        }
        if let Some(v) = app_key {
            self.lexikon.app_key = v;
        }
        if let Some(v) = log_level {
            self.logging.level = v;
        }
        if let Some(v) = log_format {
            self.logging.format = v;
        }
    }

    /// Gibt die vollstaendige Bind-Adresse fuer die HTTP-API zurueck
    pub fn http_bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }

    /// Baut die Datenbank-Konfiguration
    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
        }
    }

    /// Baut die Anbieter-Konfiguration
    pub fn anbieter_konfig(&self) -> AnbieterKonfig {
        AnbieterKonfig {
            api_url: self.lexikon.api_url.clone(),
            app_id: self.lexikon.app_id.clone(),
            app_key: self.lexikon.app_key.clone(),
            timeout_sekunden: self.lexikon.timeout_sekunden,
        }
    }

    /// Baut die Rate-Limit-Konfiguration
    pub fn rate_limit_konfig(&self) -> RateLimitKonfig {
        RateLimitKonfig {
            anfragen_pro_ip: self.rate_limit.anfragen_pro_ip,
            anfragen_global: self.rate_limit.anfragen_global,
            fenster_sekunden: self.rate_limit.fenster_minuten * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.modus, "development");
        assert_eq!(cfg.datenbank.url, "sqlite://wortschatz.db");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.rate_limit.anfragen_pro_ip, 100);
        assert_eq!(cfg.rate_limit.fenster_minuten, 15);
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_bind_adresse(), "0.0.0.0:3000");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            port = 8080
            modus = "production"

            [lexikon]
            app_id = "meine-id"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.modus, "production");
        assert_eq!(cfg.lexikon.app_id, "meine-id");
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.server.bind_adresse, "0.0.0.0");
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
    }

    #[test]
    fn umgebung_uebersteuert_zugangsdaten_und_logging() {
        let mut cfg = ServerConfig::default();
        cfg.overrides_anwenden(
            Some("env-id".into()),
            Some("env-key".into()),
            Some("debug".into()),
            None,
        );
        assert_eq!(cfg.lexikon.app_id, "env-id");
        assert_eq!(cfg.lexikon.app_key, "env-key");
        assert_eq!(cfg.logging.level, "debug");
        // Ohne Variable bleibt der Dateiwert stehen
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn rate_limit_fenster_in_sekunden() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.rate_limit_konfig().fenster_sekunden, 900);
    }
}
