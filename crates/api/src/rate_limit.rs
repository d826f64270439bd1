//! Rate Limiter fuer die Wortschatz-API
//!
//! Token-Bucket pro Client-IP plus ein grober globaler Bucket als
//! Ueberlastschutz. Wird als Axum-Middleware vor allen Routen eingehaengt;
//! ueberschrittene Limits ergeben 429 mit `retry_after_secs`.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use parking_lot::Mutex;

use crate::middleware::client_ip;

/// Konfiguration fuer den Rate Limiter
#[derive(Debug, Clone)]
pub struct RateLimitKonfig {
    /// Maximale Anfragen pro Fenster pro IP
    pub anfragen_pro_ip: u32,
    /// Maximale Anfragen pro Fenster insgesamt (alle Clients)
    pub anfragen_global: u32,
    /// Fensterlaenge in Sekunden
    pub fenster_sekunden: u64,
}

impl Default for RateLimitKonfig {
    fn default() -> Self {
        Self {
            anfragen_pro_ip: 100,
            anfragen_global: 2000,
            fenster_sekunden: 15 * 60,
        }
    }
}

/// Ein Token-Bucket fuer eine einzelne Entitaet
#[derive(Debug)]
struct TokenBucket {
    /// Aktuelle Token-Anzahl (als f64 fuer Bruchteil-Auffuellung)
    token: f64,
    /// Maximale Token-Anzahl (= Burst-Limit)
    max_token: f64,
    /// Auffuellrate in Token pro Sekunde
    fuellrate: f64,
    /// Letzter Zeitpunkt der Auffuellung
    letzte_auffuellung: Instant,
}

impl TokenBucket {
    fn neu(max_anfragen: u32, fenster_sekunden: u64) -> Self {
        let max = max_anfragen as f64;
        Self {
            token: max,
            max_token: max,
            fuellrate: max / fenster_sekunden as f64,
            letzte_auffuellung: Instant::now(),
        }
    }

    /// Versucht ein Token zu verbrauchen. Gibt `true` zurueck wenn erlaubt.
    fn verbrauchen(&mut self) -> bool {
        self.auffuellen();
        if self.token >= 1.0 {
            self.token -= 1.0;
            true
        } else {
            false
        }
    }

    /// Sekunden bis zum naechsten verfuegbaren Token
    fn retry_after_secs(&mut self) -> u64 {
        self.auffuellen();
        let fehlend = 1.0 - self.token;
        if fehlend <= 0.0 {
            return 0;
        }
        (fehlend / self.fuellrate).ceil() as u64
    }

    fn auffuellen(&mut self) {
        let jetzt = Instant::now();
        let vergangen = jetzt.duration_since(self.letzte_auffuellung).as_secs_f64();
        self.token = (self.token + vergangen * self.fuellrate).min(self.max_token);
        self.letzte_auffuellung = jetzt;
    }
}

/// Rate Limiter mit Token-Bucket-Algorithmus
pub struct RateLimiter {
    konfig: RateLimitKonfig,
    ip_buckets: Mutex<HashMap<String, TokenBucket>>,
    global_bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    pub fn neu(konfig: RateLimitKonfig) -> Arc<Self> {
        let global_bucket = Mutex::new(TokenBucket::neu(
            konfig.anfragen_global,
            konfig.fenster_sekunden,
        ));
        Arc::new(Self {
            konfig,
            ip_buckets: Mutex::new(HashMap::new()),
            global_bucket,
        })
    }

    /// Prueft und verbraucht ein Token fuer eine IP-Adresse.
    ///
    /// Gibt `Ok(())` zurueck wenn erlaubt, `Err(retry_after_secs)` sonst.
    /// Der globale Bucket wird zuerst geprueft.
    pub fn pruefen(&self, ip: &str) -> Result<(), u64> {
        {
            let mut global = self.global_bucket.lock();
            if !global.verbrauchen() {
                return Err(global.retry_after_secs());
            }
        }

        let mut buckets = self.ip_buckets.lock();
        let bucket = buckets.entry(ip.to_string()).or_insert_with(|| {
            TokenBucket::neu(self.konfig.anfragen_pro_ip, self.konfig.fenster_sekunden)
        });
        if bucket.verbrauchen() {
            Ok(())
        } else {
            Err(bucket.retry_after_secs())
        }
    }

    /// Bereinigt IP-Buckets die laenger als ein Fenster inaktiv sind
    pub fn cleanup(&self) {
        let schwellwert = Duration::from_secs(self.konfig.fenster_sekunden);
        let jetzt = Instant::now();

        let mut buckets = self.ip_buckets.lock();
        buckets.retain(|_, b| jetzt.duration_since(b.letzte_auffuellung) < schwellwert);
    }
}

/// Axum-State fuer die Rate-Limit-Middleware
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
}

/// Axum-Middleware: Rate Limiting per IP
pub async fn rate_limit_middleware(
    State(rls): State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(req.headers());

    match rls.limiter.pruefen(&ip) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": {
                    "message": "Rate-Limit ueberschritten",
                    "retry_after_secs": retry_after
                }
            })),
        )
            .into_response(),
    }
}
