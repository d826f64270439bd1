//! Handler fuer Konto-Endpunkte: Registrierung, Login, Logout, Profil

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use wortschatz_auth::AuthError;
use wortschatz_db::BenutzerRepository;

use crate::{benutzer_aus_headers, middleware::fehler_antwort, ApiState};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Feldvalidierung fuer die Registrierung
fn register_validieren(body: &RegisterBody) -> Result<(), &'static str> {
    if body.name.trim().is_empty() {
        return Err("Name darf nicht leer sein");
    }
    if !body.email.contains('@') {
        return Err("Ungueltige E-Mail-Adresse");
    }
    if body.password.len() < 4 {
        return Err("Passwort zu kurz (mindestens 4 Zeichen)");
    }
    Ok(())
}

/// POST /register - Konto anlegen, Session wird direkt ausgestellt
pub async fn register(State(state): State<ApiState>, Json(body): Json<RegisterBody>) -> Response {
    if let Err(meldung) = register_validieren(&body) {
        return fehler_antwort(StatusCode::BAD_REQUEST, meldung, None);
    }

    match state
        .auth
        .registrieren(&body.name, &body.email, &body.password)
        .await
    {
        Ok((benutzer, session)) => (
            StatusCode::OK,
            Json(json!({
                "id": benutzer.id,
                "token": session.token,
                "message": "Registrierung erfolgreich"
            })),
        )
            .into_response(),
        Err(AuthError::EmailVergeben(_)) => {
            fehler_antwort(StatusCode::BAD_REQUEST, "E-Mail bereits vergeben", None)
        }
        Err(e) => {
            tracing::error!(fehler = %e, "Registrierung fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registrierung fehlgeschlagen",
                None,
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
pub async fn login(State(state): State<ApiState>, Json(body): Json<LoginBody>) -> Response {
    if body.email.is_empty() || body.password.is_empty() {
        return fehler_antwort(
            StatusCode::BAD_REQUEST,
            "E-Mail und Passwort sind erforderlich",
            None,
        );
    }

    match state.auth.anmelden(&body.email, &body.password).await {
        Ok((user_id, session)) => (
            StatusCode::OK,
            Json(json!({
                "token": session.token,
                "userId": user_id,
                "message": "Anmeldung erfolgreich"
            })),
        )
            .into_response(),
        // Unbekannte E-Mail und falsches Passwort sind nicht unterscheidbar
        Err(AuthError::UngueltigeAnmeldedaten) => {
            fehler_antwort(StatusCode::UNAUTHORIZED, "Anmeldung fehlgeschlagen", None)
        }
        Err(e) => {
            tracing::error!(fehler = %e, "Login fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Anmeldung fehlgeschlagen",
                None,
            )
        }
    }
}

/// POST /logout - invalidiert die Session zum uebermittelten Token
///
/// Ein fehlender Token ist 400; ein Token den der Store nicht kennt 500
/// (der Client glaubt angemeldet zu sein, der Server weiss nichts davon).
pub async fn logout(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let token = match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(t) => t,
        None => return fehler_antwort(StatusCode::BAD_REQUEST, "Kein Token uebermittelt", None),
    };

    match state.auth.abmelden(token).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Abmeldung erfolgreich" })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(fehler = %e, "Abmeldung fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Abmeldung fehlgeschlagen",
                None,
            )
        }
    }
}

/// GET /profile - Kontodaten samt Warenkorb (Wort-IDs, unaufgeloest)
pub async fn profile(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let user_id = match benutzer_aus_headers(&headers, &state).await {
        Ok(id) => id,
        Err(antwort) => return antwort,
    };

    match state.benutzer_repo.laden(user_id).await {
        Ok(Some(benutzer)) => (
            StatusCode::OK,
            Json(json!({
                "email": benutzer.email,
                "cart": benutzer.warenkorb,
                "name": benutzer.name
            })),
        )
            .into_response(),
        Ok(None) => fehler_antwort(StatusCode::BAD_REQUEST, "Benutzer nicht gefunden", None),
        Err(e) => {
            tracing::error!(user_id = %user_id, fehler = %e, "Profil konnte nicht geladen werden");
            fehler_antwort(
                StatusCode::BAD_REQUEST,
                "Profil konnte nicht geladen werden",
                None,
            )
        }
    }
}
