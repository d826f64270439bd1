//! Handler fuer Wort- und Warenkorb-Endpunkte

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use wortschatz_db::models::{Definition, WortDefRecord};
use wortschatz_lexikon::{LexikonError, WortInfo};

use crate::{benutzer_aus_headers, middleware::fehler_antwort, ApiState};

/// Bedeutungsliste ins Antwortformat bringen
fn definitions_json(definitionen: &[Definition]) -> Vec<serde_json::Value> {
    definitionen
        .iter()
        .map(|d| {
            json!({
                "definition": d.definition,
                "examples": d.beispiele
            })
        })
        .collect()
}

fn wort_info_json(info: &WortInfo) -> serde_json::Value {
    json!({
        "word": info.wort,
        "part": info.wortart,
        "definitions": definitions_json(&info.definitionen)
    })
}

fn wort_record_json(record: &WortDefRecord) -> serde_json::Value {
    json!({
        "id": record.id,
        "word": record.wort,
        "part": record.wortart,
        "definitions": definitions_json(&record.definitionen)
    })
}

#[derive(Debug, Deserialize)]
pub struct DefineQuery {
    pub word: Option<String>,
}

/// GET /define?word= - oeffentlicher Lookup (Cache-first, sonst Anbieter)
pub async fn define(State(state): State<ApiState>, Query(query): Query<DefineQuery>) -> Response {
    let wort = match query
        .word
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
    {
        Some(w) => w.to_string(),
        None => return fehler_antwort(StatusCode::BAD_REQUEST, "Parameter 'word' fehlt", None),
    };

    match state.woerter.nachschlagen(&wort).await {
        Ok(info) => (StatusCode::OK, Json(wort_info_json(&info))).into_response(),
        Err(e) => {
            tracing::warn!(wort = %wort, fehler = %e, "Wort-Lookup fehlgeschlagen");
            fehler_antwort(
                StatusCode::BAD_REQUEST,
                "Wort konnte nicht aufgeloest werden",
                Some(e.to_string()),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddWordBody {
    #[serde(default)]
    pub word: String,
}

/// POST /addWordToCart - legt ein bereits nachgeschlagenes Wort in den Korb
pub async fn add_word_to_cart(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<AddWordBody>,
) -> Response {
    let user_id = match benutzer_aus_headers(&headers, &state).await {
        Ok(id) => id,
        Err(antwort) => return antwort,
    };

    let wort = body.word.trim();
    if wort.is_empty() {
        return fehler_antwort(StatusCode::BAD_REQUEST, "Parameter 'word' fehlt", None);
    }

    match state.warenkorb.hinzufuegen(user_id, wort).await {
        Ok(record) => (StatusCode::OK, Json(wort_record_json(&record))).into_response(),
        Err(e) => {
            tracing::error!(user_id = %user_id, wort = %wort, fehler = %e, "Warenkorb-Zugang fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Wort konnte nicht in den Warenkorb gelegt werden",
                Some(e.to_string()),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveWordBody {
    #[serde(rename = "wordId", default)]
    pub word_id: String,
}

/// POST /removeWord - entfernt alle Vorkommen einer Wort-ID aus dem Korb
pub async fn remove_word(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<RemoveWordBody>,
) -> Response {
    let user_id = match benutzer_aus_headers(&headers, &state).await {
        Ok(id) => id,
        Err(antwort) => return antwort,
    };

    let wort_id = match Uuid::parse_str(body.word_id.trim()) {
        Ok(id) => id,
        Err(_) => return fehler_antwort(StatusCode::BAD_REQUEST, "Ungueltige Wort-ID", None),
    };

    match state.warenkorb.entfernen(user_id, wort_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Wort entfernt" })),
        )
            .into_response(),
        Err(LexikonError::BenutzerNichtGefunden(_)) => {
            fehler_antwort(StatusCode::BAD_REQUEST, "Benutzer nicht gefunden", None)
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, fehler = %e, "Wort-Entfernen fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Wort konnte nicht entfernt werden",
                None,
            )
        }
    }
}

/// POST /emptyCart - leert den Warenkorb (idempotent)
pub async fn empty_cart(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    let user_id = match benutzer_aus_headers(&headers, &state).await {
        Ok(id) => id,
        Err(antwort) => return antwort,
    };

    match state.warenkorb.leeren(user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Warenkorb geleert" })),
        )
            .into_response(),
        // Auch "Benutzer nicht gefunden" ist hier 500: die 400 gehoert auf
        // dieser Route dem Auth-Gate
        Err(e) => {
            tracing::error!(user_id = %user_id, fehler = %e, "Warenkorb-Leeren fehlgeschlagen");
            fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Warenkorb konnte nicht geleert werden",
                None,
            )
        }
    }
}
