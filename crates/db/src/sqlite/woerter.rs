//! SQLite-Implementierung des WortRepository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NeuesWort, WortDefRecord};
use crate::repository::{DbResult, WortRepository};
use crate::sqlite::pool::SqliteDb;

impl WortRepository for SqliteDb {
    async fn erstellen(&self, data: NeuesWort<'_>) -> DbResult<WortDefRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let definitionen_json = serde_json::to_string(data.definitionen)?;

        // Konflikt auf dem Wort-Schluessel wird ignoriert: parallele
        // Erst-Lookups desselben Worts erzeugen hoechstens einen Eintrag.
        let affected = sqlx::query(
            "INSERT INTO woerter (id, wort, wortart, definitionen, created_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(wort) DO NOTHING",
        )
        .bind(id.to_string())
        .bind(data.wort)
        .bind(data.wortart)
        .bind(&definitionen_json)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            // Eintrag existierte bereits - den vorhandenen zurueckgeben
            return self
                .laden_nach_wort(data.wort)
                .await?
                .ok_or_else(|| DbError::intern(format!("Wort '{}' verschwunden", data.wort)));
        }

        Ok(WortDefRecord {
            id,
            wort: data.wort.to_string(),
            wortart: data.wortart.to_string(),
            definitionen: data.definitionen.to_vec(),
            created_at: now,
        })
    }

    async fn laden_nach_wort(&self, wort: &str) -> DbResult<Option<WortDefRecord>> {
        let row = sqlx::query(
            "SELECT id, wort, wortart, definitionen, created_at
             FROM woerter WHERE wort = ?",
        )
        .bind(wort)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| zeile_zu_wort(&r)).transpose()
    }
}

/// Wandelt eine SQLite-Zeile in einen WortDefRecord um
fn zeile_zu_wort(row: &SqliteRow) -> DbResult<WortDefRecord> {
    let id_str: String = row.try_get("id")?;
    let definitionen_json: String = row.try_get("definitionen")?;
    let created_str: String = row.try_get("created_at")?;

    Ok(WortDefRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DbError::UngueltigeDaten(format!("Wort-ID: {e}")))?,
        wort: row.try_get("wort")?,
        wortart: row.try_get("wortart")?,
        definitionen: serde_json::from_str(&definitionen_json)?,
        created_at: DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| DbError::UngueltigeDaten(format!("created_at: {e}")))?
            .with_timezone(&Utc),
    })
}
