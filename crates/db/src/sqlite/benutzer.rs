//! SQLite-Implementierung des BenutzerRepository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::{BenutzerRepository, DbResult};
use crate::sqlite::pool::SqliteDb;

impl BenutzerRepository for SqliteDb {
    async fn erstellen(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO benutzer (id, name, email, password_hash, warenkorb, created_at)
             VALUES (?, ?, ?, ?, '[]', ?)",
        )
        .bind(id.to_string())
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits vergeben", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id,
            name: data.name.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            warenkorb: Vec::new(),
            created_at: now,
        })
    }

    async fn laden(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, warenkorb, created_at
             FROM benutzer WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| zeile_zu_benutzer(&r)).transpose()
    }

    async fn laden_nach_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, warenkorb, created_at
             FROM benutzer WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| zeile_zu_benutzer(&r)).transpose()
    }

    async fn warenkorb_speichern(&self, id: Uuid, warenkorb: &[Uuid]) -> DbResult<()> {
        let json = serde_json::to_string(warenkorb)?;
        let affected = sqlx::query("UPDATE benutzer SET warenkorb = ? WHERE id = ?")
            .bind(json)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Benutzer {id}")));
        }
        Ok(())
    }
}

/// Wandelt eine SQLite-Zeile in einen BenutzerRecord um
fn zeile_zu_benutzer(row: &SqliteRow) -> DbResult<BenutzerRecord> {
    let id_str: String = row.try_get("id")?;
    let warenkorb_json: String = row.try_get("warenkorb")?;
    let created_str: String = row.try_get("created_at")?;

    Ok(BenutzerRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DbError::UngueltigeDaten(format!("Benutzer-ID: {e}")))?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        warenkorb: serde_json::from_str(&warenkorb_json)?,
        created_at: DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| DbError::UngueltigeDaten(format!("created_at: {e}")))?
            .with_timezone(&Utc),
    })
}
