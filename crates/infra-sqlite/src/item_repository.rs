// SQLite ItemRepository + ClaimQueueStore Implementation (ADR-009)
//
// Both ports land on the same `items` table. Listing writes and queue
// writes touch disjoint column sets: `update_listing` never sets
// claim_queue/queue_version, and `replace_queue` sets nothing else.

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tradepost_core::domain::user::UserId;
use tradepost_core::domain::{ClaimQueue, Item, ItemUpdate};
use tradepost_core::error::{AppError, Result};
use tradepost_core::port::{ClaimQueueStore, ItemRepository, QueueSnapshot, ReplaceOutcome};

pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn insert(&self, item: &Item) -> Result<()> {
        let pictures = serde_json::to_string(&item.pictures)?;
        let claim_queue = serde_json::to_string(&item.claim_queue)?;

        sqlx::query(
            r#"
            INSERT INTO items (
                id, seller, name, cost, description, pictures, contact,
                claim_queue, queue_version,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.seller)
        .bind(&item.name)
        .bind(item.cost)
        .bind(&item.description)
        .bind(&pictures)
        .bind(&item.contact)
        .bind(&claim_queue)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_item()))
    }

    async fn list(&self) -> Result<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT * FROM items
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_item()).collect())
    }

    async fn list_by_seller(&self, seller: &str) -> Result<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT * FROM items
            WHERE seller = ?
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(seller)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_item()).collect())
    }

    async fn update_listing(&self, id: &str, update: &ItemUpdate, now_millis: i64) -> Result<()> {
        let pictures = update
            .pictures
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        // COALESCE keeps absent fields at their stored value
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = COALESCE(?, name),
                cost = COALESCE(?, cost),
                description = COALESCE(?, description),
                pictures = COALESCE(?, pictures),
                contact = COALESCE(?, contact),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(update.cost)
        .bind(&update.description)
        .bind(&pictures)
        .bind(&update.contact)
        .bind(now_millis)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::item_not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::item_not_found(id));
        }

        Ok(())
    }
}

#[async_trait]
impl ClaimQueueStore for SqliteItemRepository {
    async fn load_queue(&self, item_id: &str) -> Result<QueueSnapshot> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT claim_queue, queue_version FROM items WHERE id = ?")
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let (raw_queue, version) = row.ok_or_else(|| AppError::item_not_found(item_id))?;

        // Strict parse: replacing a queue we could not read would lose
        // claimants, so a corrupt row is an error here (display paths in
        // into_item stay lenient).
        let queue: ClaimQueue = serde_json::from_str(&raw_queue)?;

        Ok(QueueSnapshot {
            claimants: queue.into_claimants(),
            version,
        })
    }

    async fn replace_queue(
        &self,
        item_id: &str,
        expected_version: i64,
        claimants: &[UserId],
    ) -> Result<ReplaceOutcome> {
        let serialized = serde_json::to_string(claimants)?;

        // Conditional update: only lands if nobody replaced the queue since
        // the caller's snapshot
        let result = sqlx::query(
            r#"
            UPDATE items
            SET claim_queue = ?, queue_version = queue_version + 1
            WHERE id = ? AND queue_version = ?
            "#,
        )
        .bind(&serialized)
        .bind(item_id)
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            return Ok(ReplaceOutcome::Applied);
        }

        // Zero rows updated: either the version moved on or the item is gone.
        // Distinguish so callers can stop retrying a deleted item.
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT queue_version FROM items WHERE id = ?")
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        match exists {
            Some(_) => Ok(ReplaceOutcome::Conflict),
            None => Err(AppError::item_not_found(item_id)),
        }
    }
}

/// SQLite row representation (Phase 1 + Phase 2 queue columns)
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    seller: String,
    name: String,
    cost: i64,
    description: String,
    pictures: String,
    contact: String,
    claim_queue: String,
    created_at: i64,
    updated_at: i64,
}

impl ItemRow {
    fn into_item(self) -> Item {
        let pictures: Vec<String> = serde_json::from_str(&self.pictures).unwrap_or_default();
        let claim_queue: ClaimQueue =
            serde_json::from_str(&self.claim_queue).unwrap_or_default();

        Item {
            id: self.id,
            seller: self.seller,
            name: self.name,
            cost: self.cost,
            description: self.description,
            pictures,
            contact: self.contact,
            claim_queue,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
