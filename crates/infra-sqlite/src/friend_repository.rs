// SQLite FriendRepository Implementation (Phase 3)
//
// Friendships are stored once per pair, in whatever order the accept created
// them; every pair predicate checks both column orders.

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tradepost_core::domain::user::UserId;
use tradepost_core::domain::{FriendRequest, Friendship, RequestStatus};
use tradepost_core::error::{AppError, Result};
use tradepost_core::port::FriendRepository;

pub struct SqliteFriendRepository {
    pool: SqlitePool,
}

impl SqliteFriendRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRepository for SqliteFriendRepository {
    async fn insert_request(&self, request: &FriendRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO friend_requests (id, from_user, to_user, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.from_user)
        .bind(&request.to_user)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_pending_from_to(&self, from: &str, to: &str) -> Result<Option<FriendRequest>> {
        let row = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT * FROM friend_requests
            WHERE from_user = ? AND to_user = ? AND status = ?
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(RequestStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_request()))
    }

    async fn find_pending_between(&self, a: &str, b: &str) -> Result<Option<FriendRequest>> {
        let row = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT * FROM friend_requests
            WHERE status = ?
              AND ((from_user = ? AND to_user = ?) OR (from_user = ? AND to_user = ?))
            "#,
        )
        .bind(RequestStatus::Pending.as_str())
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_request()))
    }

    async fn list_requests_for(&self, user: &str) -> Result<Vec<FriendRequest>> {
        let rows: Vec<FriendRequestRow> = sqlx::query_as(
            r#"
            SELECT * FROM friend_requests
            WHERE from_user = ? OR to_user = ?
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user)
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_request()).collect())
    }

    async fn update_request(&self, request: &FriendRequest) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(request.status.as_str())
        .bind(request.updated_at)
        .bind(&request.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "friend request {} not found",
                request.id
            )));
        }

        Ok(())
    }

    async fn delete_request(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM friend_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "friend request {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn insert_friendship(&self, friendship: &Friendship) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO friendships (user_a, user_b, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&friendship.user_a)
        .bind(&friendship.user_b)
        .bind(friendship.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn friendship_exists(&self, a: &str, b: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM friendships
            WHERE (user_a = ? AND user_b = ?) OR (user_a = ? AND user_b = ?)
            "#,
        )
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn delete_friendship(&self, a: &str, b: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE (user_a = ? AND user_b = ?) OR (user_a = ? AND user_b = ?)
            "#,
        )
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_friends_of(&self, user: &str) -> Result<Vec<UserId>> {
        let friends: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT CASE WHEN user_a = ? THEN user_b ELSE user_a END
            FROM friendships
            WHERE user_a = ? OR user_b = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user)
        .bind(user)
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(friends)
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct FriendRequestRow {
    id: String,
    from_user: String,
    to_user: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl FriendRequestRow {
    fn into_request(self) -> FriendRequest {
        // Unknown status rows read as inert REJECTED
        let status =
            RequestStatus::parse(&self.status).unwrap_or(RequestStatus::Rejected);

        FriendRequest {
            id: self.id,
            from_user: self.from_user,
            to_user: self.to_user,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
