use crate::models::LikeTarget;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for like relation rows
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the like state for (user, target). Returns true when this call
    /// created the row.
    ///
    /// The insert races against concurrent toggles of the same pair; the
    /// unique (user_id, target_kind, target_id) index guarantees at most one
    /// row survives, so a losing insert falls through to the delete branch.
    pub async fn toggle(&self, user_id: Uuid, target: LikeTarget) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO likes (id, user_id, target_kind, target_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, target_kind, target_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(target.kind())
        .bind(target.id())
        .fetch_optional(&self.pool)
        .await?;

        if inserted.is_some() {
            return Ok(true);
        }

        sqlx::query(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target.kind())
        .bind(target.id())
        .execute(&self.pool)
        .await?;

        Ok(false)
    }

    /// Check if the user has liked the target
    pub async fn exists(&self, user_id: Uuid, target: LikeTarget) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(target.kind())
        .bind(target.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Like count for a single target
    pub async fn count_for(&self, target: LikeTarget) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM likes
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target.kind())
        .bind(target.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Remove every like pointing at the target. Used by cascading deletes of
    /// videos, comments and tweets.
    pub async fn delete_for_target(&self, target: LikeTarget) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target.kind())
        .bind(target.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
