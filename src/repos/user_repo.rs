/*
 * Responsibility
 * - SQLx operations against the users table
 * - Convert raw rows (role text + nullable active) into `UserRecord`
 * - DB errors are returned as RepoError so the caller can map them to 500
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::{UserRecord, UserRole};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::UserStore;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub email: String,
    #[sqlx(rename = "emailVerified")]
    pub verified: bool,
    pub role: String,
    pub active: Option<bool>,
    #[sqlx(rename = "isAdmin")]
    pub admin: bool,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepoError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // Comers may carry a stale column value; only buddies keep it.
        let active = (row.role == "buddy").then_some(row.active.unwrap_or(false));
        let role = UserRole::from_parts(&row.role, active)?;

        Ok(UserRecord {
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            verified: row.verified,
            role,
            admin: row.admin,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, password, email, "emailVerified", role, active, "isAdmin"
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update_active(db: &PgPool, username: &str, active: bool) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET active = $2
        WHERE username = $1 AND role = 'buddy'
        "#,
    )
    .bind(username)
    .bind(active)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        find_by_username(&self.db, username)
            .await?
            .map(UserRecord::try_from)
            .transpose()
    }

    async fn set_active(&self, username: &str, active: bool) -> RepoResult<bool> {
        update_active(&self.db, username, active).await
    }
}
