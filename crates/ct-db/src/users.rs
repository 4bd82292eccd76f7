//! Postgres user store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ct_core::traits::Id;
use ct_models::User;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::repository::{NewUserRecord, RepositoryError, RepositoryResult, UserStore};

/// User database row
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i64,
    login: String,
    mail: String,
    admin: bool,
    hashed_password: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            login: row.login,
            mail: row.mail,
            admin: row.admin,
            hashed_password: row.hashed_password,
            created_at: row.created_at,
        }
    }
}

const COLUMNS: &str = "id, login, mail, admin, hashed_password, created_at";

/// Postgres-backed user store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_login(&self, login: &str) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE login = $1", COLUMNS))
                .bind(login)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, user: NewUserRecord) -> RepositoryResult<User> {
        let result: Result<UserRow, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (login, mail, admin, hashed_password, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&user.login)
        .bind(&user.mail)
        .bind(user.admin)
        .bind(&user.hashed_password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("login {} is already taken", user.login)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn logins_for(&self, ids: &[Id]) -> RepositoryResult<HashMap<Id, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, login FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }
}
