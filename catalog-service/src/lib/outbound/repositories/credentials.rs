use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Login;
use crate::domain::account::models::StoredCredentials;
use crate::domain::account::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<StoredCredentials>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT login, password_hash, created_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(StoredCredentials {
                login: Login::new(r.get("login"))?,
                password_hash: r.get("password_hash"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        credentials: StoredCredentials,
    ) -> Result<StoredCredentials, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (login, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(credentials.login.as_str())
        .bind(&credentials.password_hash)
        .bind(credentials.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::LoginAlreadyExists(credentials.login.to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(credentials)
    }
}
