//! User repository
//!
//! Every write runs in its own transaction:
//! - success: commit, return the affected row
//! - integrity failure (SQLSTATE class 23): explicit rollback, `ConstraintViolation`
//! - any early return or a cancelled request future: the transaction guard is
//!   dropped uncommitted and sqlx rolls it back before releasing the connection

use sqlx::{PgPool, Postgres, Transaction};

use crate::models::{User, UserCreate, UserUpdate};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("constraint violation: {}", constraint.as_deref().unwrap_or("unnamed"))]
    ConstraintViolation {
        constraint: Option<String>,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        let constraint = match &e {
            sqlx::Error::Database(db) if db.code().is_some_and(|code| code.starts_with("23")) => {
                Some(db.constraint().map(str::to_owned))
            }
            _ => None,
        };

        match constraint {
            Some(constraint) => Self::ConstraintViolation {
                constraint,
                source: e,
            },
            None => Self::Sqlx(e),
        }
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users in ascending id order.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, surname, age, hobbies, relationship_status FROM users ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Get a single user, `None` when no row has this id.
    pub async fn get(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, surname, age, hobbies, relationship_status FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user and return it with its assigned id.
    pub async fn create(&self, data: &UserCreate) -> Result<User, DbError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, surname, age, hobbies, relationship_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, surname, age, hobbies, relationship_status
            "#,
        )
        .bind(data.name())
        .bind(data.surname())
        .bind(data.age())
        .bind(data.hobbies())
        .bind(data.relationship_status())
        .fetch_one(&mut *tx)
        .await;

        let user = match inserted {
            Ok(user) => user,
            Err(e) => return Err(abort(tx, e).await),
        };

        tx.commit().await?;
        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    /// Apply the present fields of `data` to user `id`.
    ///
    /// Returns `Ok(None)` when the user does not exist. The row is locked
    /// between load and write so the merge sees a consistent snapshot.
    /// An update with no fields issues no write and returns the stored row.
    pub async fn update(&self, id: i32, data: &UserUpdate) -> Result<Option<User>, DbError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, surname, age, hobbies, relationship_status
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut user) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        if data.is_empty() {
            tx.rollback().await?;
            tracing::debug!(user_id = id, "empty update, row unchanged");
            return Ok(Some(user));
        }

        data.apply_to(&mut user);

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, surname = $3, age = $4, hobbies = $5, relationship_status = $6
            WHERE id = $1
            RETURNING id, name, surname, age, hobbies, relationship_status
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(user.age)
        .bind(&user.hobbies)
        .bind(user.relationship_status)
        .fetch_one(&mut *tx)
        .await;

        let user = match updated {
            Ok(user) => user,
            Err(e) => return Err(abort(tx, e).await),
        };

        tx.commit().await?;
        tracing::info!(user_id = id, "updated user");
        Ok(Some(user))
    }

    /// Delete user `id`. Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;

        let rows = match deleted {
            Ok(result) => result.rows_affected(),
            Err(e) => return Err(abort(tx, e).await),
        };

        if rows == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::info!(user_id = id, "deleted user");
        Ok(true)
    }
}

/// Roll back a failed write and classify the error that caused it.
async fn abort(tx: Transaction<'_, Postgres>, e: sqlx::Error) -> DbError {
    let err = DbError::from(e);

    if let Err(rollback_err) = tx.rollback().await {
        // The connection is discarded by the pool if rollback fails.
        tracing::error!("rollback failed: {}", rollback_err);
    }

    if err.is_constraint_violation() {
        tracing::warn!("write rejected by store: {}", err);
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_constraint_violation());
        assert!(matches!(err, DbError::Sqlx(_)));

        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(!err.is_constraint_violation());
    }

    // Integration tests for the repository live in tests/users_repo.rs
    // Run with: DATABASE_URL=... cargo test -p users-server -- --ignored
}
