//! Schema bootstrap for the users table
//!
//! Idempotent: safe to run on every startup. Concurrent runs (several
//! instances starting together) serialize on a transaction-scoped advisory
//! lock.

use sqlx::PgPool;

/// Advisory lock key held while the schema is bootstrapped.
const MIGRATION_LOCK_KEY: i64 = 0x7573_6572_735f_6462;

/// Create the `relationship_status` enum type and the `users` table if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running users migrations...");

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    // CREATE TYPE has no IF NOT EXISTS form
    sqlx::query(
        r#"
        DO $$
        BEGIN
            CREATE TYPE relationship_status AS ENUM ('single', 'in relationship', 'married');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END
        $$
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            name VARCHAR(15) NOT NULL,
            surname VARCHAR(15) NOT NULL,
            age INTEGER NOT NULL CONSTRAINT users_age_check CHECK (age < 100),
            hobbies VARCHAR(100) NOT NULL,
            relationship_status relationship_status NOT NULL
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("Users migrations complete");
    Ok(())
}
