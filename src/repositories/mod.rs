use sqlx::PgPool;

pub mod memory_repo;
pub mod posts_repo;

pub use memory_repo::MemoryRepo;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `posts` collection table if it does not exist yet.
    pub async fn init(&self) -> crate::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
