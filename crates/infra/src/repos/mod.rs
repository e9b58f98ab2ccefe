mod shared;
mod task;
mod user;

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use task::{ITaskRepo, InMemoryTaskRepo, PostgresTaskRepo};
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
