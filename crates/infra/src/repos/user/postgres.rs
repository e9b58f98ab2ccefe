use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use taskbell_domain::{User, ID};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    name: String,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        User {
            id: raw.user_uid.into(),
            email: raw.email,
            name: raw.name,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, name)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?
        .map(User::from)
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?
        .map(User::from)
    }
}
