mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use taskbell_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
    async fn find(&self, user_id: &ID) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_inserted_users() {
        let repo = InMemoryUserRepo::new();
        let user = User::new("ada@example.com".into(), "Ada".into());
        repo.insert(&user).await.expect("To insert user");

        assert_eq!(repo.find(&user.id).await, Some(user.clone()));
        assert!(repo.find(&ID::new()).await.is_none());
        assert_eq!(repo.delete(&user.id).await, Some(user.clone()));
        assert!(repo.find(&user.id).await.is_none());
    }
}
