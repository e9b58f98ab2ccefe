use std::sync::Arc;
use taskbell_domain::{Task, User};
use taskbell_infra::{ISys, InMemoryMailer, TaskbellContext};

/// Clock pinned to a single instant
pub struct StaticTimeSys(pub i64);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

pub struct TestContext {
    pub ctx: TaskbellContext,
    pub mailer: Arc<InMemoryMailer>,
}

impl TestContext {
    pub fn new(now: i64) -> Self {
        let mut ctx = TaskbellContext::create_inmemory();
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        ctx.sys = Arc::new(StaticTimeSys(now));
        Self { ctx, mailer }
    }

    pub fn set_time(&mut self, now: i64) {
        self.ctx.sys = Arc::new(StaticTimeSys(now));
    }

    pub async fn insert_user(&self, email: &str) -> User {
        let user = User::new(email.into(), "Ada".into());
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn insert_task(&self, task: &Task) {
        self.ctx.repos.tasks.insert(task).await.unwrap();
    }
}
