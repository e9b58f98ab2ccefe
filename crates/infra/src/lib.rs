mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailApiConfig};
pub use repos::{
    ITaskRepo, IUserRepo, InMemoryTaskRepo, InMemoryUserRepo, PostgresTaskRepo, PostgresUserRepo,
    Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct TaskbellContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
    /// Held for the duration of a reminder scan so that two scans never
    /// evaluate the same reminders at the same time
    pub reminder_scan_lock: Arc<Mutex<()>>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

fn create_mailer(config: &Config) -> Arc<dyn IMailer> {
    match &config.mail_api {
        Some(mail_api) => Arc::new(HttpMailer::new(mail_api.clone(), config.mail_from.clone())),
        None => Arc::new(LogMailer),
    }
}

impl TaskbellContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            repos,
            mailer: create_mailer(&config),
            config,
            sys: Arc::new(RealSys {}),
            reminder_scan_lock: Default::default(),
        }
    }

    /// Context backed by inmemory repositories and an inmemory mailer,
    /// used for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
            reminder_scan_lock: Default::default(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TaskbellContext {
    TaskbellContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
