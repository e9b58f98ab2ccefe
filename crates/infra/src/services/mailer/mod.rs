mod http;
mod inmemory;

pub use http::HttpMailer;
pub use inmemory::InMemoryMailer;
use serde::Serialize;
use tracing::info;

/// A rendered email ready to be delivered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, mail: &Mail) -> anyhow::Result<()>;
}

/// Used when no mail API is configured
pub struct LogMailer;

#[async_trait::async_trait]
impl IMailer for LogMailer {
    async fn send(&self, mail: &Mail) -> anyhow::Result<()> {
        info!(to = %mail.to, subject = %mail.subject, "Mail delivery is not configured, logging mail instead");
        Ok(())
    }
}
