use super::{IMailer, Mail};
use crate::config::MailApiConfig;
use reqwest::Client;
use serde::Serialize;

/// Delivers mails through a transactional mail HTTP API that accepts
/// JSON messages
pub struct HttpMailer {
    client: Client,
    config: MailApiConfig,
    from: String,
}

#[derive(Debug, Serialize)]
struct MailApiRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(config: MailApiConfig, from: String) -> Self {
        Self {
            client: Client::new(),
            config,
            from,
        }
    }
}

#[async_trait::async_trait]
impl IMailer for HttpMailer {
    async fn send(&self, mail: &Mail) -> anyhow::Result<()> {
        let body = MailApiRequest {
            from: &self.from,
            to: &mail.to,
            subject: &mail.subject,
            text: &mail.body,
        };
        self.client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
