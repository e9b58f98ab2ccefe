use super::{IMailer, Mail};
use std::sync::Mutex;

/// Records every mail instead of delivering it. Sending to a recipient
/// registered with `fail_for` returns an error.
pub struct InMemoryMailer {
    sent: Mutex<Vec<Mail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(vec![]),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    /// Mails that were successfully sent
    pub fn sent(&self) -> Vec<Mail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, mail: &Mail) -> anyhow::Result<()> {
        if self.failing_recipients.lock().unwrap().contains(&mail.to) {
            anyhow::bail!("Mail delivery to {} failed", mail.to);
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
