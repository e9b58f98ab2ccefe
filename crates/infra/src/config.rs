use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

/// Credentials for the transactional mail HTTP API
#[derive(Debug, Clone)]
pub struct MailApiConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Whether the periodic reminder job should be started with the server.
    /// Tests turn this off and trigger scans themselves.
    pub reminder_jobs_enabled: bool,
    /// Seconds between two reminder scans
    pub reminder_scan_interval_secs: u64,
    /// Maximum number of tasks whose reminders are dispatched concurrently
    /// within one scan
    pub reminder_dispatch_concurrency: usize,
    /// Sender address of reminder emails
    pub mail_from: String,
    /// When missing, reminder emails are only logged
    pub mail_api: Option<MailApiConfig>,
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let mail_api = match (std::env::var("MAIL_API_URL"), std::env::var("MAIL_API_KEY")) {
            (Ok(url), Ok(api_key)) => Some(MailApiConfig { url, api_key }),
            _ => {
                info!("Did not find MAIL_API_URL and MAIL_API_KEY environment variables. Reminder emails will only be logged.");
                None
            }
        };

        let reminder_dispatch_concurrency = match parse_env::<usize>("REMINDER_DISPATCH_CONCURRENCY", 8) {
            0 => {
                warn!("REMINDER_DISPATCH_CONCURRENCY must be positive, using 1.");
                1
            }
            n => n,
        };

        Self {
            port: parse_env::<usize>("PORT", 5000),
            reminder_jobs_enabled: parse_env::<bool>("REMINDER_JOBS_ENABLED", true),
            reminder_scan_interval_secs: parse_env::<u64>("REMINDER_SCAN_INTERVAL_SECS", 60).max(1),
            reminder_dispatch_concurrency,
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "reminders@taskbell.local".into()),
            mail_api,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
