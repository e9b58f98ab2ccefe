mod mailer;

pub use mailer::{HttpMailer, IMailer, InMemoryMailer, LogMailer, Mail};
