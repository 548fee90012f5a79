//! Delivery of the rendered report by email
use async_trait::async_trait;
use chrono::NaiveDate;
use lettre::address::AddressError;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::debug;
use thiserror::Error;

use crate::config::MailConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(#[from] AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("no recipients configured")]
    NoRecipients,
}

pub fn report_subject(date: NaiveDate) -> String {
    format!("Daily Market Report - {}", date.format("%Y-%m-%d"))
}

/// HTML mail from the configured account to all recipients, with optional blind copy
pub fn build_message(config: &MailConfig, subject: &str, html: &str) -> Result<Message, MailError> {
    if config.to.is_empty() {
        return Err(MailError::NoRecipients);
    }
    let mut builder = Message::builder()
        .from(config.username.parse::<Mailbox>()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML);
    for to in &config.to {
        builder = builder.to(to.parse::<Mailbox>()?);
    }
    if let Some(bcc) = &config.bcc {
        builder = builder.bcc(bcc.parse::<Mailbox>()?);
    }
    Ok(builder.body(html.to_string())?)
}

#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), MailError>;
}

/// Authenticated SMTP relay over TLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<SmtpMailer, MailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?.credentials(credentials);
        if let Some(port) = config.smtp_port {
            builder = builder.port(port);
        }
        Ok(SmtpMailer {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), MailError> {
        let response = self.transport.send(message).await?;
        debug!("SMTP server answered {}", response.code());
        Ok(())
    }
}

/// Build the daily report mail and hand it to the mailer
pub async fn send_report(
    mailer: &dyn ReportMailer,
    config: &MailConfig,
    date: NaiveDate,
    html: &str,
) -> Result<(), MailError> {
    let message = build_message(config, &report_subject(date), html)?;
    mailer.send(message).await
}
