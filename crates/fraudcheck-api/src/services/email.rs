//! Delivery collaborator - analyst notification email via SMTP.
//!
//! Sends the submission metadata and the generated narrative as an HTML body
//! with every uploaded file attached. No-op at construction time if SMTP is
//! not configured; a send failure is reported to the handler as a
//! `DeliveryError` and recorded in the response, never propagated as a
//! request failure.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use fraudcheck_core::{Config, SubmissionMeta};

/// One attachment on the outbound analyst email.
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// The fully assembled outbound message.
pub struct OutboundEmail {
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("no valid recipient addresses")]
    NoRecipients,

    #[error("invalid sender address: {0}")]
    InvalidSender(String),

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("send rejected: {0}")]
    Transport(String),
}

/// External transactional-email collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), DeliveryError>;
}

/// SMTP-backed mailer.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    recipients: Vec<String>,
}

impl SmtpMailer {
    /// Create the mailer from config. Returns `None` if SMTP host, sender, or
    /// recipients are missing; the submission flow then reports the
    /// collaborator as unconfigured instead of failing.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_configured() {
            tracing::debug!("Email delivery disabled (SMTP_HOST/SMTP_FROM/ANALYST_EMAILS not set)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port();

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email delivery initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email delivery initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            recipients: config.analyst_emails().to_vec(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), DeliveryError> {
        let OutboundEmail {
            subject,
            html_body,
            attachments,
        } = email;

        let to_addrs: Vec<Mailbox> = self
            .recipients
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if to_addrs.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| DeliveryError::InvalidSender(format!("{}", e)))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }

        let mut body = MultiPart::mixed().singlepart(SinglePart::html(html_body));
        for att in attachments {
            let content_type = ContentType::parse(&att.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| DeliveryError::Message(e.to_string()))?;
            body = body.singlepart(Attachment::new(att.filename).body(att.data, content_type));
        }

        let message = builder
            .multipart(body)
            .map_err(|e| DeliveryError::Message(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        tracing::info!(recipients = to_addrs.len(), "Analyst notification sent");
        Ok(())
    }
}

/// Escape text for interpolation into the HTML body.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the analyst notification body: submission metadata followed by the
/// narrative (or its explanatory substitute). All user- and model-supplied
/// text is escaped.
pub fn build_analyst_html(submission_id: &str, meta: &SubmissionMeta, ai_text: &str) -> String {
    format!(
        "<h2>Fraud Review Submission</h2>\n\
         <p><b>Submission ID:</b> {}</p>\n\
         <p><b>Transaction Type:</b> {}</p>\n\
         <p><b>User Contact Email:</b> {}</p>\n\
         <p><b>Client Name:</b> {}</p>\n\
         <p><b>Description:</b> {}</p>\n\
         <hr/>\n\
         <pre>{}</pre>\n",
        escape_html(submission_id),
        escape_html(&meta.transaction_type),
        escape_html(&meta.contact_email),
        escape_html(meta.client().unwrap_or("(not provided)")),
        escape_html(meta.description().unwrap_or("(not provided)")),
        escape_html(ai_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> SubmissionMeta {
        SubmissionMeta {
            transaction_type: "wire <transfer>".to_string(),
            contact_email: "a@b.com".to_string(),
            short_description: "paid & waiting".to_string(),
            client_name: None,
        }
    }

    #[test]
    fn html_body_escapes_user_text() {
        let html = build_analyst_html("abc-123", &meta(), "<script>alert(1)</script>");
        assert!(html.contains("wire &lt;transfer&gt;"));
        assert!(html.contains("paid &amp; waiting"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn html_body_substitutes_missing_client_name() {
        let html = build_analyst_html("abc-123", &meta(), "narrative");
        assert!(html.contains("<b>Client Name:</b> (not provided)"));
        assert!(html.contains("abc-123"));
    }
}
