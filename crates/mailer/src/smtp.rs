//! SMTP delivery through lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use site_core::{Error, OutgoingMail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::config::{SmtpConfig, SmtpEncryption};
use crate::Mailer;

/// Mailer backed by an async SMTP transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
    recipient: Mailbox,
    healthy: AtomicBool,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let sender = parse_address(config.sender_address(), "sender")?;
        let recipient = Mailbox::new(None, parse_address(config.recipient_address(), "recipient")?);

        let mut builder = match config.encryption {
            SmtpEncryption::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| Error::config(format!("failed to create SMTP relay transport: {}", e)))?
                .port(config.port),
            SmtpEncryption::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
            }
            SmtpEncryption::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| {
                        Error::config(format!("failed to create SMTP STARTTLS transport: {}", e))
                    })?
                    .port(config.port)
            }
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
            recipient,
            healthy: AtomicBool::new(false),
        })
    }

    /// Build the MIME message for a form mail.
    ///
    /// `From` carries the submitter's name over our own address, since the
    /// relay will not send as an arbitrary domain; the submitter goes in
    /// `Reply-To`.
    pub fn build_message(&self, mail: &OutgoingMail) -> Result<Message> {
        let from = Mailbox::new(Some(mail.sender_name.clone()), self.sender.clone());
        let reply_to: Address = mail
            .reply_to
            .parse()
            .map_err(|e| Error::invalid_mail(format!("invalid reply-to address: {}", e)))?;

        Message::builder()
            .from(from)
            .reply_to(Mailbox::new(Some(mail.sender_name.clone()), reply_to))
            .to(self.recipient.clone())
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| Error::invalid_mail(format!("failed to build email message: {}", e)))
    }

    /// Open a connection and run the SMTP handshake without sending.
    pub async fn test_connection(&self) -> Result<()> {
        match self.transport.test_connection().await {
            Ok(true) => {
                self.healthy.store(true, Ordering::Relaxed);
                Ok(())
            }
            Ok(false) => {
                self.healthy.store(false, Ordering::Relaxed);
                Err(Error::delivery("SMTP server did not accept the connection"))
            }
            Err(e) => {
                self.healthy.store(false, Ordering::Relaxed);
                Err(Error::delivery(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = self.build_message(mail)?;

        match self.transport.send(message).await {
            Ok(response) => {
                self.healthy.store(true, Ordering::Relaxed);
                debug!(code = %response.code(), subject = %mail.subject, "Mail relayed");
                Ok(())
            }
            Err(e) => {
                self.healthy.store(false, Ordering::Relaxed);
                warn!(error = %e, "SMTP send failed");
                Err(Error::delivery(e.to_string()))
            }
        }
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }
}

fn parse_address(value: Option<&str>, role: &str) -> Result<Address> {
    let value = value.ok_or_else(|| {
        Error::config(format!("SMTP {} address is not configured (set smtp.username)", role))
    })?;
    value
        .parse()
        .map_err(|e| Error::config(format!("invalid SMTP {} address {:?}: {}", role, value, e)))
}
