//! SMTP configuration.

use serde::{Deserialize, Serialize};

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpEncryption {
    /// STARTTLS upgrade, usually port 587
    #[default]
    Starttls,
    /// Implicit TLS (SMTPS), usually port 465
    Tls,
    /// Plain text, local development only
    None,
}

/// SMTP transport configuration.
///
/// Defaults target Gmail's submission port; the account mails itself
/// unless `recipient` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub encryption: SmtpEncryption,
    /// Envelope/From address; defaults to `username`
    #[serde(default)]
    pub sender: Option<String>,
    /// Inbox receiving form mail; defaults to `username`
    #[serde(default)]
    pub recipient: Option<String>,
}

fn default_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            encryption: SmtpEncryption::default(),
            sender: None,
            recipient: None,
        }
    }
}

impl SmtpConfig {
    /// Address used in the `From` header.
    pub fn sender_address(&self) -> Option<&str> {
        self.sender.as_deref().or(self.username.as_deref())
    }

    /// Address form mail is delivered to.
    pub fn recipient_address(&self) -> Option<&str> {
        self.recipient.as_deref().or(self.username.as_deref())
    }
}
