//! SMTP health checks.

use tracing::{debug, error};

use crate::smtp::SmtpMailer;

/// Check that the SMTP server accepts a connection.
pub async fn check_connection(mailer: &SmtpMailer) -> bool {
    match mailer.test_connection().await {
        Ok(()) => {
            debug!("SMTP connection healthy");
            true
        }
        Err(e) => {
            error!("SMTP connection check failed: {}", e);
            false
        }
    }
}
