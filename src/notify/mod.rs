// Alerting: mail notifications for supervisor failures.

mod smtp;

pub use smtp::{MailNotifier, SmtpConfig, TransportError};

/// Receives supervisor alerts.
pub trait Notifier {
    /// Deliver one alert. Delivery problems are logged and dropped so they
    /// never mask the failure being reported.
    fn notify(&self, subject: &str, body: &str);
}

/// Used when no mail transport is configured: alerts only reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, subject: &str, body: &str) {
        tracing::warn!(%subject, %body, "alert (mail not configured)");
    }
}

/// Mail notifier if `smtp` is set and valid, otherwise [`LogNotifier`].
pub fn from_config(smtp: Option<&SmtpConfig>) -> Box<dyn Notifier> {
    let Some(smtp) = smtp else {
        tracing::info!("no smtp section configured; alerts will only be logged");
        return Box::new(LogNotifier);
    };

    match MailNotifier::new(smtp) {
        Ok(notifier) => Box::new(notifier),
        Err(err) => {
            tracing::error!(error = %err, "invalid smtp settings; alerts will only be logged");
            Box::new(LogNotifier)
        }
    }
}
