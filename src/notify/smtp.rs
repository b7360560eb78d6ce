use std::fmt;
use std::time::Duration;

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};

use super::Notifier;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors while building or delivering an alert mail.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid email address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("send failed: {0}")]
    Send(String),
}

/// Where and how alerts are mailed.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address, e.g. `alerts@example.com` or `Alerts <alerts@example.com>`.
    pub from: String,
    /// Fixed recipient of every alert.
    pub to: String,
    /// Upgrade the connection with STARTTLS. Disable only for local relays.
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

fn default_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("to", &self.to)
            .field("starttls", &self.starttls)
            .finish()
    }
}

/// Sends alerts as plain-text mail over an authenticated SMTP session.
pub struct MailNotifier {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl MailNotifier {
    /// Validate addresses and build the transport. No connection is made yet.
    #[tracing::instrument(
        name = "mail_notifier_new",
        skip(config),
        fields(host = %config.host, port = config.port, starttls = config.starttls)
    )]
    pub fn new(config: &SmtpConfig) -> Result<Self, TransportError> {
        let from = parse_mailbox(&config.from)?;
        let to = parse_mailbox(&config.to)?;

        let builder = if config.starttls {
            SmtpTransport::starttls_relay(&config.host)
                .map_err(|e| TransportError::Connection(e.to_string()))?
        } else {
            SmtpTransport::builder_dangerous(&config.host)
        };

        let mut builder = builder.port(config.port).timeout(Some(SMTP_TIMEOUT));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::debug!("SMTP transport initialized");
        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    /// Send one message to the configured recipient.
    #[tracing::instrument(name = "mail_send", skip(self, body), fields(to = %self.to))]
    pub fn send(&self, subject: &str, body: &str) -> Result<(), TransportError> {
        let message = build_message(&self.from, &self.to, subject, body)?;
        self.transport
            .send(&message)
            .map_err(|e| TransportError::Send(e.to_string()))?;
        tracing::info!("alert mail sent");
        Ok(())
    }
}

impl Notifier for MailNotifier {
    fn notify(&self, subject: &str, body: &str) {
        if let Err(err) = self.send(subject, body) {
            tracing::error!(%subject, error = %err, "failed to deliver alert");
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse()
        .map_err(|e| TransportError::Address(format!("{address}: {e}")))
}

fn build_message(
    from: &Mailbox,
    to: &Mailbox,
    subject: &str,
    body: &str,
) -> Result<Message, TransportError> {
    Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| TransportError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "127.0.0.1".into(),
            port: 1,
            username: Some("alerts@example.com".into()),
            password: Some("hunter2".into()),
            from: "Alerts <alerts@example.com>".into(),
            to: "admin@example.com".into(),
            starttls: false,
        }
    }

    #[test]
    fn debug_redacts_password() {
        let shown = format!("{:?}", config());
        assert!(shown.contains("[REDACTED]"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn rejects_invalid_recipient() {
        let mut cfg = config();
        cfg.to = "not an address".into();
        let err = MailNotifier::new(&cfg).err().unwrap();
        assert!(matches!(err, TransportError::Address(_)), "got {err:?}");
    }

    #[test]
    fn builds_plain_text_message() {
        let from: Mailbox = "alerts@example.com".parse().unwrap();
        let to: Mailbox = "admin@example.com".parse().unwrap();
        let message = build_message(
            &from,
            &to,
            "Container web down",
            "Attempting to restart web.",
        )
        .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Container web down"));
        assert!(raw.contains("To: admin@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("Attempting to restart web."));
    }

    #[test]
    fn send_to_unreachable_server_fails() {
        let notifier = MailNotifier::new(&config()).unwrap();
        let err = notifier.send("subject", "body").unwrap_err();
        assert!(matches!(err, TransportError::Send(_)));
    }

    #[test]
    fn notify_swallows_delivery_failure() {
        let notifier = MailNotifier::new(&config()).unwrap();
        notifier.notify("subject", "body");
    }

    #[test]
    fn yaml_defaults_port_and_starttls() {
        let cfg: SmtpConfig = serde_yaml::from_str(
            "host: smtp.example.com\nfrom: a@example.com\nto: b@example.com\n",
        )
        .unwrap();
        assert_eq!(cfg.port, 587);
        assert!(cfg.starttls);
        assert!(cfg.password.is_none());
    }
}
