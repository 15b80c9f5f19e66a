//! SMTP email service implementation

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::{
    errors::EmailError,
    mailer::{Mailer, OutgoingMessage},
};

/// Display name used for the `From` header
const SENDER_NAME: &str = "Contact Form";

/// SMTP configuration
///
/// The account address doubles as sender and recipient: submissions are
/// delivered to the same mailbox that sends them.
#[derive(Clone, Default, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "465")]
    pub port: u16,

    /// The mail account address
    #[clap(long = "email-user", env = "EMAIL_USER")]
    pub username: Option<String>,

    /// The mail account password
    #[clap(long = "email-pass", env = "EMAIL_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the TLS certificate
    #[clap(
        long = "smtp-verify-tls",
        env = "SMTP_VERIFY_TLS",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub verify_tls: bool,

    /// Connect in plain text and upgrade with STARTTLS instead of implicit TLS
    #[clap(
        long = "smtp-starttls",
        env = "SMTP_STARTTLS",
        default_value = "false",
        action = clap::ArgAction::Set
    )]
    pub starttls: bool,
}

impl fmt::Debug for SMTPConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("verify_tls", &self.verify_tls)
            .field("starttls", &self.starttls)
            .finish()
    }
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// The account address and password, if both are configured
    fn credentials(&self) -> Result<(&str, &str), EmailError> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Ok((user.as_str(), pass.as_str()))
            }
            _ => Err(EmailError::MissingCredentials),
        }
    }

    /// Build a transport for the configured relay
    pub fn mailer(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let (user, pass) = self.credentials()?;
        let creds = Credentials::new(user.to_string(), pass.to_string());

        let parameters = TlsParameters::builder(self.config.host.to_string())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        let (relay, tls) = if self.config.starttls {
            (
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?,
                Tls::Required(parameters),
            )
        } else {
            (
                AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?,
                Tls::Wrapper(parameters),
            )
        };

        Ok(relay
            .credentials(creds)
            .port(self.config.port)
            .tls(tls)
            .build())
    }

    /// Assemble the provider message: `From` and `To` are the account itself
    pub fn message(&self, message: &OutgoingMessage) -> Result<Message, EmailError> {
        let (user, _) = self.credentials()?;
        let account = Mailbox::new(Some(SENDER_NAME.to_string()), user.parse()?);

        let mut builder = Message::builder()
            .from(account.clone())
            .to(account)
            .subject(message.subject.clone());

        // The sender's address may pass form validation yet not be a valid
        // RFC 5322 mailbox; the message still goes out, just without Reply-To.
        match message.reply_to.as_ref().parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => debug!(reply_to = %message.reply_to, error = %e, "omitting Reply-To"),
        }

        let email = builder.multipart(MultiPart::alternative_plain_html(
            message.text.clone(),
            message.html.clone(),
        ))?;

        Ok(email)
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), EmailError> {
        let email = self.message(message)?;

        debug!(host = %self.config.host, port = self.config.port, "sending via SMTP");

        match self.mailer().map_err(EmailError::from)?.send(email).await {
            Ok(_) => Ok(()),
            Err(e) => Err(EmailError::UnknownError(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::communication::email_addresses::EmailAddress;

    fn config(username: Option<&str>, password: Option<&str>) -> SMTPConfig {
        SMTPConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            verify_tls: true,
            starttls: false,
        }
    }

    fn outgoing() -> TestResult<OutgoingMessage> {
        Ok(OutgoingMessage {
            reply_to: EmailAddress::new("ann@example.com")?,
            subject: "New message from Ann".to_string(),
            text: "Name: Ann".to_string(),
            html: "<p>Ann</p>".to_string(),
        })
    }

    #[tokio::test]
    async fn test_send_without_credentials_fails() -> TestResult {
        for (user, pass) in [
            (None, Some("secret")),
            (Some("me@example.com"), None),
            (Some(""), Some("secret")),
        ] {
            let mailer = SMTPMailer::new(config(user, pass));

            let result = mailer.send_email(&outgoing()?).await;

            assert!(
                matches!(result, Err(EmailError::MissingCredentials)),
                "{user:?}/{pass:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn test_message_is_addressed_to_the_account() -> TestResult {
        let mailer = SMTPMailer::new(config(Some("me@example.com"), Some("secret")));

        let formatted = String::from_utf8(mailer.message(&outgoing()?)?.formatted())?;

        assert!(formatted.contains("<me@example.com>"));
        assert!(formatted.contains("Reply-To: ann@example.com"));
        assert!(formatted.contains("Subject: New message from Ann"));

        Ok(())
    }

    #[test]
    fn test_unparsable_sender_omits_reply_to() -> TestResult {
        let mailer = SMTPMailer::new(config(Some("me@example.com"), Some("secret")));

        for raw in [
            "a,b@example.com",
            "ann(x)@example.com",
            "a<b>@example.com",
            "a\"b@example.com",
        ] {
            let message = OutgoingMessage {
                reply_to: EmailAddress::new(raw)?,
                ..outgoing()?
            };

            let formatted = String::from_utf8(mailer.message(&message)?.formatted())?;

            assert!(!formatted.contains("Reply-To:"), "{raw:?}");
            assert!(formatted.contains("Subject: New message from Ann"), "{raw:?}");
        }

        Ok(())
    }

    #[test]
    fn test_debug_hides_password() {
        let config = config(Some("me@example.com"), Some("secret"));

        assert!(!format!("{config:?}").contains("secret"));
    }
}
