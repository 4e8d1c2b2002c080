/**
 * Token Delivery
 *
 * This module delivers one-time tokens to users by email. The account
 * service depends only on the `Mailer` trait; whether the token actually
 * goes out over SMTP or just into the development log is wiring decided
 * at startup.
 */

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Which flow a token email belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEmailKind {
    VerifyEmail,
    ResetPassword,
}

impl TokenEmailKind {
    /// Subject line for this kind of token email
    pub fn subject(self) -> &'static str {
        match self {
            Self::VerifyEmail => "Verify your Craftlink email address",
            Self::ResetPassword => "Reset your Craftlink password",
        }
    }

    fn body(self, token: &str) -> String {
        match self {
            Self::VerifyEmail => format!(
                "Welcome to Craftlink!\n\n\
                 Use the following code to verify your email address. \
                 It expires in 24 hours.\n\n{token}\n\n\
                 If you did not create an account, you can ignore this email.\n"
            ),
            Self::ResetPassword => format!(
                "A password reset was requested for your Craftlink account.\n\n\
                 Use the following code to choose a new password. \
                 It expires in 1 hour.\n\n{token}\n\n\
                 If you did not request a reset, you can ignore this email.\n"
            ),
        }
    }
}

/// Errors from building or sending a token email
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers one-time tokens out-of-band
///
/// Failure is distinguishable from success so callers can roll back a
/// token whose delivery failed.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_token(&self, to: &str, kind: TokenEmailKind, token: &str)
        -> Result<(), MailError>;
}

/// SMTP settings read from the environment
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl SmtpConfig {
    /// Load SMTP settings from `SMTP_HOST`, `SMTP_USERNAME`,
    /// `SMTP_PASSWORD` and `SMTP_FROM`
    ///
    /// Returns `None` when `SMTP_HOST` is unset; the server then falls
    /// back to [`LogMailer`].
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Craftlink <no-reply@craftlink.dev>".to_string()),
        })
    }
}

/// Production mailer over lettre's async SMTP transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a relay transport from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config.from.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_token(
        &self,
        to: &str,
        kind: TokenEmailKind,
        token: &str,
    ) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(kind.subject())
            .body(kind.body(token))?;

        self.transport.send(message).await?;

        tracing::info!(to = %to, kind = ?kind, "Sent token email");
        Ok(())
    }
}

/// Development mailer that logs instead of sending
///
/// The destination and kind are logged; the token value itself is not.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_token(
        &self,
        to: &str,
        kind: TokenEmailKind,
        _token: &str,
    ) -> Result<(), MailError> {
        tracing::info!(to = %to, kind = ?kind, "SMTP not configured; token email logged only");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects_name_the_flow() {
        assert!(TokenEmailKind::VerifyEmail.subject().contains("Verify"));
        assert!(TokenEmailKind::ResetPassword.subject().contains("Reset"));
    }

    #[test]
    fn test_body_carries_the_token() {
        let token = "deadbeef";
        assert!(TokenEmailKind::VerifyEmail.body(token).contains(token));
        assert!(TokenEmailKind::ResetPassword.body(token).contains(token));
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let result = mailer
            .send_token("someone@example.com", TokenEmailKind::VerifyEmail, "abc123")
            .await;
        assert!(result.is_ok());
    }

    #[test]
    #[serial_test::serial]
    fn test_smtp_config_absent_without_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(SmtpConfig::from_env().is_none());
    }
}
