//! Email Module
//!
//! The notification collaborator: delivers one-time tokens out-of-band.
//! The account service only sees the [`Mailer`] trait, whose send failure
//! is distinguishable from success so issued tokens can be rolled back
//! when delivery fails.
//!
//! Two implementations:
//!
//! - **`SmtpMailer`** - lettre async SMTP transport, used when SMTP is
//!   configured
//! - **`LogMailer`** - logs the delivery instead of sending, used in
//!   development when SMTP is not configured

/// Mailer trait and implementations
pub mod mailer;

// Re-export commonly used types
pub use mailer::{LogMailer, MailError, Mailer, SmtpConfig, SmtpMailer, TokenEmailKind};
