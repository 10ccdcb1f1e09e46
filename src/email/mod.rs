//! Outbound email.
//!
//! The backend only produces one kind of message (a welcome mail carrying the
//! verification link), so delivery sits behind a small trait. Messages are
//! sent inline at the call site; a queueing integration would implement
//! `EmailSender` against its broker of choice.
//!
//! The default sender is `LogEmailSender`, which logs and returns `Ok(())`.

use anyhow::Result;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error for the caller to log.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

/// Welcome message sent when an account is created.
#[must_use]
pub fn welcome_message(to_email: &str, name: &str, verify_url: &str) -> EmailMessage {
    EmailMessage {
        to_email: to_email.to_string(),
        subject: "Welcome to Luanto".to_string(),
        body: format!("Hi {name}, confirm your email address: {verify_url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_message_includes_name_and_link() {
        let message = welcome_message("alice@example.com", "Alice", "https://app/verify#t=x");
        assert_eq!(message.to_email, "alice@example.com");
        assert!(message.body.contains("Alice"));
        assert!(message.body.contains("https://app/verify#t=x"));
    }
}
