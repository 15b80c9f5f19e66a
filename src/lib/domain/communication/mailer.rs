//! Email service module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::errors::EmailError;

mod message;

pub use message::OutgoingMessage;

/// Email service
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Deliver a message to the mailbox this mailer is configured for.
    ///
    /// # Arguments
    /// * `message` - The [`OutgoingMessage`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the provider has accepted the message,
    /// or an [`Err`] containing an [`EmailError`] if it was rejected.
    async fn send_email(&self, message: &OutgoingMessage) -> Result<(), EmailError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &OutgoingMessage) -> Result<(), EmailError>;
    }
}
