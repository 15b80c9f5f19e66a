//! Contact relay service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::Mailer;

use super::{emails::new_message, errors::RelayError, submission::ContactSubmission};

/// Contact relay service
#[async_trait]
pub trait ContactService: Clone + Send + Sync + 'static {
    /// Forwards a validated submission to the site owner's mailbox.
    ///
    /// Delivery is attempted exactly once; a provider failure is returned to
    /// the caller untouched.
    ///
    /// # Arguments
    /// * `submission` - The [`ContactSubmission`] to forward.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] if the provider accepted the message,
    /// or an [`Err`] containing a [`RelayError`] otherwise.
    async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
}

#[cfg(test)]
mock! {
    pub ContactService {}

    impl Clone for ContactService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ContactService for ContactService {
        async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
    }
}

/// Contact relay service implementation
#[derive(Debug, Clone)]
pub struct ContactServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
}

impl<M> ContactServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new contact service.
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl<M> ContactService for ContactServiceImpl<M>
where
    M: Mailer,
{
    async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        let message = new_message::render(submission)?;

        match self.mailer.send_email(&message).await {
            Ok(()) => {
                info!(sender = %submission.email(), "contact message delivered");

                Ok(())
            }
            Err(e) => {
                error!(sender = %submission.email(), error = %e, "contact message delivery failed");

                Err(e.into())
            }
        }
    }
}
