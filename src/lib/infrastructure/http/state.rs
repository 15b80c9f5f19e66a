//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::contact::ContactService;

/// Global application state.
///
/// Read-only once built; every request sees the same service and start time.
#[derive(Clone)]
pub struct AppState<C: ContactService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Contact relay service
    pub contact: Arc<C>,
}

/// Implementation of the application state
impl<C> AppState<C>
where
    C: ContactService,
{
    /// Create a new application state
    pub fn new(contact: C) -> Self {
        Self {
            start_time: Utc::now(),
            contact: Arc::new(contact),
        }
    }
}

impl<C> fmt::Debug for AppState<C>
where
    C: ContactService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("contact", &"ContactService")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::{
    communication::mailer::MockMailer,
    contact::{tests::MockContactService, ContactServiceImpl},
};

/// State wired to the real relay service over a mock mailer
#[cfg(test)]
pub fn test_state(mailer: Option<MockMailer>) -> AppState<ContactServiceImpl<MockMailer>> {
    let mailer = mailer.unwrap_or_else(MockMailer::new);

    AppState::new(ContactServiceImpl::new(Arc::new(mailer)))
}

/// State wired to a mock relay service
#[cfg(test)]
pub fn test_state_with_service(contact: MockContactService) -> AppState<MockContactService> {
    AppState::new(contact)
}
