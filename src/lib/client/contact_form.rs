//! Contact form controller

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use thiserror::Error;
use tokio::{runtime::Handle, sync::watch, task::AbortHandle};
use tracing::{debug, warn};

use crate::domain::contact::{
    errors::{FieldError, SubmissionError},
    ContactSubmission, Field, FormData,
};

/// How long `success` and `error` stay visible before reverting to `idle`
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Fallback message for failures whose body carries none
const GENERIC_FAILURE: &str = "Failed to send message";

/// Characters of a non-JSON body kept for diagnostics
const DIAGNOSTIC_LEN: usize = 100;

/// Lifecycle of a single submission
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Ready for input
    #[default]
    Idle,

    /// A request is in flight; further submissions are ignored
    Submitting,

    /// The relay accepted the message
    Success,

    /// The request failed for any reason
    Error,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        };

        write!(f, "{label}")
    }
}

/// What a call to [`ContactForm::submit`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The relay accepted the message
    Sent,

    /// Another submission was in flight, so nothing was sent
    Skipped,
}

/// Reasons a submission ends in the `error` state
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The relay could not be reached or the response could not be read
    #[error("could not reach the relay: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with something other than JSON
    #[error("Server returned non-JSON response: {0}")]
    NotJson(String),

    /// The relay claimed JSON but the body did not parse
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The relay answered with a non-success status
    #[error("{message}")]
    Rejected {
        /// HTTP status of the response
        status: StatusCode,

        /// The body's `message`, or a generic one
        message: String,
    },
}

/// Drives one contact form: holds its fields, submits them to the relay and
/// publishes the submission state for rendering.
///
/// At most one request is in flight per instance. A terminal state reverts to
/// [`SubmissionState::Idle`] after the reset delay; starting a new submission
/// cancels any reset still pending from the previous one.
#[derive(Debug)]
pub struct ContactForm {
    http_client: Client,
    endpoint: String,
    reset_delay: Duration,
    form: Mutex<FormData>,
    state: Arc<watch::Sender<SubmissionState>>,
    pending_reset: Mutex<Option<AbortHandle>>,
}

impl ContactForm {
    /// Create an empty form that submits to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);

        Self {
            http_client: Client::new(),
            endpoint: endpoint.into(),
            reset_delay: DEFAULT_RESET_DELAY,
            form: Mutex::new(FormData::default()),
            state: Arc::new(state),
            pending_reset: Mutex::new(None),
        }
    }

    /// Override how long terminal states are shown
    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    /// Overwrite one field. No validation happens here.
    pub fn update_field(&self, field: Field, value: &str) {
        self.fields().set(field, value);
    }

    /// Overwrite one field addressed by its wire name
    pub fn update_field_by_name(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.update_field(name.parse()?, value);

        Ok(())
    }

    /// A snapshot of the current fields
    pub fn form(&self) -> FormData {
        self.fields().clone()
    }

    /// Check the fields the way the relay will, without sending anything
    pub fn validate(&self) -> Result<(), SubmissionError> {
        ContactSubmission::try_from(self.form()).map(|_| ())
    }

    /// The current submission state
    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    /// A receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Submit the current fields to the relay.
    ///
    /// Returns [`Submission::Skipped`] without sending anything while another
    /// submission is in flight. Otherwise the state moves to `submitting`, then
    /// to `success` (fields cleared) or `error`, and back to `idle` after the
    /// reset delay. Dropping the future before the relay answers counts as
    /// an `error`.
    pub async fn submit(&self) -> Result<Submission, SubmitError> {
        let started = self.state.send_if_modified(|state| {
            if *state == SubmissionState::Submitting {
                false
            } else {
                *state = SubmissionState::Submitting;
                true
            }
        });

        if !started {
            debug!("submission already in flight, ignoring");
            return Ok(Submission::Skipped);
        }

        if let Some(reset) = self.pending().take() {
            reset.abort();
        }

        let mut in_flight = InFlight {
            form: self,
            settled: false,
        };

        let form = self.form();
        let outcome = self.send(&form).await;

        in_flight.settled = true;

        match outcome {
            Ok(()) => {
                self.fields().clear();
                self.finish(SubmissionState::Success);

                Ok(Submission::Sent)
            }
            Err(e) => {
                warn!(error = %e, "contact submission failed");
                self.finish(SubmissionState::Error);

                Err(e)
            }
        }
    }

    /// POST the form and interpret the relay's answer
    async fn send(&self, form: &FormData) -> Result<(), SubmitError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await?;

        let status = response.status();

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().starts_with("application/json"));

        if !is_json {
            let text = response.text().await?;

            return Err(SubmitError::NotJson(
                text.chars().take(DIAGNOSTIC_LEN).collect(),
            ));
        }

        let body: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(GENERIC_FAILURE)
                .to_string();

            return Err(SubmitError::Rejected { status, message });
        }

        Ok(())
    }

    /// Enter a terminal state and schedule the revert to `idle`
    fn finish(&self, terminal: SubmissionState) {
        debug!(state = %terminal, "submission finished");

        self.state.send_replace(terminal);

        let Ok(runtime) = Handle::try_current() else {
            // Nothing can run the timer, so revert right away.
            self.state.send_replace(SubmissionState::Idle);
            return;
        };

        let state = Arc::clone(&self.state);
        let delay = self.reset_delay;

        let reset = runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            state.send_if_modified(|state| match state {
                SubmissionState::Success | SubmissionState::Error => {
                    *state = SubmissionState::Idle;
                    true
                }
                _ => false,
            });
        });

        if let Some(previous) = self.pending().replace(reset.abort_handle()) {
            previous.abort();
        }
    }

    fn fields(&self) -> MutexGuard<'_, FormData> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pending(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pending_reset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Moves an abandoned submission to `error` when the `submit` future is
/// dropped before the relay answers.
struct InFlight<'a> {
    form: &'a ContactForm,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("contact submission abandoned before the relay answered");
            self.form.finish(SubmissionState::Error);
        }
    }
}
