//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// A rendered message ready to hand to a [`Mailer`](super::Mailer).
///
/// Sender and recipient are owned by the mailer's account configuration, so
/// the message only carries what varies per submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Address replies should go to
    pub reply_to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub text: String,

    /// The HTML body of the email
    pub html: String,
}
