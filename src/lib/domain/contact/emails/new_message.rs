//! New contact message email

use askama::Template;

use crate::domain::{
    communication::mailer::OutgoingMessage,
    contact::{errors::RelayError, submission::ContactSubmission},
};

/// New contact message template
#[derive(Debug, Template)]
#[template(path = "emails/contact/new_message.html")]
pub struct NewMessageTemplate<'a> {
    /// The sender's name
    pub name: &'a str,

    /// The sender's email address
    pub email: &'a str,

    /// The message, line breaks preserved
    pub message: &'a str,
}

impl<'a> NewMessageTemplate<'a> {
    /// Creates a new `NewMessageTemplate`
    pub fn new(submission: &'a ContactSubmission) -> Self {
        Self {
            name: submission.name(),
            email: submission.email().as_ref(),
            message: submission.message(),
        }
    }

    /// The subject line
    pub fn subject(&self) -> String {
        format!("New message from {}", self.name)
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        format!(
            "Name: {name}\nEmail: {email}\nMessage: {message}",
            name = self.name,
            email = self.email,
            message = self.message
        )
    }
}

/// Render a submission into the message delivered to the site owner
pub fn render(submission: &ContactSubmission) -> Result<OutgoingMessage, RelayError> {
    let template = NewMessageTemplate::new(submission);

    let html = css_inline::inline(&template.render()?)?;

    Ok(OutgoingMessage {
        reply_to: submission.email().clone(),
        subject: template.subject(),
        text: template.render_plain(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::contact::FormData;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission::try_from(FormData::new(name, email, message)).expect("valid form")
    }

    #[test]
    fn test_subject_names_the_sender() {
        let submission = submission("Ann", "ann@example.com", "Hi");

        assert_eq!(
            NewMessageTemplate::new(&submission).subject(),
            "New message from Ann"
        );
    }

    #[test]
    fn test_plain_body_embeds_every_field() {
        let submission = submission("Ann", "ann@example.com", "Hi\nthere");

        assert_eq!(
            NewMessageTemplate::new(&submission).render_plain(),
            "Name: Ann\nEmail: ann@example.com\nMessage: Hi\nthere"
        );
    }

    #[test]
    fn test_html_body_links_the_sender_and_preserves_line_breaks() -> TestResult {
        let message = render(&submission("Ann", "ann@example.com", "Hi\nthere"))?;

        assert!(message.html.contains("New Contact Form Submission"));
        assert!(message.html.contains("Ann"));
        assert!(message.html.contains(r#"href="mailto:ann@example.com""#));
        assert!(message.html.contains("Hi\nthere"));
        assert!(message.html.contains("pre-line"));
        assert_eq!(message.reply_to.to_string(), "ann@example.com");

        Ok(())
    }

    #[test]
    fn test_html_body_escapes_markup() -> TestResult {
        let message = render(&submission("Ann", "ann@example.com", "<script>x</script>"))?;

        assert!(!message.html.contains("<script>"));
        assert!(message.text.contains("<script>x</script>"));

        Ok(())
    }
}
