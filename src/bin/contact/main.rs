#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Terminal front-end for the contact form

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use portfolio_contact::{
    client::{ContactForm, SubmissionState},
    domain::contact::Field,
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The relay endpoint, e.g. http://localhost:3000/api/sendEmail
    #[arg(long, env = "CONTACT_ENDPOINT")]
    pub endpoint: String,

    /// Sender name
    #[arg(long)]
    pub name: String,

    /// Sender email address
    #[arg(long)]
    pub email: String,

    /// Message body
    #[arg(long)]
    pub message: String,

    /// How long the outcome stays visible before the form resets
    #[arg(long, default_value = "3000")]
    pub reset_delay_ms: u64,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let form = ContactForm::new(args.endpoint)
        .with_reset_delay(Duration::from_millis(args.reset_delay_ms));

    form.update_field(Field::Name, &args.name);
    form.update_field(Field::Email, &args.email);
    form.update_field(Field::Message, &args.message);

    if let Err(e) = form.validate() {
        eprintln!("warning: {e}; the relay will likely reject this");
    }

    let mut states = form.subscribe();

    let printer = tokio::spawn(async move {
        println!("{}", *states.borrow_and_update());

        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            println!("{state}");

            if state == SubmissionState::Idle {
                break;
            }
        }
    });

    let outcome = form.submit().await;

    printer.await?;

    if let Err(e) = outcome {
        bail!(e);
    }

    Ok(())
}
