#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Mail relay server for the portfolio contact form

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use portfolio_contact::{
    domain::contact::ContactServiceImpl,
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{HttpServer, HttpServerConfig},
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP account that relays submissions
    #[clap(flatten)]
    pub smtp: SMTPConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = SMTPMailer::new(args.smtp);
    let contact_service = ContactServiceImpl::new(Arc::new(mailer));

    HttpServer::new(contact_service, args.server)
        .await?
        .run()
        .await
}
