//! LINE Notify CLI Demo
//!
//! Drives every client operation from the command line. Configuration comes
//! from `LINE_NOTIFY_CLIENT_ID`, `LINE_NOTIFY_CLIENT_SECRET`, and
//! `LINE_NOTIFY_CALLBACK_URL`.
//!
//! Run with:
//!   cargo run -p line-notify-cli -- auth-url
//!   cargo run -p line-notify-cli -- authorize <code>
//!   cargo run -p line-notify-cli -- send -t TOKEN_A -t TOKEN_B "Deploy finished"
//!   cargo run -p line-notify-cli -- revoke TOKEN_A TOKEN_B
//!
//! Set `RUST_LOG=line_notify=info,line_notify_client=debug` to see request logs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use line_notify_client::{AccessToken, AuthorizationCode, NotifyClient, NotifyConfig, NotifyError};

/// LINE Notify command-line client
#[derive(Parser, Debug)]
#[command(name = "line-notify")]
#[command(about = "Authorize, send, and revoke LINE Notify tokens")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the consent URL to open in a browser
    AuthUrl,

    /// Exchange an authorization code and show the bound recipient
    Authorize {
        /// Code from the callback redirect
        code: String,
    },

    /// Show the recipient a token notifies
    Status {
        /// Access token
        token: String,
    },

    /// Send a text message to one or more tokens
    Send {
        /// Access token (repeatable)
        #[arg(long = "token", short = 't', required = true)]
        tokens: Vec<String>,

        /// Message text
        message: String,
    },

    /// Revoke one or more tokens
    Revoke {
        /// Access tokens
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("line_notify=info,line_notify_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = NotifyConfig::from_env().context("loading LINE Notify configuration")?;
    let client = NotifyClient::new(config)?;

    match args.command {
        Command::AuthUrl => {
            println!("{}", client.authorization_url());
        }
        Command::Authorize { code } => {
            let profile = client.authorize(&AuthorizationCode::new(code)).await?;
            match profile.token {
                Some(token) => {
                    println!("{} {}", style("Token:").cyan().bold(), token);
                    println!(
                        "{} {}",
                        style("Target:").cyan().bold(),
                        profile.name.as_deref().unwrap_or("(unknown)")
                    );
                }
                None => println!("{}", style("No access token issued").yellow()),
            }
        }
        Command::Status { token } => {
            match client.resolve_identity(&AccessToken::new(token)).await? {
                Some(name) => println!("{} {name}", style("Target:").cyan().bold()),
                None => println!("{}", style("Token is invalid or revoked").yellow()),
            }
        }
        Command::Send { tokens, message } => {
            let count = tokens.len();
            report(client.send_text_all(tokens, &message).await, "sent to", count)?;
        }
        Command::Revoke { tokens } => {
            let count = tokens.len();
            report(client.revoke_all(tokens).await, "revoked", count)?;
        }
    }

    Ok(())
}

/// Print a bulk outcome, one line per failed recipient
fn report(result: line_notify_client::Result<()>, verb: &str, count: usize) -> anyhow::Result<()> {
    let failed = result.as_ref().err().map_or(0, |e| e.failures().len());
    tracing::info!(verb, recipients = count, failed, "Bulk operation finished");

    match result {
        Ok(()) => {
            println!("{} {verb} {count} recipient(s)", style("✓").green());
            Ok(())
        }
        Err(NotifyError::Bulk { attempted, failures }) => {
            for failure in &failures {
                eprintln!("{} {}: {}", style("✗").red(), failure.token, failure.error);
            }
            anyhow::bail!("{} of {attempted} recipient(s) failed", failures.len())
        }
        Err(e) => Err(e.into()),
    }
}
