use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use events_core::{EventsClient, EventsSession, Query, TransitionOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod ui;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use controller::{
    commands::ViewerCommand,
    orchestration::{dispatch_command, Flow},
};
use ui::{render_view, TextMap};

/// Browse an organization's upcoming events page by page.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the events API.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    organization_id: Option<i64>,
    /// One of 10, 25 or 100.
    #[arg(long)]
    per_page: Option<u32>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(v) = args.api_url {
        settings.api_base_url = v;
    }
    if let Some(v) = args.organization_id {
        settings.organization_id = Some(v);
    }
    if let Some(v) = args.per_page {
        settings.per_page = v;
    }
    let config = settings.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(
        api = %config.api_base_url,
        organization_id = %config.organization_id,
        per_page = %config.per_page,
        "starting events viewer"
    );

    let client = EventsClient::with_timeout(config.api_base_url.as_str(), config.request_timeout)
        .context("failed to build events API client")?;
    let mut session = EventsSession::start_with_query(
        Query {
            organization_id: config.organization_id,
            page: 1,
            per_page: config.per_page,
        },
        client,
        TextMap::default(),
    );

    let mut stdout = std::io::stdout();
    redraw(&session, &mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                if line.trim().is_empty() {
                    write!(stdout, "> ")?;
                    stdout.flush()?;
                    continue;
                }
                let flow = match ViewerCommand::parse(&line) {
                    Ok(command) => dispatch_command(&mut session, command),
                    Err(err) => Flow::Notice(err.to_string()),
                };
                match flow {
                    Flow::Render => redraw(&session, &mut stdout)?,
                    Flow::Notice(notice) => {
                        write!(stdout, "{notice}\n> ")?;
                        stdout.flush()?;
                    }
                    Flow::Quit => break,
                }
            }
            Some(outcome) = session.next_completion() => {
                if outcome == TransitionOutcome::Applied {
                    redraw(&session, &mut stdout)?;
                }
            }
        }
    }

    tracing::info!(fetches = session.fetches_issued(), "events viewer exiting");
    Ok(())
}

fn redraw(session: &EventsSession<EventsClient, TextMap>, out: &mut impl Write) -> Result<()> {
    let view = render_view(session.state(), &session.pagination(), session.map());
    write!(out, "\n{view}> ")?;
    out.flush()?;
    Ok(())
}
