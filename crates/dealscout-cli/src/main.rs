//! dealscout - browse deals and goals from the command line

mod cli;
mod logging;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use dealscout_client::DealScoutApiClient;
use dealscout_discovery::{
    AnalysisState, AnalysisTracker, DealList, DiscoverySession, DiscoverySettings, GoalList,
    ListStatus, SearchBackend, Viewport,
};
use tracing::{info, warn};

use crate::cli::{AnalyzeArgs, Cli, Command, ListArgs};
use crate::render::Describe;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    let settings = DiscoverySettings::load_with_overrides(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load settings")?;
    let client = DealScoutApiClient::new(settings.client_config())?;
    info!(base_url = %settings.api.base_url, "DealScout client ready");

    match &cli.command {
        Command::Deals(args) => browse(DealList::new(client), &settings, args).await,
        Command::Goals(args) => browse(GoalList::new(client), &settings, args).await,
        Command::Analyze(args) => analyze(client, &settings, args).await,
    }
}

async fn browse<B>(backend: B, settings: &DiscoverySettings, args: &ListArgs) -> anyhow::Result<()>
where
    B: SearchBackend,
    B::Record: Describe,
{
    let kind = backend.kind();
    let viewport = if args.narrow {
        Viewport::Narrow
    } else {
        Viewport::Wide
    };
    let mut session = DiscoverySession::new(
        Arc::new(backend),
        args.criteria(settings.initial_criteria()),
        settings.pagination_options(),
    )
    .with_viewport(viewport);

    session.mount().await?;

    let view = session.view();
    if let ListStatus::Failed { message } = &view.status {
        bail!("{}", message);
    }

    match render::status_line(kind, &view.status) {
        Some(line) => println!("{}", line),
        None => {
            for item in &view.items {
                println!("{}", item.describe());
            }
        }
    }

    let pagination = session.pagination();
    if let Some(strip) = render::page_strip(pagination) {
        println!();
        println!(
            "Page {} of {} ({} {})",
            pagination.current, pagination.total_pages, pagination.total, kind
        );
        println!("{}", strip);
    } else {
        println!();
        println!("{} {} found", pagination.total, kind);
    }

    session.unmount();
    Ok(())
}

async fn analyze(
    client: DealScoutApiClient,
    settings: &DiscoverySettings,
    args: &AnalyzeArgs,
) -> anyhow::Result<()> {
    let flag = Arc::new(settings.free_analysis_flag()?);
    if flag.is_used() {
        info!("Free analysis already used");
    }

    let tracker = AnalysisTracker::with_flag(Arc::new(client), settings.poll_interval(), flag);
    let mut updates = tracker.subscribe();

    let mut state = tracker.resume(&args.deal_id).await?;
    if state == AnalysisState::NotRequested {
        state = tracker.request(&args.deal_id).await?;
    }

    let wait = async {
        while !state.is_terminal() {
            updates.changed().await?;
            state = updates.borrow_and_update().clone();
        }
        anyhow::Ok(state)
    };
    let state = match tokio::time::timeout(Duration::from_secs(args.timeout_secs), wait).await {
        Ok(state) => state?,
        Err(_) => {
            warn!(deal_id = %args.deal_id, "Gave up waiting for analysis");
            tracker.stop();
            bail!("Analysis still pending after {}s", args.timeout_secs);
        }
    };
    tracker.stop();

    match state {
        AnalysisState::Completed(analysis) => {
            println!("{}", render::analysis_report(&analysis));
            Ok(())
        }
        AnalysisState::Error(message) => bail!("{}", message),
        other => bail!("Unexpected analysis state: {:?}", other),
    }
}
