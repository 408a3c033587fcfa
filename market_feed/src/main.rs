use std::{
    io::{self, BufRead},
    sync::Arc,
};

use anyhow::Context;
use clap::Parser;
use market_feed::{
    Command, HttpFeed, Runtime, cli::Cli, present::SvgDirectory,
    present::TerminalPresenter,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Forward stdin lines as commands until EOF or `quit`.
fn spawn_stdin_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    if tx.blocking_send(cmd).is_err() || cmd == Command::Quit {
                        break;
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let cfg = cli.load_config()?;
    info!(base_url = %cfg.feed.base_url, range = %cfg.charts.default_range, "starting dashboard");

    let feed = Arc::new(
        HttpFeed::new(&cfg.feed.base_url, cfg.feed.timeout())
            .context("cannot set up the dashboard feed")?,
    );
    let provider = SvgDirectory::new(cfg.charts.svg_dir.clone(), cfg.charts.width, cfg.charts.height);
    let mut runtime = Runtime::new(feed.clone(), feed, provider)
        .with_palettes(cfg.palettes.clone())
        .with_intervals(cfg.schedule.intervals())
        .with_range(cfg.charts.default_range);
    let mut presenter = TerminalPresenter::stdout().with_clock(cli.clock);

    let summary = if cli.once {
        runtime.run_once(&mut presenter).await
    } else {
        let (tx, rx) = mpsc::channel(16);
        spawn_stdin_reader(tx);
        runtime.run(&mut presenter, rx).await
    };

    info!(
        metrics = summary.metrics_applied,
        news = summary.news_applied,
        failures = summary.failures,
        "dashboard finished"
    );
    if cli.once && summary.metrics_applied == 0 {
        anyhow::bail!("metrics refresh failed");
    }
    Ok(())
}
