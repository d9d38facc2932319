mod api;
mod app;
mod cli;
mod client;
mod config;
mod error;
mod runner;
mod session;
mod tui;

use clap::Parser;
use color_eyre::Result;
use crossterm::event;
use dotenv::dotenv;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use api::format_score;
use app::App;
use cli::{Cli, Commands};
use client::{Analyzer, SentimentClient};
use config::Settings;
use runner::{run_command, AppCommand, AppEvent};
use session::{AnalysisSession, Phase};
use tui::{restore_terminal, setup_terminal};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let cli = Cli::parse();
    cli.validate()?;
    let _log_guard = init_tracing(&cli)?;

    let settings = Settings::from_env()?;
    info!(endpoint = %settings.endpoint, "resolved sentiment endpoint");

    match cli.command {
        Some(Commands::Analyze { text }) => run_once(&settings, text).await,
        Some(Commands::Check) => run_check(&settings).await,
        None => run_tui(settings).await,
    }
}

/// One-shot analysis for scripting: prints the same fields the interactive
/// screen shows and exits non-zero when the submission fails.
async fn run_once(settings: &Settings, text: String) -> Result<()> {
    let client = SentimentClient::new(settings)?;
    info!(endpoint = %client.endpoint(), "analyzing from the command line");

    let mut session = AnalysisSession::new();
    session.set_input(text);
    if let Some(payload) = session.submit() {
        let outcome = client.analyze(&payload).await;
        session.resolve(outcome);
    }

    match session.phase() {
        Phase::Succeeded => {
            if let Some(result) = session.result() {
                println!("Overall Sentiment: {}", result.display_label());
                println!("Compound Score: {}", result.display_score());
                if let Some(detail) = &result.scores {
                    println!(
                        "Positive: {}  Neutral: {}  Negative: {}",
                        format_score(Some(detail.pos)),
                        format_score(Some(detail.neu)),
                        format_score(Some(detail.neg)),
                    );
                }
            }
            Ok(())
        }
        _ => {
            let message = session
                .error()
                .unwrap_or("analysis did not produce an outcome");
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

async fn run_check(settings: &Settings) -> Result<()> {
    let client = SentimentClient::new(settings)?;
    match client.health().await {
        Ok(health) => {
            println!("{} ({})", health.status, client.origin());
            Ok(())
        }
        Err(err) => {
            eprintln!("Service check failed: {}", err);
            std::process::exit(1);
        }
    }
}

async fn run_tui(settings: Settings) -> Result<()> {
    let client = SentimentClient::new(&settings)?;

    let (tx_cmd, mut rx_cmd) = mpsc::unbounded_channel::<AppCommand>();
    let (tx_evt, rx_evt) = mpsc::unbounded_channel::<AppEvent>();

    let mut app = App::new(tx_cmd, rx_evt, &settings);

    tokio::spawn(async move {
        while let Some(cmd) = rx_cmd.recv().await {
            run_command(cmd, &client, &tx_evt).await;
        }
    });

    let mut terminal = setup_terminal()?;
    loop {
        terminal.draw(|f| app.render(f))?;

        app.tick_spinner();

        let timeout = Duration::from_millis(80);
        if event::poll(timeout)? {
            let ev = event::read()?;
            if app.on_event(ev) {
                break;
            }
        }

        app.poll_async();
    }
    restore_terminal(terminal)?;

    Ok(())
}

/// Logs go to a file when `--log-file` is set, to stderr for the one-shot
/// subcommands, and nowhere in interactive mode so the alternate screen
/// stays clean. The returned guard must live until exit to flush the
/// non-blocking writer.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.get_tracing_level().to_string()));

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        return Ok(Some(guard));
    }

    if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(None)
}
