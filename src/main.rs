//! Assessment Recommender: find assessments for a role description or job posting
//!
//! Usage:
//!   recommender                  - Open the window
//!   recommender ask <query>      - Print recommendations for a query
//!   recommender url <link>       - Print recommendations for a job posting
//!   recommender status           - Probe backend health
//!   recommender help             - Show help

mod app;
mod backend;
mod commands;
mod config;
mod error;
mod probe;
mod query;
mod submitter;
mod ui;

use anyhow::Context;
use app::Recommender;
use backend::api::BackendClient;
use backend::types::RecommendationItem;
use commands::Command;
use config::Config;
use iced::{window, Size};
use probe::{AvailabilityState, Prober};
use query::Query;
use std::env;
use submitter::{RequestState, Submitter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // Initialize logging (use try_init to avoid panic if already initialized)
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();

    match Command::parse(args.as_slice()) {
        Command::Window => start_window(),
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(())
        }
        Command::Invalid { reason } => {
            eprintln!("{}", reason);
            std::process::exit(EXIT_USAGE);
        }
        cmd => {
            let result = run_cli_command(cmd);
            if let Err(e) = &result {
                eprintln!("Error: {:#}", e);
            }
            match exit_status(&result) {
                0 => Ok(()),
                code => std::process::exit(code),
            }
        }
    }
}

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Process exit status for a finished CLI command
fn exit_status(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => EXIT_FAILURE,
    }
}

fn connect() -> anyhow::Result<(Config, BackendClient)> {
    let config = Config::from_env().context("Invalid configuration")?;
    let backend = BackendClient::new(&config).context("Failed to build HTTP client")?;
    Ok((config, backend))
}

fn run_cli_command(cmd: Command) -> anyhow::Result<()> {
    let (config, backend) = connect()?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    match cmd {
        Command::Status => {
            let prober = Prober::new(backend.clone(), &config.healthy_status);
            match rt.block_on(prober.probe()) {
                AvailabilityState::Available => println!("Backend at {} is available", backend.endpoint()),
                _ => anyhow::bail!("Backend at {} is unavailable", backend.endpoint()),
            }
        }
        Command::Ask { text, json } => submit_and_print(&rt, backend, Query::text(text), json)?,
        Command::Url { url, text, json } => {
            let query = if text.is_empty() { Query::url(url) } else { Query::new(text, url) };
            submit_and_print(&rt, backend, query, json)?
        }
        Command::Window | Command::Help | Command::Invalid { .. } => {}
    }
    Ok(())
}

fn submit_and_print(
    rt: &tokio::runtime::Runtime,
    backend: BackendClient,
    query: Query,
    json: bool,
) -> anyhow::Result<()> {
    let mut submitter = Submitter::new(backend);
    if !json {
        println!("Getting recommendations...");
    }

    let state = rt.block_on(submitter.submit(&query))?;
    match state {
        RequestState::Succeeded { items, message } => {
            if json {
                println!("{}", serde_json::to_string_pretty(items)?);
                return Ok(());
            }
            if let Some(message) = message {
                println!("{}\n", message);
            }
            if items.is_empty() {
                println!("No matching assessments found.");
            }
            for (i, item) in items.iter().enumerate() {
                print_item(i + 1, item);
            }
            Ok(())
        }
        RequestState::Failed(err) => anyhow::bail!("{}", err),
        RequestState::Idle | RequestState::InFlight => Ok(()),
    }
}

fn print_item(rank: usize, item: &RecommendationItem) {
    println!("{}. {}", rank, item.name);
    if !item.description.is_empty() {
        println!("   {}", item.description);
    }
    let (remote, adaptive) = app::feature_labels(item);
    println!("   {} | {}", remote, adaptive);
    if !item.keywords.is_empty() {
        println!("   Keywords: {}", item.keywords.join(", "));
    }
    if !item.url.is_empty() {
        println!("   {}", item.url);
    }
}

fn start_window() -> iced::Result {
    let (config, backend) = match connect() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            return Ok(());
        }
    };
    let prober = Prober::new(backend.clone(), &config.healthy_status);

    tracing::info!("Starting recommender window against {}", config.api_url);

    iced::application("Assessment Recommender", Recommender::update, Recommender::view)
        .subscription(Recommender::subscription)
        .theme(Recommender::theme)
        .window(window::Settings {
            size: Size::new(760.0, 680.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Recommender::new(backend, prober))
}
