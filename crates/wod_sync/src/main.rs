use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use notion_store_client::RecordStore;
use notion_store_client::http_client::ReqwestStoreClient;

use wod_sync::config::Config;
use wod_sync::dates::ScheduleDate;
use wod_sync::schedule;
use wod_sync::sync::SyncEngine;

#[derive(Parser)]
#[command(
    name = "wod-sync",
    about = "Sync the daily WOD schedule into the record store"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse schedule text and create the missing records for one date.
    Sync {
        /// File holding the fetched schedule text; stdin when omitted.
        file: Option<PathBuf>,
        /// Target date override (YYYY-MM-DD); defaults to today in the
        /// configured time zone.
        #[arg(long)]
        date: Option<String>,
    },
    /// List every child of a container, following pagination to the end.
    Inspect { container_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = ReqwestStoreClient::new(&config.base_url, config.api_token.clone());

    match cli.command {
        Command::Sync { file, date } => {
            let target = match date {
                Some(s) => ScheduleDate::from_iso(&s)?,
                None => ScheduleDate::today_in(config.timezone),
            };
            let text = read_schedule_text(file.as_deref())?;
            let entries = schedule::parse_schedule(&text);
            tracing::info!(
                total = entries.len(),
                date = %target.source_format(),
                "parsed schedule text"
            );

            let engine = SyncEngine::new(client, config.root_page_id, config.source_url);
            let report = engine.sync(&target, &entries).await?;
            println!(
                "{}: created {} record(s), skipped {} duplicate(s)",
                target.iso(),
                report.created,
                report.skipped
            );
        }
        Command::Inspect { container_id } => {
            let children = client.list_children(&container_id).await?;
            for child in &children {
                println!("{}\t{}\t{}", child.id, child.kind, child.title());
            }
            println!("{} child item(s)", children.len());
        }
    }

    Ok(())
}

/// Configure logging from `WOD_SYNC_LOG_LEVEL` (or fallback to `RUST_LOG`,
/// default `info`).
fn init_tracing() {
    let log_env = std::env::var("WOD_SYNC_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

/// The page fetch itself is the caller's job; the pipeline takes the raw
/// text from a file or stdin.
fn read_schedule_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading schedule text from stdin")?;
            Ok(text)
        }
    }
}
