//! Embed Harness - Main Entry Point
//!
//! Reads operator commands from stdin, drives a configuration session and
//! prints the resulting surface descriptor after every change.

use anyhow::Context;
use clap::Parser;
use embed_harness::{
    collaborator::LoggingEmbedder,
    config::HarnessConfig,
    embed::PLACEHOLDER_INSTRUCTIONS,
    session::{parse_command, Command, Session, HELP},
    EmbedType, SurfaceDescriptor,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "embed-harness", version, about = "Configure and preview embedded analytics surfaces")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Embed type to start with, overriding the config file
    #[arg(short, long, value_parser = parse_embed_type)]
    embed_type: Option<EmbedType>,
}

fn parse_embed_type(value: &str) -> Result<EmbedType, String> {
    EmbedType::parse(value).ok_or_else(|| format!("unknown embed type '{}'", value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HarnessConfig::load_from(path)?,
        None => HarnessConfig::load_or_default(),
    };
    if let Some(embed_type) = args.embed_type {
        config.session = config.session.with_initial_embed_type(embed_type);
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = embed_harness::logging::init(&config.logging)?;

    tracing::info!("Starting embed harness");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let (events_tx, events_rx) = crossbeam_channel::unbounded();
    let embedder = LoggingEmbedder::from_config(events_tx, &config.collaborator);
    let mut session = Session::new(embedder, events_rx, runtime.handle().clone(), &config.session);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print_surface(&mut stdout, &session.surface())?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Action(action)) => {
                if session.dispatch(action) {
                    print_surface(&mut stdout, &session.surface())?;
                }
            }
            Ok(Command::Show) => {
                session.pump();
                writeln!(
                    stdout,
                    "{}",
                    serde_json::to_string_pretty(session.machine().record())?
                )?;
                print_surface(&mut stdout, &session.surface())?;
            }
            Ok(Command::Options) => {
                let options = session.machine().options();
                writeln!(stdout, "modes: {:?}", options.modes)?;
                writeln!(stdout, "page views: {:?}", options.page_views)?;
            }
            Ok(Command::Help) => writeln!(stdout, "{}", HELP)?,
            Ok(Command::Quit) => break,
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    session.pump();
    let stats = session.request_stats();
    tracing::info!(
        "Shutting down ({} requests succeeded, {} failed)",
        stats.succeeded,
        stats.failed
    );

    // Release the surface before the runtime goes away
    drop(session);
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));

    Ok(())
}

fn print_surface(out: &mut impl Write, descriptor: &SurfaceDescriptor) -> anyhow::Result<()> {
    if descriptor.is_placeholder() {
        writeln!(out, "Surface will be displayed here")?;
        for (i, step) in PLACEHOLDER_INSTRUCTIONS.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, step)?;
        }
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(descriptor)?)?;
    }
    Ok(())
}
