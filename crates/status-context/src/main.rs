// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! status-context: bounded git status and environment context for LLM prompts
//!
//! Prints an environment block and a size-bounded git status report wrapped
//! in a `<system-reminder>` envelope, ready to be injected ahead of a model
//! request. Logs go to stderr; stdout carries only the context.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use status_context::config::{Command, Config};
use status_context::env::SessionInfo;
use status_context::hook::{render_porcelain, run_hook};
use status_context::settings::Settings;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match config.command {
        Some(Command::Render) => render(&config),
        None => hook(&config),
    }
}

/// `render` subcommand: porcelain on stdin, status report on stdout
fn render(config: &Config) -> Result<()> {
    let settings = Settings::resolve(config).context("Failed to load settings")?;
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read status from stdin")?;
    println!("{}", render_porcelain(&input, &settings));
    Ok(())
}

/// Default mode: emit the context block for the working directory
fn hook(config: &Config) -> Result<()> {
    let settings = Settings::resolve(config).unwrap_or_else(|err| {
        warn!(error = %err, "Using default settings");
        let mut settings = Settings::default();
        settings.apply_overrides(config);
        settings
    });
    let session =
        SessionInfo::from_ids(config.session_id.clone(), config.parent_session_id.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(run_hook(&settings, session, config.iteration));
    // Abandon any git read still running past its timeout.
    runtime.shutdown_background();

    if config.json {
        println!("{}", serde_json::to_string(&result)?);
    } else if let Some(context) = result.context() {
        println!("{context}");
    } else {
        debug!("Nothing to inject");
    }
    Ok(())
}
