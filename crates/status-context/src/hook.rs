// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One hook invocation: gather, render, assemble
//!
//! Nothing in here fails. Every problem is logged and degrades to less
//! output, down to an environment block that only says it is unavailable.

use chrono::Local;
use status_context_core::{StatusEntry, StatusReporter};
use tracing::{debug, info, warn};

use crate::assemble::{HookResult, assemble_context, should_inject};
use crate::collect::collect_git;
use crate::env::{EnvironmentInfo, SessionInfo, resolve_working_dir, unavailable_block};
use crate::settings::Settings;

/// Build a reporter from settings, logging rejected patterns
#[must_use]
pub fn reporter_for(settings: &Settings) -> StatusReporter {
    let reporter = StatusReporter::new(&settings.reporter_config());
    for pattern in reporter.rejected_patterns() {
        warn!(%pattern, "Configured path pattern ignored");
    }
    reporter
}

/// The full enveloped context for the configured working directory
pub async fn build_context(settings: &Settings, session: Option<SessionInfo>) -> String {
    let working_dir = match resolve_working_dir(&settings.working_dir) {
        Ok(dir) => Some(dir),
        Err(err) => {
            warn!(error = %err, "Cannot resolve working directory");
            None
        }
    };

    let collection = match &working_dir {
        Some(dir) => {
            let options = settings
                .include_git
                .then(|| settings.snapshot_options());
            collect_git(dir.clone(), options, settings.git_timeout()).await
        }
        None => Default::default(),
    };

    let env_block = match EnvironmentInfo::gather(
        settings,
        session,
        collection.is_git_repo,
        &Local::now(),
    ) {
        Ok(info) => info.to_block(),
        Err(err) => {
            warn!(error = %err, "Failed to gather environment info");
            unavailable_block()
        }
    };

    let git_block = collection.snapshot.as_ref().and_then(|snapshot| {
        let report = reporter_for(settings).report(snapshot)?;
        debug!(
            lines = report.line_count(),
            truncated = report.is_truncated(),
            "Rendered git report"
        );
        Some(report.to_text())
    });

    assemble_context(&env_block, git_block.as_deref())
}

/// Decide on and build the injection for one iteration
pub async fn run_hook(
    settings: &Settings,
    session: Option<SessionInfo>,
    iteration: Option<u32>,
) -> HookResult {
    if !should_inject(iteration) {
        debug!(?iteration, "Skipping injection for continuation iteration");
        return HookResult::Continue;
    }
    let context = build_context(settings, session).await;
    info!(bytes = context.len(), "Injecting status context");
    HookResult::inject(context)
}

/// Status section for porcelain text, as printed by the `render` subcommand
#[must_use]
pub fn render_porcelain(text: &str, settings: &Settings) -> String {
    let entries: Vec<StatusEntry> = status_context_core::parse_porcelain(text);
    reporter_for(settings).render_status(&entries).to_text()
}
