// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command line configuration for status-context
//!
//! Process-level flags parsed with clap. Everything that shapes the report
//! itself lives in the settings file (see [`crate::settings`]); the flags
//! here select that file, identify the session, and override a few
//! settings for one invocation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Status Context - bounded git status and environment context for LLM prompts
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "status-context")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to emitting the context block)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON settings file
    ///
    /// Defaults to status-context/settings.json under the platform config
    /// directory. A missing default file is ignored; a missing file named
    /// here is an error.
    #[arg(short, long, env = "STATUS_CONTEXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to describe (overrides `working_dir` from settings)
    #[arg(short, long, env = "STATUS_CONTEXT_WORKING_DIR")]
    pub working_dir: Option<PathBuf>,

    /// Identifier of the current session
    #[arg(long, env = "STATUS_CONTEXT_SESSION_ID")]
    pub session_id: Option<String>,

    /// Identifier of the parent session, when running as a sub-session
    #[arg(long, env = "STATUS_CONTEXT_PARENT_SESSION_ID")]
    pub parent_session_id: Option<String>,

    /// Iteration of the current turn (context is injected on the first only)
    #[arg(long)]
    pub iteration: Option<u32>,

    /// Hard cap on git status report lines (0 or negative for no cap)
    #[arg(long, allow_negative_numbers = true)]
    pub max_lines: Option<i64>,

    /// Disable tiered path filtering for this invocation
    #[arg(long, default_value = "false")]
    pub no_path_filtering: bool,

    /// Print a hook result object as JSON instead of plain text
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the context
    /// printed on stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render a status report from porcelain lines on stdin
    ///
    /// Prints only the bounded status section, using the same settings as
    /// the hook.
    ///
    /// Example:
    ///   git status --porcelain | status-context render
    Render,
}

impl Config {
    /// The settings file to read, and whether it was named explicitly
    ///
    /// Returns `None` when no file was given and the platform has no config
    /// directory.
    #[must_use]
    pub fn settings_path(&self) -> Option<(PathBuf, bool)> {
        match &self.config {
            Some(path) => Some((path.clone(), true)),
            None => default_settings_path().map(|path| (path, false)),
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Platform default location of the settings file
///
/// - macOS: ~/Library/Application Support/status-context/settings.json
/// - Linux: ~/.config/status-context/settings.json
/// - Windows: %APPDATA%\status-context\settings.json
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("status-context").join("settings.json"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly named settings file does not exist
    #[error("Settings file not found: {0}")]
    SettingsNotFound(PathBuf),

    /// Settings file exists but could not be read
    #[error("Failed to read settings file {0}: {1}")]
    SettingsUnreadable(PathBuf, std::io::Error),

    /// Settings file is not valid JSON for the settings schema
    #[error("Malformed settings file {0}: {1}")]
    SettingsMalformed(PathBuf, serde_json::Error),

    /// Working directory does not exist
    #[error("Working directory not found: {0}")]
    WorkingDirNotFound(PathBuf),

    /// Current directory could not be determined
    #[error("Failed to determine current directory: {0}")]
    CurrentDirUnavailable(std::io::Error),
}
