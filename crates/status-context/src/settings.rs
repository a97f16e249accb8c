// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JSON settings file
//!
//! Every option has a default, so an empty object (or no file at all) is a
//! complete configuration. Unknown keys are ignored. Numeric limits are read
//! as signed integers and clamped when converted, so a negative value never
//! fails an invocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use status_context_core::budget::clamp_limit;
use status_context_core::{Budget, ReporterConfig};
use status_context_git::SnapshotOptions;
use tracing::debug;

use crate::config::{Config, ConfigError};

/// Default timeout for each repository read
pub const DEFAULT_GIT_TIMEOUT_MS: i64 = 1000;

/// Default format for the date line when the time is included
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// All recognised options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory to describe; relative paths resolve against the current directory
    pub working_dir: PathBuf,
    /// Emit the git block at all
    pub include_git: bool,
    /// Include working tree status
    pub git_include_status: bool,
    /// Number of recent commits (0 disables)
    pub git_include_commits: i64,
    /// Include the current branch
    pub git_include_branch: bool,
    /// Detect the main branch
    pub git_include_main_branch: bool,
    /// List untracked files
    pub git_status_include_untracked: bool,
    /// Cap on untracked Tier-3 entries (0 = unlimited)
    pub git_status_max_untracked: i64,
    /// Cap on tracked Tier-3 entries (0 = unlimited)
    pub git_status_max_tracked: i64,
    /// Cap on Tier-2 entries (0 = unlimited)
    pub git_status_tier2_limit: i64,
    /// Hard cap on status report lines (unset, 0 or negative = no cap)
    pub git_status_max_lines: Option<i64>,
    /// Classify paths into tiers
    pub git_status_enable_path_filtering: bool,
    /// Emit omission summary lines
    pub git_status_show_filter_summary: bool,
    /// Extra Tier-1 patterns
    pub git_status_tier1_patterns_extend: Vec<String>,
    /// Extra Tier-2 patterns
    pub git_status_tier2_patterns_extend: Vec<String>,
    /// Timeout for each repository read, in milliseconds; zero or negative
    /// falls back to the default
    pub git_timeout_ms: i64,
    /// Include the time of day in the date line
    pub include_datetime: bool,
    /// Append the UTC offset to the date line
    pub datetime_include_timezone: bool,
    /// strftime-style format of the date line when the time is included
    pub datetime_format: String,
    /// Include session identifiers
    pub include_session: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            include_git: true,
            git_include_status: true,
            git_include_commits: 5,
            git_include_branch: true,
            git_include_main_branch: true,
            git_status_include_untracked: true,
            git_status_max_untracked: 20,
            git_status_max_tracked: 50,
            git_status_tier2_limit: 10,
            git_status_max_lines: None,
            git_status_enable_path_filtering: true,
            git_status_show_filter_summary: true,
            git_status_tier1_patterns_extend: Vec::new(),
            git_status_tier2_patterns_extend: Vec::new(),
            git_timeout_ms: DEFAULT_GIT_TIMEOUT_MS,
            include_datetime: true,
            datetime_include_timezone: false,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            include_session: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not a settings object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read a settings file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SettingsNotFound` if the file does not exist,
    /// `ConfigError::SettingsUnreadable` if it cannot be read, and
    /// `ConfigError::SettingsMalformed` if it is not valid settings JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ConfigError::SettingsNotFound(path.to_path_buf())
            } else {
                ConfigError::SettingsUnreadable(path.to_path_buf(), err)
            }
        })?;
        let settings = Self::from_json(&text)
            .map_err(|err| ConfigError::SettingsMalformed(path.to_path_buf(), err))?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Settings for an invocation: the selected file, then CLI overrides
    ///
    /// A missing default file yields the defaults; a missing file named with
    /// `--config` is an error.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the selected file cannot be used.
    pub fn resolve(config: &Config) -> Result<Self, ConfigError> {
        let mut settings = match config.settings_path() {
            Some((path, true)) => Self::load(&path)?,
            Some((path, false)) => match Self::load(&path) {
                Err(ConfigError::SettingsNotFound(_)) => {
                    debug!(path = %path.display(), "No settings file, using defaults");
                    Self::default()
                }
                other => other?,
            },
            None => Self::default(),
        };
        settings.apply_overrides(config);
        Ok(settings)
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, config: &Config) {
        if let Some(dir) = &config.working_dir {
            self.working_dir.clone_from(dir);
        }
        if let Some(max_lines) = config.max_lines {
            self.git_status_max_lines = Some(max_lines);
        }
        if config.no_path_filtering {
            self.git_status_enable_path_filtering = false;
        }
    }

    /// Display limits with negative values clamped
    #[must_use]
    pub fn budget(&self) -> Budget {
        Budget::from_signed(
            self.git_status_max_tracked,
            self.git_status_max_untracked,
            self.git_status_tier2_limit,
            self.git_status_max_lines,
        )
    }

    /// Configuration for the status reporter
    #[must_use]
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig {
            budget: self.budget(),
            include_untracked: self.git_status_include_untracked,
            path_filtering: self.git_status_enable_path_filtering,
            show_filter_summary: self.git_status_show_filter_summary,
            tier1_patterns_extend: self.git_status_tier1_patterns_extend.clone(),
            tier2_patterns_extend: self.git_status_tier2_patterns_extend.clone(),
        }
    }

    /// Which repository parts to read
    #[must_use]
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            include_branch: self.git_include_branch,
            include_main_branch: self.git_include_main_branch,
            include_status: self.git_include_status,
            commit_count: clamp_limit(self.git_include_commits),
        }
    }

    /// Timeout for each repository read
    #[must_use]
    pub fn git_timeout(&self) -> Duration {
        let millis = if self.git_timeout_ms > 0 {
            self.git_timeout_ms
        } else {
            DEFAULT_GIT_TIMEOUT_MS
        };
        Duration::from_millis(millis.unsigned_abs())
    }
}
