// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Environment block
//!
//! Everything the block shows is gathered into an [`EnvironmentInfo`] first
//! and formatted from there, so formatting never reads process state.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::config::ConfigError;
use crate::settings::Settings;

/// Opening line of the environment block
pub const ENV_HEADER: &str = "Here is useful information about the environment you are running in:";

/// Body used when the environment could not be gathered
pub const ENV_UNAVAILABLE: &str = "Environment information unavailable";

/// Session identifiers supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Current session
    pub id: String,
    /// Parent session, for sub-sessions
    pub parent_id: Option<String>,
}

impl SessionInfo {
    /// Build session info from optional identifiers
    ///
    /// Returns `None` without a session ID; a parent ID alone is not a session.
    #[must_use]
    pub fn from_ids(id: Option<String>, parent_id: Option<String>) -> Option<Self> {
        let id = id.filter(|id| !id.trim().is_empty())?;
        Some(Self {
            id,
            parent_id: parent_id.filter(|p| !p.trim().is_empty()),
        })
    }

    /// Whether this session was started by another session
    #[must_use]
    pub fn is_sub_session(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Facts shown in the environment block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Absolute working directory
    pub working_dir: PathBuf,
    /// Session identifiers, when sessions are enabled and known
    pub session: Option<SessionInfo>,
    /// Whether the working directory is inside a git repository
    pub is_git_repo: bool,
    /// Operating system family (`linux`, `macos`, `windows`, ...)
    pub platform: String,
    /// Human-readable OS version
    pub os_version: String,
    /// Formatted current date
    pub date: String,
}

impl EnvironmentInfo {
    /// Gather environment facts for the configured working directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WorkingDirNotFound` if the directory does not
    /// exist and `ConfigError::CurrentDirUnavailable` if a relative
    /// directory cannot be resolved.
    pub fn gather(
        settings: &Settings,
        session: Option<SessionInfo>,
        is_git_repo: bool,
        now: &DateTime<Local>,
    ) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(&settings.working_dir)?;
        if !working_dir.is_dir() {
            return Err(ConfigError::WorkingDirNotFound(working_dir));
        }
        Ok(Self {
            working_dir,
            session: if settings.include_session { session } else { None },
            is_git_repo,
            platform: std::env::consts::OS.to_string(),
            os_version: os_version(),
            date: format_date(now, settings),
        })
    }

    /// The `<env>` block
    #[must_use]
    pub fn to_block(&self) -> String {
        let mut lines = vec![
            ENV_HEADER.to_string(),
            "<env>".to_string(),
            format!("Working directory: {}", self.working_dir.display()),
        ];

        if let Some(session) = &self.session {
            lines.push(format!("Session ID: {}", session.id));
            match &session.parent_id {
                Some(parent) => {
                    lines.push(format!("Parent Session ID: {parent}"));
                    lines.push("Is sub-session: Yes".to_string());
                }
                None => lines.push("Is sub-session: No".to_string()),
            }
        }

        lines.push(format!(
            "Is directory a git repo: {}",
            if self.is_git_repo { "Yes" } else { "No" }
        ));
        lines.push(format!("Platform: {}", self.platform));
        lines.push(format!("OS Version: {}", self.os_version));
        lines.push(format!("Today's date: {}", self.date));
        lines.push("</env>".to_string());
        lines.join("\n")
    }
}

/// The block shown when gathering failed
#[must_use]
pub fn unavailable_block() -> String {
    format!("{ENV_HEADER}\n<env>\n{ENV_UNAVAILABLE}\n</env>")
}

/// Resolve a possibly relative directory against the current directory
///
/// # Errors
///
/// Returns `ConfigError::CurrentDirUnavailable` if the current directory is
/// needed and cannot be read.
pub fn resolve_working_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDirUnavailable)?;
    if dir == Path::new(".") {
        Ok(cwd)
    } else {
        Ok(cwd.join(dir))
    }
}

/// Date line per the datetime settings
///
/// Date only when datetime is disabled; otherwise the configured format,
/// optionally followed by the UTC offset.
#[must_use]
pub fn format_date(now: &DateTime<Local>, settings: &Settings) -> String {
    if !settings.include_datetime {
        return now.format("%Y-%m-%d").to_string();
    }
    let formatted = format_with(now, &settings.datetime_format);
    if settings.datetime_include_timezone {
        format!("{formatted} {}", now.format("%:z"))
    } else {
        formatted
    }
}

/// Format with a user-supplied pattern, falling back to the default on a bad pattern
fn format_with(now: &DateTime<Local>, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", now.format(pattern)).is_err() {
        tracing::warn!(pattern, "Invalid datetime format, using default");
        out = now
            .format(crate::settings::DEFAULT_DATETIME_FORMAT)
            .to_string();
    }
    out
}

/// Long OS description, or `unknown`
#[must_use]
pub fn os_version() -> String {
    System::long_os_version().unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 14, 15, 9, 26)
            .single()
            .expect("unambiguous local time")
    }

    fn sample_info() -> EnvironmentInfo {
        EnvironmentInfo {
            working_dir: PathBuf::from("/home/dev/project"),
            session: None,
            is_git_repo: true,
            platform: "linux".to_string(),
            os_version: "Linux 6.8 Ubuntu 24.04".to_string(),
            date: "2026-03-14 15:09:26".to_string(),
        }
    }

    #[test]
    fn test_block_without_session() {
        assert_eq!(
            sample_info().to_block(),
            "Here is useful information about the environment you are running in:\n\
             <env>\n\
             Working directory: /home/dev/project\n\
             Is directory a git repo: Yes\n\
             Platform: linux\n\
             OS Version: Linux 6.8 Ubuntu 24.04\n\
             Today's date: 2026-03-14 15:09:26\n\
             </env>"
        );
    }

    #[test]
    fn test_block_with_session() {
        let info = EnvironmentInfo {
            session: SessionInfo::from_ids(Some("abc-123".to_string()), None),
            ..sample_info()
        };
        let block = info.to_block();
        assert!(block.contains("Session ID: abc-123\nIs sub-session: No\n"));
        assert!(!block.contains("Parent Session ID"));
    }

    #[test]
    fn test_block_with_sub_session() {
        let info = EnvironmentInfo {
            session: SessionInfo::from_ids(
                Some("child".to_string()),
                Some("parent".to_string()),
            ),
            is_git_repo: false,
            ..sample_info()
        };
        let block = info.to_block();
        assert!(block.contains(
            "Session ID: child\nParent Session ID: parent\nIs sub-session: Yes\n\
             Is directory a git repo: No"
        ));
    }

    #[test]
    fn test_session_requires_id() {
        assert_eq!(SessionInfo::from_ids(None, Some("parent".to_string())), None);
        assert_eq!(SessionInfo::from_ids(Some("  ".to_string()), None), None);
        let session = SessionInfo::from_ids(Some("s".to_string()), Some(String::new()))
            .expect("session");
        assert!(!session.is_sub_session());
    }

    #[test]
    fn test_unavailable_block() {
        assert_eq!(
            unavailable_block(),
            format!("{ENV_HEADER}\n<env>\nEnvironment information unavailable\n</env>")
        );
    }

    #[test]
    fn test_format_date_variants() {
        let now = fixed_now();
        let mut settings = Settings::default();
        assert_eq!(format_date(&now, &settings), "2026-03-14 15:09:26");

        settings.include_datetime = false;
        assert_eq!(format_date(&now, &settings), "2026-03-14");

        settings.include_datetime = true;
        settings.datetime_format = "%d/%m/%Y %H:%M".to_string();
        assert_eq!(format_date(&now, &settings), "14/03/2026 15:09");

        settings.datetime_include_timezone = true;
        let with_zone = format_date(&now, &settings);
        assert!(with_zone.starts_with("14/03/2026 15:09 "));
        assert_eq!(with_zone.len(), "14/03/2026 15:09 +00:00".len());
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let settings = Settings {
            datetime_format: "%Q %Y".to_string(),
            ..Default::default()
        };
        assert_eq!(format_date(&fixed_now(), &settings), "2026-03-14 15:09:26");
    }

    #[test]
    fn test_resolve_working_dir() {
        let absolute = PathBuf::from("/tmp/project");
        assert_eq!(resolve_working_dir(&absolute).expect("resolve"), absolute);

        let cwd = std::env::current_dir().expect("cwd");
        assert_eq!(resolve_working_dir(Path::new(".")).expect("resolve"), cwd);
        assert_eq!(
            resolve_working_dir(Path::new("sub/dir")).expect("resolve"),
            cwd.join("sub/dir")
        );
    }

    #[test]
    fn test_gather_missing_directory() {
        let settings = Settings {
            working_dir: PathBuf::from("/nonexistent/status-context/dir"),
            ..Default::default()
        };
        let result = EnvironmentInfo::gather(&settings, None, false, &fixed_now());
        assert!(matches!(result, Err(ConfigError::WorkingDirNotFound(_))));
    }

    #[test]
    fn test_gather_respects_include_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = Settings {
            working_dir: dir.path().to_path_buf(),
            include_session: false,
            ..Default::default()
        };
        let session = SessionInfo::from_ids(Some("s1".to_string()), None);
        let info = EnvironmentInfo::gather(&settings, session, false, &fixed_now())
            .expect("gather");
        assert_eq!(info.session, None);
        assert_eq!(info.working_dir, dir.path());
        assert_eq!(info.platform, std::env::consts::OS);
        assert!(!info.os_version.is_empty());
    }
}
