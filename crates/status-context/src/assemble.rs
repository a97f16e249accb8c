// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Status context assembly
//!
//! Wraps the environment block and the git report in the injection
//! envelope, and decides whether a turn gets an injection at all. No
//! filtering happens here.

use serde::{Deserialize, Serialize};

/// Value of the envelope's `source` attribute
pub const ENVELOPE_SOURCE: &str = "status-context";

/// Closing note telling the model how to treat the block
pub const BEHAVIOURAL_NOTE: &str = "This context is for your reference only. \
    DO NOT mention this status information to the user unless directly relevant \
    to their question. Process silently and continue your work.";

/// Role the injected message is attributed to
pub const INJECTION_ROLE: &str = "user";

/// Wrap the blocks in the `<system-reminder>` envelope
#[must_use]
pub fn assemble_context(env_block: &str, git_block: Option<&str>) -> String {
    let mut body = env_block.to_string();
    if let Some(git) = git_block {
        body.push_str("\n\n");
        body.push_str(git);
    }
    format!(
        "<system-reminder source=\"{ENVELOPE_SOURCE}\">\n{body}\n\n{BEHAVIOURAL_NOTE}\n</system-reminder>"
    )
}

/// Whether this iteration of a turn gets an injection
///
/// Only the first iteration does; tool-continuation iterations already
/// carry the context from the start of the turn.
#[must_use]
pub fn should_inject(iteration: Option<u32>) -> bool {
    iteration.is_none_or(|n| n <= 1)
}

/// Result handed back to the hook runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HookResult {
    /// Add the context to the upcoming request
    InjectContext {
        /// The enveloped context block
        context_injection: String,
        /// Message role for the injection
        context_injection_role: String,
        /// The injection is not kept in the conversation history
        ephemeral: bool,
        /// The injection is not echoed to the user
        suppress_output: bool,
    },
    /// Nothing to inject
    Continue,
}

impl HookResult {
    /// An ephemeral, silent user-role injection
    #[must_use]
    pub fn inject(context: String) -> Self {
        Self::InjectContext {
            context_injection: context,
            context_injection_role: INJECTION_ROLE.to_string(),
            ephemeral: true,
            suppress_output: true,
        }
    }

    /// The injected text, if any
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InjectContext {
                context_injection, ..
            } => Some(context_injection),
            Self::Continue => None,
        }
    }
}
