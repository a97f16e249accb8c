// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for porcelain parsing and rendering
//!
//! Arbitrary status text must parse, budget and render without panicking,
//! and the rendered report must honour the hard line cap.

#![no_main]

use libfuzzer_sys::fuzz_target;

use status_context_core::{Budget, ReporterConfig, StatusReporter, parse_porcelain};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let entries = parse_porcelain(input);
        let reporter = StatusReporter::new(&ReporterConfig {
            budget: Budget {
                max_lines: 12,
                ..Budget::default()
            },
            ..Default::default()
        });

        let outcome = reporter.budget(&entries);
        assert!(outcome.is_balanced());

        let report = reporter.render_status(&entries);
        assert!(report.line_count() <= 12);
    }
});
