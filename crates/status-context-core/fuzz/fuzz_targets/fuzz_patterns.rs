// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for user-supplied path patterns
//!
//! Any pattern text either compiles or is rejected; it must never panic and
//! must never turn into a match-everything pattern.

#![no_main]

use libfuzzer_sys::fuzz_target;

use status_context_core::PatternSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let set = PatternSet::new(input.lines());
        let _ = set.first_match("src/main.rs");
        let _ = set.matches(input);
    }
});
