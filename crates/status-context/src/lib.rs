// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! status-context library
//!
//! Configuration, environment gathering, bounded repository collection and
//! context assembly for the `status-context` binary, exported for
//! integration tests and embedding.

pub mod assemble;
pub mod collect;
pub mod config;
pub mod env;
pub mod hook;
pub mod settings;
