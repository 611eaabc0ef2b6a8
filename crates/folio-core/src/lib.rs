// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio: core types, the page node model, and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod node;
pub mod types;

pub use config::AppConfig;
pub use error::FolioError;
pub use node::{Component, Element, Node, Props, RenderFn, Style, StyleValue};
pub use types::*;
