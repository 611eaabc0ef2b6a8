// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page sources: discovery on disk, JSON loading, and built-in components.

pub mod components;
pub mod discovery;
pub mod loader;

pub use components::ComponentRegistry;
pub use discovery::discover_pages;
pub use loader::PageLoader;
