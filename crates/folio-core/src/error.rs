// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use thiserror::Error;

/// Top-level error type for all Folio operations.
///
/// The extraction engine itself is infallible; every variant here comes from
/// the surrounding pipeline (page loading, rendering, encoding, PDF output).
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Pages --
    #[error("page discovery failed: {0}")]
    PageDiscovery(String),

    #[error("invalid page definition in {page}: {reason}")]
    PageDefinition { page: String, reason: String },

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    // -- Rendering --
    #[error("font loading failed: {0}")]
    FontLoad(String),

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;
