// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-extract: the ATS text layer of a rendered page.
//
// Walks a page tree, captures every explicitly marked sub-tree as a fragment,
// infers what each fragment means (name, email, section heading …), scores
// its importance, and serializes the fragments in reading order into one
// plain-text document. Pure and synchronous: no I/O, no shared state.

pub mod collect;
pub mod format;
pub mod fragment;
pub mod importance;
pub mod role;
pub mod walker;

use folio_core::Node;
use tracing::debug;

pub use collect::{Collector, should_extract};
pub use format::{format_fragments, reading_cmp, reading_order};
pub use fragment::{Fragment, Position, Role};
pub use walker::{Descend, Visitor, WalkContext};

/// Collect the fragments of a page tree, in traversal order.
pub fn extract_fragments(root: &Node) -> Vec<Fragment> {
    Collector::collect(root, WalkContext::root())
}

/// Extract and format the text layer of a page tree.
///
/// Returns an empty string when the page has no marked content.
pub fn extract_text(root: &Node) -> String {
    let fragments = extract_fragments(root);
    let text = format_fragments(&fragments);
    debug!(
        fragments = fragments.len(),
        chars = text.len(),
        "text layer extracted"
    );
    text
}
