// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page discovery: finds `<order>-<name>.json` definitions in the pages
// directory and returns them in render order.

use std::path::Path;

use folio_core::error::{FolioError, Result};
use folio_core::{DiscoveredPage, PageId};
use tracing::{debug, instrument};

const PAGE_EXTENSION: &str = ".json";

/// Parse a page file name such as `2-extra.json`.
///
/// The order is the run of leading decimal digits, which must be followed by
/// a `-` and a non-empty name.
pub fn parse_page_file_name(file_name: &str) -> Option<PageId> {
    let stem = file_name.strip_suffix(PAGE_EXTENSION)?;
    let digits = stem.len() - stem.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let (order, rest) = stem.split_at(digits);
    let name = rest.strip_prefix('-')?;
    if name.is_empty() {
        return None;
    }
    Some(PageId::new(order.parse().ok()?, name))
}

/// List the page definitions in `dir`, sorted by order then name.
#[instrument(fields(dir = %dir.display()))]
pub fn discover_pages(dir: &Path) -> Result<Vec<DiscoveredPage>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| FolioError::PageDiscovery(format!("cannot read {}: {e}", dir.display())))?;

    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(id) = file_name.to_str().and_then(parse_page_file_name) else {
            debug!(file = ?file_name, "Skipping non-page file");
            continue;
        };
        pages.push(DiscoveredPage {
            id,
            path: entry.path(),
        });
    }

    if pages.is_empty() {
        return Err(FolioError::PageDiscovery(format!(
            "no <order>-<name>.json files in {}",
            dir.display()
        )));
    }

    pages.sort_by(|a, b| (a.id.order, &a.id.name).cmp(&(b.id.order, &b.id.name)));
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_parse_into_ids() {
        assert_eq!(parse_page_file_name("1-home.json"), Some(PageId::new(1, "home")));
        assert_eq!(parse_page_file_name("12-a-b.json"), Some(PageId::new(12, "a-b")));
        assert_eq!(parse_page_file_name("007-cover.json"), Some(PageId::new(7, "cover")));
    }

    #[test]
    fn non_page_names_are_rejected() {
        for name in ["home.json", "1-.json", "1home.json", "1-home.tsx", "-1-home.json", "1-home"] {
            assert_eq!(parse_page_file_name(name), None, "{name}");
        }
    }

    #[test]
    fn pages_sort_by_order_then_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2-extra.json", "1-main.json", "1-home.json", "10-last.json", "notes.md", "x-1.json"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("3-folder.json")).unwrap();

        let ids: Vec<String> = discover_pages(dir.path())
            .unwrap()
            .into_iter()
            .map(|page| page.id.to_string())
            .collect();
        assert_eq!(ids, ["1-home", "1-main", "2-extra", "10-last"]);
    }

    #[test]
    fn missing_directory_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_pages(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, FolioError::PageDiscovery(_)));
    }

    #[test]
    fn directory_without_pages_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "pages go here").unwrap();
        assert!(matches!(
            discover_pages(dir.path()),
            Err(FolioError::PageDiscovery(_))
        ));
    }
}
