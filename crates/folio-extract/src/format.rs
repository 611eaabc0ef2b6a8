// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reading-order formatter: serializes fragments into the plain-text layer.
//
// Fragments close in `y` are ordered by `x`, distant ones by `y`, then
// rendered with role-specific markers that resume parsers key on.

use std::cmp::Ordering;

use crate::fragment::{Fragment, Role};

/// Fragments whose `y` differ by at most this much share a visual line.
pub const SAME_LINE_TOLERANCE: f64 = 50.0;

/// Content at or above this importance is uppercased.
pub const EMPHASIS_IMPORTANCE: u8 = 7;

/// Pairwise reading-order comparison: by `y` when the fragments are more
/// than [`SAME_LINE_TOLERANCE`] apart vertically, by `x` otherwise.
///
/// Not transitive across chained lines, so it must not be handed to
/// `slice::sort_by`.
pub fn reading_cmp(a: &Fragment, b: &Fragment) -> Ordering {
    let dy = a.position.y - b.position.y;
    if dy.abs() > SAME_LINE_TOLERANCE {
        dy.total_cmp(&0.0)
    } else {
        a.position.x.total_cmp(&b.position.x)
    }
}

/// Order fragments as a reader would scan the page.
///
/// Stable insertion sort over traversal order with [`reading_cmp`]: a
/// fragment moves left only past neighbours that compare strictly greater,
/// so equal fragments keep traversal order and every adjacent pair of the
/// result satisfies the pairwise rule.
pub fn reading_order(fragments: &[Fragment]) -> Vec<&Fragment> {
    let mut ordered: Vec<&Fragment> = fragments.iter().collect();
    for i in 1..ordered.len() {
        let mut j = i;
        while j > 0 && reading_cmp(ordered[j - 1], ordered[j]) == Ordering::Greater {
            ordered.swap(j - 1, j);
            j -= 1;
        }
    }
    ordered
}

/// Render fragments into one plain-text document.
///
/// Lines are joined with `\n` and the whole document is trimmed; no
/// fragments yields an empty string.
pub fn format_fragments(fragments: &[Fragment]) -> String {
    let mut lines = Vec::new();
    for fragment in reading_order(fragments) {
        push_fragment(fragment, &mut lines);
    }
    lines.join("\n").trim().to_owned()
}

fn push_fragment(fragment: &Fragment, lines: &mut Vec<String>) {
    let text = fragment.text.as_str();
    match &fragment.role {
        Role::Name => {
            lines.push(format!("NAME: {text}"));
            lines.push(String::new());
        }
        Role::DocumentTitle => {
            lines.push(text.to_uppercase());
            lines.push(String::new());
        }
        Role::SectionHeading => {
            lines.push(String::new());
            lines.push(format!("--- {} ---", text.to_uppercase()));
        }
        Role::Email => lines.push(format!("EMAIL: {text}")),
        Role::Phone => lines.push(format!("PHONE: {text}")),
        Role::Url | Role::Social => lines.push(format!("LINK: {text}")),
        Role::Date => lines.push(format!("DATE: {text}")),
        Role::ExperienceSection | Role::EducationSection | Role::SkillsSection => {
            lines.push(String::new());
            lines.push(format!("=== {} ===", text.to_uppercase()));
            lines.push(String::new());
        }
        Role::Content | Role::Other(_) => {
            if fragment.importance >= EMPHASIS_IMPORTANCE {
                lines.push(text.to_uppercase());
            } else {
                lines.push(text.to_owned());
            }
            if fragment.is_top_level {
                lines.push(String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Position;
    use pretty_assertions::assert_eq;

    fn fragment(text: &str, role: Role, x: f64, y: f64) -> Fragment {
        Fragment {
            text: text.into(),
            element_tag: "p".into(),
            position: Position::new(x, y),
            font_size: 16.0,
            font_weight: "normal".into(),
            is_top_level: true,
            role,
            importance: 5,
        }
    }

    fn texts<'a>(ordered: &[&'a Fragment]) -> Vec<&'a str> {
        ordered.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn empty_input_formats_to_empty_string() {
        assert_eq!(format_fragments(&[]), "");
    }

    #[test]
    fn near_rows_order_by_x() {
        let fragments = [
            fragment("right", Role::Content, 50.0, 100.0),
            fragment("left", Role::Content, 10.0, 140.0),
        ];
        assert_eq!(texts(&reading_order(&fragments)), ["left", "right"]);
    }

    #[test]
    fn distant_rows_order_by_y() {
        let fragments = [
            fragment("lower", Role::Content, 0.0, 300.0),
            fragment("upper", Role::Content, 900.0, 10.0),
        ];
        assert_eq!(texts(&reading_order(&fragments)), ["upper", "lower"]);
    }

    #[test]
    fn chained_rows_compare_pairwise() {
        // b is within the line tolerance of both a and c, a and c are not.
        let fragments = [
            fragment("a", Role::Content, 0.0, 0.0),
            fragment("b", Role::Content, 100.0, 40.0),
            fragment("c", Role::Content, 50.0, 60.0),
        ];
        assert_eq!(texts(&reading_order(&fragments)), ["a", "c", "b"]);
    }

    #[test]
    fn comparison_switches_axis_at_the_tolerance() {
        let a = fragment("a", Role::Content, 90.0, 0.0);
        let on_line = fragment("b", Role::Content, 10.0, SAME_LINE_TOLERANCE);
        let below = fragment("c", Role::Content, 10.0, SAME_LINE_TOLERANCE + 0.5);
        assert_eq!(reading_cmp(&a, &on_line), Ordering::Greater);
        assert_eq!(reading_cmp(&a, &below), Ordering::Less);
        assert_eq!(reading_cmp(&below, &a), Ordering::Greater);
    }

    #[test]
    fn equal_positions_keep_traversal_order() {
        let fragments = [
            fragment("a", Role::Content, 0.0, 40.0),
            fragment("b", Role::Content, 0.0, 0.0),
            fragment("c", Role::Content, 0.0, 20.0),
        ];
        assert_eq!(texts(&reading_order(&fragments)), ["a", "b", "c"]);
    }

    #[test]
    fn renders_role_markers() {
        let mut heading = fragment("Skills", Role::SectionHeading, 0.0, 0.0);
        heading.importance = 9;
        let fragments = [
            fragment("Portfolio", Role::DocumentTitle, 0.0, 0.0),
            fragment("Jane Doe", Role::Name, 0.0, 0.0),
            fragment("jane@example.com", Role::Email, 0.0, 0.0),
            fragment("+1 555 123 4567", Role::Phone, 0.0, 0.0),
            fragment("github.com/jane", Role::Social, 0.0, 0.0),
            fragment("https://jane.dev", Role::Url, 0.0, 0.0),
            fragment("2021 - 2025", Role::Date, 0.0, 0.0),
            heading,
            fragment("Work history", Role::ExperienceSection, 0.0, 0.0),
            fragment("Rust, TypeScript", Role::Content, 0.0, 0.0),
        ];

        let expected = "\
PORTFOLIO

NAME: Jane Doe

EMAIL: jane@example.com
PHONE: +1 555 123 4567
LINK: github.com/jane
LINK: https://jane.dev
DATE: 2021 - 2025

--- SKILLS ---

=== WORK HISTORY ===

Rust, TypeScript";
        assert_eq!(format_fragments(&fragments), expected);
    }

    #[test]
    fn important_content_is_uppercased() {
        let mut loud = fragment("Fullstack developer", Role::Content, 0.0, 0.0);
        loud.importance = EMPHASIS_IMPORTANCE;
        let mut quiet = fragment("details", Role::Content, 0.0, 0.0);
        quiet.is_top_level = false;
        let trailing = fragment("end", Role::Content, 0.0, 0.0);

        assert_eq!(
            format_fragments(&[loud, quiet, trailing]),
            "FULLSTACK DEVELOPER\n\ndetails\nend"
        );
    }

    #[test]
    fn custom_roles_format_as_content() {
        let fragments = [fragment("Open to relocation", Role::Other("note".into()), 0.0, 0.0)];
        assert_eq!(format_fragments(&fragments), "Open to relocation");
    }

    #[test]
    fn name_alone_is_trimmed() {
        let fragments = [fragment("Jane Doe", Role::Name, 0.0, 0.0)];
        assert_eq!(format_fragments(&fragments), "NAME: Jane Doe");
    }
}
