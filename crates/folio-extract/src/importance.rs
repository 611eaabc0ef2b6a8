// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Importance scoring: bounded salience from tag, font size, and weight.

use folio_core::node::parse_leading_number;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;

const BASE_SCORE: f64 = 5.0;

/// Score a fragment in `MIN_IMPORTANCE..=MAX_IMPORTANCE`.
///
/// Base 5, plus tag weight, font-size bonus and font-weight bonus; the sum is
/// clamped and rounded half up.
pub fn score(font_size: f64, font_weight: &str, element_tag: &str) -> u8 {
    let total =
        BASE_SCORE + tag_weight(element_tag) + size_bonus(font_size) + weight_bonus(font_weight);
    total
        .clamp(MIN_IMPORTANCE as f64, MAX_IMPORTANCE as f64)
        .round() as u8
}

fn tag_weight(tag: &str) -> f64 {
    match tag.to_ascii_lowercase().as_str() {
        "h1" => 3.0,
        "h2" => 2.0,
        "h3" => 1.0,
        "h4" => 0.5,
        "span" => -1.0,
        // h5, h6, p, div, and anything unknown
        _ => 0.0,
    }
}

fn size_bonus(font_size: f64) -> f64 {
    if font_size >= 32.0 {
        3.0
    } else if font_size >= 24.0 {
        2.0
    } else if font_size >= 18.0 {
        1.0
    } else if font_size < 12.0 {
        -1.0
    } else {
        0.0
    }
}

fn weight_bonus(font_weight: &str) -> f64 {
    let keyword = font_weight.trim().to_ascii_lowercase();
    let numeric = parse_leading_number(&keyword);

    if matches!(keyword.as_str(), "bold" | "bolder") || numeric.is_some_and(|n| n >= 700.0) {
        2.0
    } else if keyword == "semibold" || numeric.is_some_and(|n| n >= 600.0) {
        1.0
    } else if matches!(keyword.as_str(), "light" | "lighter") || numeric.is_some_and(|n| n <= 300.0)
    {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(16.0, "normal", "div", 5)]
    #[case(72.0, "bold", "h1", 10)]
    #[case(16.0, "normal", "h4", 6)]
    #[case(16.0, "normal", "span", 4)]
    #[case(24.0, "600", "h3", 9)]
    #[case(18.0, "semibold", "p", 7)]
    #[case(10.0, "light", "span", 2)]
    #[case(10.0, "300", "marquee", 3)]
    #[case(20.0, "400", "h2", 8)]
    #[case(40.0, "900", "span", 9)]
    fn scores(
        #[case] font_size: f64,
        #[case] weight: &str,
        #[case] tag: &str,
        #[case] expected: u8,
    ) {
        assert_eq!(score(font_size, weight, tag), expected);
    }

    #[test]
    fn half_points_round_up() {
        // 5 + 0.5 (h4) + 1 (18px) = 6.5
        assert_eq!(score(18.0, "normal", "h4"), 7);
    }

    #[test]
    fn unparseable_weight_adds_nothing() {
        assert_eq!(score(16.0, "heavy-ish", "p"), 5);
    }

    #[test]
    fn score_is_clamped_at_both_ends() {
        assert_eq!(score(500.0, "900", "h1"), MAX_IMPORTANCE);
        assert_eq!(score(1.0, "100", "span"), 2);
        assert!(score(f64::NAN, "", "") >= MIN_IMPORTANCE);
    }
}
