// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Role inference: heuristic classification of a fragment from its tag, text,
// and font size.
//
// Rules are evaluated top to bottom and the first match wins. Ambiguous text
// (an email address containing a year) resolves by rule order, not by
// specificity.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fragment::Role;

/// Font size above which a fragment reads as a name or document title.
const TITLE_FONT_SIZE: f64 = 40.0;

/// Font size above which a fragment reads as a section heading.
const HEADING_FONT_SIZE: f64 = 24.0;

const TITLE_WORDS: &[&str] = &["portfolio", "resume", "cv"];

/// Loose phone-number shape: optional `+`, a 1–3 digit country code, then
/// digit groups separated by space, dash, dot, or parentheses.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}")
        .expect("phone pattern is valid")
});

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("url pattern is valid"));

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid"));

static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)")
        .expect("month pattern is valid")
});

/// Text rules, in evaluation order. Predicates receive lowercased text.
static TEXT_RULES: &[(fn(&str) -> bool, Role)] = &[
    (is_email, Role::Email),
    (is_phone, Role::Phone),
    (is_social, Role::Social),
    (is_url, Role::Url),
    (is_experience, Role::ExperienceSection),
    (is_education, Role::EducationSection),
    (is_skills, Role::SkillsSection),
    (is_date, Role::Date),
];

/// Infer the role of a fragment. Total: anything unmatched is `Content`.
pub fn infer(element_tag: &str, text: &str, font_size: f64) -> Role {
    let lower = text.to_lowercase();

    if element_tag.eq_ignore_ascii_case("h1") || font_size > TITLE_FONT_SIZE {
        return if TITLE_WORDS.iter().any(|word| lower.contains(word)) {
            Role::DocumentTitle
        } else {
            Role::Name
        };
    }

    if element_tag.eq_ignore_ascii_case("h2") || font_size > HEADING_FONT_SIZE {
        return Role::SectionHeading;
    }

    TEXT_RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map_or(Role::Content, |(_, role)| role.clone())
}

fn is_email(text: &str) -> bool {
    text.contains('@') || text.contains("email")
}

fn is_phone(text: &str) -> bool {
    PHONE.find_iter(text).any(|candidate| {
        let digits = candidate
            .as_str()
            .chars()
            .filter(char::is_ascii_digit)
            .count();
        PHONE_DIGITS.contains(&digits)
    })
}

fn is_social(text: &str) -> bool {
    text.contains("linkedin") || text.contains("github")
}

fn is_url(text: &str) -> bool {
    URL.is_match(text)
}

fn is_experience(text: &str) -> bool {
    text.contains("experience") || text.contains("work history")
}

fn is_education(text: &str) -> bool {
    text.contains("education") || text.contains("degree")
}

fn is_skills(text: &str) -> bool {
    text.contains("skills") || text.contains("technologies")
}

fn is_date(text: &str) -> bool {
    YEAR.is_match(text) || MONTH.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h1", "Jane Doe", 16.0, Role::Name)]
    #[case("h1", "My Portfolio", 16.0, Role::DocumentTitle)]
    #[case("p", "RESUME", 48.0, Role::DocumentTitle)]
    #[case("div", "Erdem Göksel", 62.0, Role::Name)]
    #[case("h2", "Projects", 16.0, Role::SectionHeading)]
    #[case("span", "Projects", 30.0, Role::SectionHeading)]
    #[case("p", "jane@example.com", 16.0, Role::Email)]
    #[case("p", "Email me", 16.0, Role::Email)]
    #[case("p", "+90 532 595 5586", 16.0, Role::Phone)]
    #[case("p", "(555) 123-4567", 16.0, Role::Phone)]
    #[case("p", "github.com/jane", 16.0, Role::Social)]
    #[case("p", "LinkedIn profile", 16.0, Role::Social)]
    #[case("p", "https://jane.dev", 16.0, Role::Url)]
    #[case("p", "Work History", 16.0, Role::ExperienceSection)]
    #[case("p", "Relevant experience", 16.0, Role::ExperienceSection)]
    #[case("p", "Bachelor's degree", 16.0, Role::EducationSection)]
    #[case("p", "Technologies I use", 16.0, Role::SkillsSection)]
    #[case("p", "2021", 16.0, Role::Date)]
    #[case("p", "Sept", 16.0, Role::Date)]
    #[case("p", "Maltepe University", 16.0, Role::Content)]
    #[case("blink", "", 0.0, Role::Content)]
    fn infers_role(
        #[case] tag: &str,
        #[case] text: &str,
        #[case] font_size: f64,
        #[case] expected: Role,
    ) {
        assert_eq!(infer(tag, text, font_size), expected);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Contains a year, but the email rule comes first.
        assert_eq!(infer("p", "jane2021@example.com", 16.0), Role::Email);
        // Contains "skills", but "experience" is checked earlier.
        assert_eq!(infer("p", "experience and skills", 16.0), Role::ExperienceSection);
    }

    #[test]
    fn short_digit_runs_are_not_phone_numbers() {
        assert!(!is_phone("2025"));
        assert!(!is_phone("50+ projects"));
        assert!(is_phone("0532 595 55 86"));
    }

    #[test]
    fn overlong_digit_runs_are_not_phone_numbers() {
        assert!(!is_phone("12345678901234567890"));
    }

    #[test]
    fn year_must_stand_alone() {
        assert!(is_date("since 1999"));
        assert!(!is_date("order 219945"));
        assert!(!is_date("year 2150"));
    }
}
