// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extracted fragments and the semantic role taxonomy.

use std::fmt;

/// Approximate layout position of a fragment.
///
/// No layout pass runs during extraction, so this is inherited from the
/// ancestors (plus any declared `left`/`top` offset). It only orders
/// fragments; it is not a pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Semantic category of a fragment.
///
/// Inference only ever produces the twelve taxonomy roles. An explicit
/// `data-role` outside the taxonomy is kept verbatim as `Other` and is
/// formatted like `Content`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    DocumentTitle,
    Name,
    SectionHeading,
    Email,
    Phone,
    Social,
    Url,
    Date,
    ExperienceSection,
    EducationSection,
    SkillsSection,
    Content,
    Other(String),
}

impl Role {
    /// Every role inference can produce.
    pub const TAXONOMY: [Role; 12] = [
        Role::DocumentTitle,
        Role::Name,
        Role::SectionHeading,
        Role::Email,
        Role::Phone,
        Role::Social,
        Role::Url,
        Role::Date,
        Role::ExperienceSection,
        Role::EducationSection,
        Role::SkillsSection,
        Role::Content,
    ];

    /// Role for an explicit `data-role` value.
    pub fn from_explicit(value: &str) -> Self {
        match value {
            "document-title" => Self::DocumentTitle,
            "name" => Self::Name,
            "section-heading" => Self::SectionHeading,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "social" => Self::Social,
            "url" => Self::Url,
            "date" => Self::Date,
            "experience-section" => Self::ExperienceSection,
            "education-section" => Self::EducationSection,
            "skills-section" => Self::SkillsSection,
            "content" => Self::Content,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::DocumentTitle => "document-title",
            Self::Name => "name",
            Self::SectionHeading => "section-heading",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Social => "social",
            Self::Url => "url",
            Self::Date => "date",
            Self::ExperienceSection => "experience-section",
            Self::EducationSection => "education-section",
            Self::SkillsSection => "skills-section",
            Self::Content => "content",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One captured, classified, scored unit of extractable text.
///
/// Produced once per extraction root; role and importance are resolved at
/// creation and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Flattened text of the source node, whitespace-normalised.
    pub text: String,
    /// Primitive tag of the source node.
    pub element_tag: String,
    pub position: Position,
    pub font_size: f64,
    pub font_weight: String,
    /// No ancestor of the source node triggered extraction.
    ///
    /// Marked nodes inside a marked root are absorbed into the root's text,
    /// so every collected fragment carries `true` and content lines are
    /// always followed by a blank line. Hand-built fragments may clear it.
    pub is_top_level: bool,
    pub role: Role,
    /// Salience in `1..=10`.
    pub importance: u8,
}
