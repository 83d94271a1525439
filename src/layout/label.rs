// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-line zone labels.
//!
//! Labels are the uppercased animal name broken into at most a few short lines so they fit inside
//! narrow enclosures. A small override table handles names whose generic split reads badly.

use smallvec::SmallVec;

use crate::model::Animal;

/// Names longer than this (in chars) with exactly two words are split one word per line.
const TWO_WORD_SPLIT_THRESHOLD: usize = 10;

/// Line advance for every line after the first, in `em`.
pub const LINE_ADVANCE_EM: f64 = 1.1;

pub const SMALL_FONT_PX: u8 = 10;
pub const DEFAULT_FONT_PX: u8 = 13;

pub type LabelLines = SmallVec<[String; 3]>;

struct LabelOverride {
    phrase: &'static str,
    animal_id: Option<&'static str>,
    lines: &'static [&'static str],
}

// Checked in order; the first match wins.
const LABEL_OVERRIDES: &[LabelOverride] = &[
    LabelOverride {
        phrase: "КАВКАЗСКИЙ БЛАГОРОДНЫЙ",
        animal_id: Some("red_deer"),
        lines: &["КАВКАЗСКИЙ", "БЛАГОРОДНЫЙ", "ОЛЕНЬ"],
    },
    LabelOverride {
        phrase: "ЕНОТ-ПОЛОСКУН",
        animal_id: None,
        lines: &["ЕНОТ-", "ПОЛОСКУН"],
    },
    LabelOverride {
        phrase: "ЕНОТОВИДНАЯ",
        animal_id: None,
        lines: &["ЕНОТОВИД.", "СОБАКА"],
    },
    LabelOverride {
        phrase: "ОРЛАН-БЕЛОХВОСТ",
        animal_id: None,
        lines: &["ОРЛАН", "БЕЛОХВОСТ"],
    },
];

enum IdRule {
    Contains(&'static str),
    Exact(&'static str),
}

impl IdRule {
    fn matches(&self, id: &str) -> bool {
        match self {
            Self::Contains(part) => id.contains(part),
            Self::Exact(exact) => id == *exact,
        }
    }
}

/// Animals whose enclosures are too small for the default label size.
const SMALL_FONT_IDS: &[IdRule] = &[
    IdRule::Contains("raccoon"),
    IdRule::Exact("fox"),
    IdRule::Contains("eagle"),
    IdRule::Exact("falcon"),
];

/// Splits an already-uppercased display name into label lines.
///
/// Overrides are matched by phrase containment or by exact `animal_id`. Otherwise the text is
/// split on single spaces: three or more words become "first two / rest", two words become one per
/// line when the text is longer than ten characters, anything else stays on one line.
pub fn wrap_label(text: &str, animal_id: Option<&str>) -> LabelLines {
    let matched = LABEL_OVERRIDES.iter().find(|rule| {
        text.contains(rule.phrase) || matches!((rule.animal_id, animal_id), (Some(a), Some(b)) if a == b)
    });
    if let Some(rule) = matched {
        return rule.lines.iter().map(|line| (*line).to_owned()).collect();
    }

    let words: SmallVec<[&str; 4]> = text.split(' ').collect();
    let mut lines = LabelLines::new();
    if words.len() > 2 {
        lines.push(words[..2].join(" "));
        lines.push(words[2..].join(" "));
    } else if words.len() == 2 && text.chars().count() > TWO_WORD_SPLIT_THRESHOLD {
        lines.push(words[0].to_owned());
        lines.push(words[1].to_owned());
    } else {
        lines.push(text.to_owned());
    }
    lines
}

pub fn label_font_px(animal_id: &str) -> u8 {
    if SMALL_FONT_IDS.iter().any(|rule| rule.matches(animal_id)) {
        SMALL_FONT_PX
    } else {
        DEFAULT_FONT_PX
    }
}

/// One rendered label line; `dy_em` is relative to the previous line.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpan {
    pub text: String,
    pub dy_em: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLabel {
    pub spans: SmallVec<[LabelSpan; 3]>,
    pub font_px: u8,
}

impl ZoneLabel {
    pub fn for_animal(animal: &Animal) -> Self {
        let id = animal.id().as_str();
        let text = animal.name().to_uppercase();
        let spans = wrap_label(&text, Some(id))
            .into_iter()
            .enumerate()
            .map(|(idx, text)| LabelSpan {
                text,
                dy_em: if idx == 0 { 0.0 } else { LINE_ADVANCE_EM },
            })
            .collect();

        Self {
            spans,
            font_px: label_font_px(id),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|span| span.text.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.spans.len()
    }
}
