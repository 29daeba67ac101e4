//! Per-field token extraction from located summary lines.
//!
//! Each field on the end-of-run screen has its own line layout, so every
//! `Field` maps to one `Rule` describing where its value sits. Extraction is
//! best-effort: absent or short lines yield an empty string, never an error.

use regex::Regex;
use std::sync::LazyLock;

use super::time;

/// A trailing `B` misread as `8` after the two-decimal group, with the
/// decimal point read as a comma: `$1,238` or `$1,2348`.
static MISREAD_BILLIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?(\d+),(\d{2})\d?8$").expect("misread-billions pattern is valid")
});

/// Labels read from the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Tier,
    Wave,
    RealTime,
    KilledBy,
    CoinsEarned,
    CashEarned,
    CellsEarned,
    DamageTaken,
    DamageDealt,
    RerollShardsEarned,
}

/// Where a field's value lives on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The whitespace-separated token at this position.
    Token(usize),
    /// The token at this position, rejoined with the following token when
    /// OCR split the number from its unit suffix.
    SplitToken(usize),
    /// The whole line is a duration.
    Duration,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Tier,
        Field::Wave,
        Field::RealTime,
        Field::KilledBy,
        Field::CoinsEarned,
        Field::CashEarned,
        Field::CellsEarned,
        Field::DamageTaken,
        Field::DamageDealt,
        Field::RerollShardsEarned,
    ];

    /// The line prefix identifying this field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Tier => "Tier",
            Field::Wave => "Wave",
            Field::RealTime => "Real Time",
            Field::KilledBy => "Killed By",
            Field::CoinsEarned => "Coins Earned",
            Field::CashEarned => "Cash Earned",
            Field::CellsEarned => "Cells Earned",
            Field::DamageTaken => "Damage Taken",
            Field::DamageDealt => "Damage Dealt",
            Field::RerollShardsEarned => "Reroll Shards Earned",
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.label() == label)
    }

    pub fn rule(self) -> Rule {
        match self {
            Field::Tier | Field::Wave => Rule::Token(1),
            Field::KilledBy
            | Field::CoinsEarned
            | Field::CashEarned
            | Field::CellsEarned
            | Field::DamageTaken
            | Field::DamageDealt => Rule::SplitToken(2),
            Field::RerollShardsEarned => Rule::Token(3),
            Field::RealTime => Rule::Duration,
        }
    }

    /// Whether the value is an abbreviated number subject to noise correction.
    pub fn is_quantity(self) -> bool {
        matches!(
            self,
            Field::CoinsEarned
                | Field::CashEarned
                | Field::CellsEarned
                | Field::DamageTaken
                | Field::DamageDealt
                | Field::RerollShardsEarned
        )
    }
}

/// Extracts the raw value string for a field identified by its label.
///
/// Unknown labels yield an empty string.
pub fn extract(label: &str, line: &str) -> String {
    match Field::from_label(label) {
        Some(field) => extract_field(field, line),
        None => String::new(),
    }
}

/// Applies the field's rule to a located line.
pub fn extract_field(field: Field, line: &str) -> String {
    let raw = apply_rule(field.rule(), line);

    if field.is_quantity() {
        correct_misread_billions(&raw)
    } else {
        raw
    }
}

fn apply_rule(rule: Rule, line: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match rule {
        Rule::Token(index) => tokens.get(index).copied().unwrap_or_default().to_string(),
        Rule::SplitToken(index) => {
            let value = tokens.get(index).copied().unwrap_or_default();
            // One token more than expected: "12.34 M" instead of "12.34M"
            if tokens.len() == index + 2 {
                format!("{}{}", value, tokens[index + 1])
            } else {
                value.to_string()
            }
        }
        Rule::Duration => time::parse(line),
    }
}

/// Rewrites `1,238` / `$1,2348` as `1.23B`.
///
/// Only this one glyph confusion is corrected; other misreads pass through.
pub fn correct_misread_billions(value: &str) -> String {
    match MISREAD_BILLIONS.captures(value) {
        Some(caps) => format!("{}.{}B", &caps[1], &caps[2]),
        None => value.to_string(),
    }
}
