// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret strength scoring and strong-secret generation.
//!
//! Scoring counts satisfied criteria among: length >= 8, uppercase,
//! lowercase, digit, non-alphanumeric. Score 0-2 is weak, 3-4 medium,
//! 5 strong. Clients use the report both to render a strength meter and to
//! gate submission of weak secrets behind an explicit confirmation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Strength classification for a candidate secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weak => f.write_str("weak"),
            Self::Medium => f.write_str("medium"),
            Self::Strong => f.write_str("strong"),
        }
    }
}

/// Result of evaluating a candidate secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub level: StrengthLevel,
    /// One suggestion per unmet criterion, in criteria order.
    pub tips: Vec<String>,
}

/// Score a candidate secret against the five criteria.
pub fn evaluate(secret: &str) -> StrengthReport {
    // (criterion, tip) pairs in the fixed order that tips are reported.
    let checks: [(bool, &str); 5] = [
        (secret.chars().count() >= 8, "increase password length"),
        (
            secret.chars().any(|c| c.is_ascii_uppercase()),
            "add uppercase letters",
        ),
        (
            secret.chars().any(|c| c.is_ascii_lowercase()),
            "add lowercase letters",
        ),
        (secret.chars().any(|c| c.is_ascii_digit()), "add numbers"),
        (
            secret.chars().any(|c| !c.is_ascii_alphanumeric()),
            "add special characters",
        ),
    ];

    let score = checks.iter().filter(|(met, _)| *met).count();
    let tips = checks
        .iter()
        .filter(|(met, _)| !met)
        .map(|(_, tip)| (*tip).to_string())
        .collect();

    let level = match score {
        0..=2 => StrengthLevel::Weak,
        3..=4 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    };

    StrengthReport { level, tips }
}

/// Generate a random secret guaranteed to satisfy all five criteria.
///
/// One character is drawn from each class, the remainder from the combined
/// alphabet, and the result is shuffled. `len` is clamped to a minimum of 8.
pub fn generate_strong(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::thread_rng();
    let all: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();

    let mut chars: Vec<u8> = vec![
        UPPER[rng.gen_range(0..UPPER.len())],
        LOWER[rng.gen_range(0..LOWER.len())],
        DIGITS[rng.gen_range(0..DIGITS.len())],
        SYMBOLS[rng.gen_range(0..SYMBOLS.len())],
    ];
    while chars.len() < len {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    String::from_utf8(chars).expect("alphabet is ASCII")
}
