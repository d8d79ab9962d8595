//! Label alphabets used to address siblings at one nesting depth.

use crate::error::MenuError;
use std::fmt;
use std::str::FromStr;

const ALPHABET_LEN: usize = 26;
const MAX_ALPHA_RUN: usize = 9;
const MAX_NUMERIC: usize = 999_999_999;

const ALPHA_PATTERN: &str = "(?:a{1,9}|b{1,9}|c{1,9}|d{1,9}|e{1,9}|f{1,9}|g{1,9}|h{1,9}|i{1,9}|j{1,9}|k{1,9}|l{1,9}|m{1,9}|n{1,9}|o{1,9}|p{1,9}|q{1,9}|r{1,9}|s{1,9}|t{1,9}|u{1,9}|v{1,9}|w{1,9}|x{1,9}|y{1,9}|z{1,9})";
const NUMERIC_PATTERN: &str = "[0-9]{1,9}";

/// An ordered, parseable label alphabet for one depth of a menu tree.
///
/// Every variant provides three things that agree with each other:
/// - [`pattern`](Self::pattern): an un-anchored regular expression fragment
///   matching exactly the labels the sequence can produce;
/// - [`labels`](Self::labels): the labels in enumeration order, generated lazily;
/// - [`parse_label`](Self::parse_label): the inverse of the enumeration, mapping a
///   label back to its 0-based position.
///
/// Values are stateless and `Copy`, so a single instance can be shared by any number
/// of menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSequence {
    /// `a`..`z`, then `aa`..`zz`, up to nine repetitions of each letter (234 labels).
    ///
    /// Only single-letter runs are produced; `ab` is never a label.
    Alpha,
    /// Decimal numbers `1`..`999999999`.
    Numeric,
}

impl LabelSequence {
    /// Shared alphabetic instance.
    pub const ALPHA: LabelSequence = LabelSequence::Alpha;
    /// Shared numeric instance.
    pub const NUMERIC: LabelSequence = LabelSequence::Numeric;

    /// Regular expression fragment matching every label of this sequence.
    ///
    /// The fragment carries no anchors and no capturing groups, so it can be
    /// embedded into a larger pattern.
    pub fn pattern(&self) -> &'static str {
        match self {
            LabelSequence::Alpha => ALPHA_PATTERN,
            LabelSequence::Numeric => NUMERIC_PATTERN,
        }
    }

    /// Number of labels the sequence can produce.
    pub fn len(&self) -> usize {
        match self {
            LabelSequence::Alpha => ALPHABET_LEN * MAX_ALPHA_RUN,
            LabelSequence::Numeric => MAX_NUMERIC,
        }
    }

    /// Always `false`; both alphabets are non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Label at `index` in enumeration order, or `None` past the end.
    pub fn label_at(&self, index: usize) -> Option<String> {
        if index >= self.len() {
            return None;
        }
        Some(match self {
            LabelSequence::Alpha => {
                let run = index / ALPHABET_LEN + 1;
                let letter = char::from(b'a' + (index % ALPHABET_LEN) as u8);
                letter.to_string().repeat(run)
            }
            LabelSequence::Numeric => (index + 1).to_string(),
        })
    }

    /// Fresh enumeration of all labels, starting at position 0.
    ///
    /// Labels are produced on demand; calling this twice yields identical output.
    pub fn labels(&self) -> Labels {
        Labels {
            sequence: *self,
            position: 0,
        }
    }

    /// Position of `label` in the enumeration, or `None` if the sequence never
    /// produces it.
    ///
    /// Alphabetic labels are compared case-insensitively.
    pub fn parse_label(&self, label: &str) -> Option<usize> {
        match self {
            LabelSequence::Alpha => {
                let mut chars = label.chars();
                let first = chars.next()?.to_ascii_lowercase();
                if !first.is_ascii_lowercase() {
                    return None;
                }
                let mut run = 1;
                for ch in chars {
                    if ch.to_ascii_lowercase() != first {
                        return None;
                    }
                    run += 1;
                }
                if run > MAX_ALPHA_RUN {
                    return None;
                }
                Some((run - 1) * ALPHABET_LEN + (first as u8 - b'a') as usize)
            }
            LabelSequence::Numeric => {
                if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let value: usize = label.parse().ok()?;
                if value == 0 || value > MAX_NUMERIC {
                    return None;
                }
                Some(value - 1)
            }
        }
    }

    /// Lowercase name used in configuration (`alpha`, `numeric`).
    pub fn name(&self) -> &'static str {
        match self {
            LabelSequence::Alpha => "alpha",
            LabelSequence::Numeric => "numeric",
        }
    }
}

impl fmt::Display for LabelSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LabelSequence {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" | "a" => Ok(LabelSequence::Alpha),
            "numeric" | "num" | "n" => Ok(LabelSequence::Numeric),
            _ => Err(MenuError::UnknownLabelSequence(s.to_string())),
        }
    }
}

/// Lazy iterator over the labels of a [`LabelSequence`].
///
/// Created by [`LabelSequence::labels`].
#[derive(Debug, Clone)]
pub struct Labels {
    sequence: LabelSequence,
    position: usize,
}

impl Iterator for Labels {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let label = self.sequence.label_at(self.position)?;
        self.position += 1;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sequence.len().saturating_sub(self.position);
        (left, Some(left))
    }

    fn nth(&mut self, n: usize) -> Option<String> {
        self.position = self.position.saturating_add(n);
        self.next()
    }
}

impl ExactSizeIterator for Labels {}
