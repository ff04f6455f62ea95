// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chromatic numbers and note spellings.
//!
//! Pitch classes are numbered 1-12 with 1 = C. Each number carries a flat
//! and a sharp spelling plus the interval-notation tokens (`b3`, `#9`, ...)
//! that land on it when counted from a root at 1.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result as AnyResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, TheoryError};

/// Chromatic note number (1-12, 1 = C)
pub type ChromaticNote = u8;

/// Number of pitch classes on the chromatic circle
pub const CHROMATIC_LEN: u8 = 12;

/// Token marking an extension that is not part of a chord
pub const NOT_PRESENT: &str = "NA";

/// Which accidental to spell black keys with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyPreference {
    #[default]
    #[serde(rename = "b")]
    Flat,
    #[serde(rename = "#")]
    Sharp,
}

impl FromStr for KeyPreference {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "b" => Ok(KeyPreference::Flat),
            "#" => Ok(KeyPreference::Sharp),
            other => Err(TheoryError::InvalidKeyPreference(other.to_string())),
        }
    }
}

impl fmt::Display for KeyPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPreference::Flat => write!(f, "b"),
            KeyPreference::Sharp => write!(f, "#"),
        }
    }
}

/// Transpose a chromatic number up by `interval` semitones.
///
/// The interval must be in 0-11. The sum wraps only when it exceeds 12, so
/// results stay in 1-12 for any valid input note.
pub fn transpose(note: ChromaticNote, interval: i32) -> Result<ChromaticNote> {
    if !(0..CHROMATIC_LEN as i32).contains(&interval) {
        return Err(TheoryError::InvalidInterval(interval));
    }
    let mut result = note as i32 + interval;
    if result > CHROMATIC_LEN as i32 {
        result -= CHROMATIC_LEN as i32;
    }
    Ok(result as ChromaticNote)
}

/// One row of the chromatic table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromaticRow {
    pub chromatic_number: ChromaticNote,
    pub note_string_flat: String,
    pub note_string_sharp: String,
    /// Pipe-delimited interval tokens that resolve to this number
    pub chord_number_string: String,
}

impl ChromaticRow {
    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.chord_number_string
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Immutable note-spelling and interval-token lookup
#[derive(Debug, Clone)]
pub struct ChromaticTable {
    rows: Vec<ChromaticRow>,
    tokens: HashMap<String, ChromaticNote>,
}

impl ChromaticTable {
    /// Build the table, checking it is a bijection over 1-12
    pub fn from_rows(mut rows: Vec<ChromaticRow>) -> AnyResult<Self> {
        if rows.len() != CHROMATIC_LEN as usize {
            bail!("chromatic table needs 12 rows, found {}", rows.len());
        }
        rows.sort_by_key(|r| r.chromatic_number);

        let mut tokens = HashMap::new();
        let mut spellings: HashMap<String, ChromaticNote> = HashMap::new();
        for (expected, row) in (1..=CHROMATIC_LEN).zip(&rows) {
            if row.chromatic_number != expected {
                bail!("chromatic table is missing number {}", expected);
            }
            for spelling in [row.note_string_flat.as_str(), row.note_string_sharp.as_str()] {
                if spelling.is_empty() {
                    bail!("empty spelling for chromatic number {}", expected);
                }
                if let Some(other) = spellings.insert(spelling.to_string(), expected) {
                    if other != expected {
                        bail!("spelling {} used by numbers {} and {}", spelling, other, expected);
                    }
                }
            }
            for token in row.tokens() {
                if token == NOT_PRESENT {
                    bail!("{} is reserved and cannot be a chord notation token", NOT_PRESENT);
                }
                if tokens.insert(token.to_string(), expected).is_some() {
                    bail!("chord notation token {} is listed twice", token);
                }
            }
        }

        Ok(Self { rows, tokens })
    }

    /// Get the chromatic number for a spelling in either column
    pub fn index_of(&self, spelling: &str) -> Result<ChromaticNote> {
        self.rows
            .iter()
            .find(|r| r.note_string_flat == spelling || r.note_string_sharp == spelling)
            .map(|r| r.chromatic_number)
            .ok_or_else(|| TheoryError::UnknownNote(spelling.to_string()))
    }

    /// Get the spelling of a chromatic number
    pub fn spelling_of(&self, index: ChromaticNote, key: KeyPreference) -> Result<&str> {
        let row = self
            .rows
            .iter()
            .find(|r| r.chromatic_number == index)
            .ok_or(TheoryError::InvalidIndex(index as i32))?;
        Ok(match key {
            KeyPreference::Flat => row.note_string_flat.as_str(),
            KeyPreference::Sharp => row.note_string_sharp.as_str(),
        })
    }

    /// Resolve an interval token (`b3`, `5`, ...) to its root-relative number.
    ///
    /// `NA` yields `None` without consulting the table.
    pub fn resolve_token(&self, token: &str) -> Result<Option<ChromaticNote>> {
        let token = token.trim();
        if token == NOT_PRESENT {
            return Ok(None);
        }
        match self.tokens.get(token) {
            Some(&n) => {
                trace!(token, note = n, "resolved chord notation");
                Ok(Some(n))
            }
            None => Err(TheoryError::token(token)),
        }
    }

    /// Every distinct spelling, flat column first
    pub fn spellings(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.rows.len() * 2);
        for row in &self.rows {
            for s in [row.note_string_flat.as_str(), row.note_string_sharp.as_str()] {
                if !out.contains(&s) {
                    out.push(s);
                }
            }
        }
        out
    }

    /// Spell a list of notes, failing on the first invalid index
    pub fn spell_all(&self, notes: &[ChromaticNote], key: KeyPreference) -> Result<Vec<String>> {
        notes
            .iter()
            .map(|&n| self.spelling_of(n, key).map(str::to_string))
            .collect()
    }

    pub fn rows(&self) -> &[ChromaticRow] {
        &self.rows
    }
}
