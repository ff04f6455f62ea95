// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord definitions and chord resolution.
//!
//! A chord type is a root token plus up to six optional extension tokens.
//! Resolving a type yields its root-relative chromatic numbers; transposing
//! those numbers and spelling the new root gives a labelled chord.

use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result as AnyResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chromatic::{transpose, ChromaticNote, ChromaticTable, KeyPreference};
use crate::error::{Result, TheoryError};

/// Marker in a chord name that relabels the chord as a slash chord
pub const SLASH_MARKER: &str = "/root+";

/// A named chord type and its interval tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDefinition {
    /// Suffix printed after the root (e.g. "m7")
    pub name: String,
    /// Relative sampling weight for the chord search
    #[serde(default)]
    pub weight: u32,
    pub one: String,
    #[serde(default)]
    pub three: Option<String>,
    #[serde(default)]
    pub five: Option<String>,
    #[serde(default)]
    pub seven: Option<String>,
    #[serde(default)]
    pub nine: Option<String>,
    #[serde(default)]
    pub eleven: Option<String>,
    #[serde(default)]
    pub thirteen: Option<String>,
}

impl ChordDefinition {
    /// Create a definition with only a root token
    pub fn new(name: impl Into<String>, weight: u32, one: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            one: one.into(),
            three: None,
            five: None,
            seven: None,
            nine: None,
            eleven: None,
            thirteen: None,
        }
    }

    /// Builder-style setter for the optional tokens, in chord order
    pub fn with_tokens(mut self, tokens: &[&str]) -> Self {
        let slots = [
            &mut self.three,
            &mut self.five,
            &mut self.seven,
            &mut self.nine,
            &mut self.eleven,
            &mut self.thirteen,
        ];
        for (slot, token) in slots.into_iter().zip(tokens) {
            *slot = Some(token.to_string());
        }
        self
    }

    fn extensions(&self) -> [Option<&str>; 6] {
        [
            self.three.as_deref(),
            self.five.as_deref(),
            self.seven.as_deref(),
            self.nine.as_deref(),
            self.eleven.as_deref(),
            self.thirteen.as_deref(),
        ]
    }

    /// Split a `/root+N` name into its quality prefix and N
    pub fn slash_offset(&self) -> Option<(&str, i32)> {
        let (prefix, rest) = self.name.split_once(SLASH_MARKER)?;
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok().map(|n| (prefix, n))
    }

    /// Resolve the tokens to root-relative chromatic numbers (root = 1 first).
    ///
    /// Extensions that are missing, `NA`, or not in the notation table are
    /// skipped. The root token must resolve.
    pub fn intervals(&self, chromatic: &ChromaticTable) -> Result<Vec<ChromaticNote>> {
        let root = chromatic
            .resolve_token(&self.one)?
            .ok_or_else(|| TheoryError::token(&self.one))?;
        let mut notes = vec![root];

        for token in self.extensions().into_iter().flatten() {
            match chromatic.resolve_token(token) {
                Ok(Some(n)) => notes.push(n),
                Ok(None) => {}
                Err(e) => debug!(chord = %self.name, %e, "skipping extension"),
            }
        }

        Ok(notes)
    }

    /// Resolve, transpose by `interval` and label the chord
    pub fn resolve(
        &self,
        chromatic: &ChromaticTable,
        interval: i32,
        key: KeyPreference,
    ) -> Result<ResolvedChord> {
        let notes = self
            .intervals(chromatic)?
            .into_iter()
            .map(|n| transpose(n, interval))
            .collect::<Result<Vec<_>>>()?;

        let root = chromatic.spelling_of(notes[0], key)?;
        let label = match self.slash_offset() {
            Some((prefix, offset)) => {
                let upper = transpose(notes[0], offset)?;
                format!("{}{}/{}", chromatic.spelling_of(upper, key)?, prefix, root)
            }
            None => format!("{}{}", root, self.name).trim_end().to_string(),
        };

        Ok(ResolvedChord { label, notes })
    }
}

/// Immutable set of chord types, in table order
#[derive(Debug, Clone, Default)]
pub struct ChordTable {
    chords: Vec<ChordDefinition>,
}

impl ChordTable {
    /// Build the table, rejecting duplicate names
    pub fn new(chords: Vec<ChordDefinition>) -> AnyResult<Self> {
        let mut seen = HashSet::new();
        for chord in &chords {
            if !seen.insert(chord.name.as_str()) {
                bail!("chord '{}' is defined twice", chord.name);
            }
            if chord.name.contains(SLASH_MARKER) && chord.slash_offset().is_none() {
                bail!("chord '{}' has a slash marker without an offset", chord.name);
            }
        }
        Ok(Self { chords })
    }

    /// Look up a chord type by name
    pub fn get(&self, name: &str) -> Result<&ChordDefinition> {
        self.chords
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TheoryError::chord(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChordDefinition> {
        self.chords.iter()
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// A chord with a display label and absolute chromatic numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChord {
    pub label: String,
    /// Chord notes, root first (or bass first for slash chords)
    pub notes: Vec<ChromaticNote>,
}

impl ResolvedChord {
    /// True if every target note sounds in this chord
    pub fn contains_all(&self, target: &[ChromaticNote]) -> bool {
        target.iter().all(|n| self.notes.contains(n))
    }

    /// Add an explicit bass note below the chord
    pub fn with_bass(mut self, bass_label: &str, bass: ChromaticNote) -> Self {
        self.label = format!("{}/{}", self.label, bass_label);
        self.notes.insert(0, bass);
        self
    }

    pub fn root(&self) -> ChromaticNote {
        self.notes[0]
    }
}

impl fmt::Display for ResolvedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
