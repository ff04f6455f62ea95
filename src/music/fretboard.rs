// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument necks and note-to-fret mapping.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result as AnyResult};
use serde::{Deserialize, Serialize};

use super::chromatic::{ChromaticNote, ChromaticTable, KeyPreference, CHROMATIC_LEN};
use crate::error::{Result, TheoryError};

/// Width of a note token in a fretboard cell
pub const NOTE_WIDTH: usize = 2;

/// Instruments with a diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Bass,
    Ukulele,
    Violin,
    Mandolin,
}

impl Instrument {
    pub const ALL: [Instrument; 5] = [
        Instrument::Guitar,
        Instrument::Bass,
        Instrument::Ukulele,
        Instrument::Violin,
        Instrument::Mandolin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Bass => "bass",
            Instrument::Ukulele => "ukulele",
            Instrument::Violin => "violin",
            Instrument::Mandolin => "mandolin",
        }
    }

    /// Layout strings (0-based) in the order they are drawn, top line first
    pub fn string_order(self) -> &'static [usize] {
        match self {
            // high E .. A, then low E again
            Instrument::Guitar => &[0, 1, 2, 3, 4, 0],
            // G D A E off the guitar neck
            Instrument::Bass => &[2, 3, 4, 0],
            Instrument::Ukulele | Instrument::Violin | Instrument::Mandolin => &[0, 1, 2, 3],
        }
    }

    /// Whether the diagram ends with the inlay-dot line
    pub fn shows_inlays(self) -> bool {
        !matches!(self, Instrument::Violin)
    }
}

impl FromStr for Instrument {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        Instrument::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or(TheoryError::UnknownInstrument(s))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One fret across all strings, with its drawing glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    #[serde(default)]
    pub fret: Option<u8>,
    pub string_1: ChromaticNote,
    pub string_2: ChromaticNote,
    pub string_3: ChromaticNote,
    pub string_4: ChromaticNote,
    #[serde(default)]
    pub string_5: Option<ChromaticNote>,
    /// Three glyphs: one before the note, two after
    pub node: String,
    pub edge: String,
    #[serde(default)]
    pub inlay_dots: Option<String>,
}

impl FretPosition {
    /// Chromatic number sounded on each string at this fret
    pub fn strings(&self) -> Vec<ChromaticNote> {
        let mut strings = vec![self.string_1, self.string_2, self.string_3, self.string_4];
        strings.extend(self.string_5);
        strings
    }

    /// Node glyphs split around the note token
    pub fn node_parts(&self) -> (String, String) {
        let lead: String = self.node.chars().take(1).collect();
        let tail: String = self.node.chars().skip(1).take(2).collect();
        (lead, tail)
    }
}

/// An instrument neck: fret positions from the nut outwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentLayout {
    positions: Vec<FretPosition>,
    string_count: usize,
}

impl InstrumentLayout {
    /// Validate positions: same string count everywhere, numbers in 1-12
    pub fn new(positions: Vec<FretPosition>) -> AnyResult<Self> {
        let Some(first) = positions.first() else {
            bail!("instrument layout has no fret positions");
        };
        let string_count = first.strings().len();

        for (i, pos) in positions.iter().enumerate() {
            let strings = pos.strings();
            if strings.len() != string_count {
                bail!(
                    "fret position {} has {} strings, expected {}",
                    i,
                    strings.len(),
                    string_count
                );
            }
            if let Some(n) = strings.iter().find(|n| !(1..=CHROMATIC_LEN).contains(*n)) {
                bail!("fret position {} has chromatic number {} outside 1-12", i, n);
            }
            if pos.node.chars().count() != 3 {
                bail!("fret position {} node '{}' must be three glyphs", i, pos.node);
            }
        }

        Ok(Self {
            positions,
            string_count,
        })
    }

    pub fn positions(&self) -> &[FretPosition] {
        &self.positions
    }

    pub fn string_count(&self) -> usize {
        self.string_count
    }

    pub fn fret_count(&self) -> usize {
        self.positions.len()
    }
}

/// Per-string, per-fret note tokens for one note set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FretboardMap {
    /// `strings[s][f]` is the token for layout string `s` at fret `f`
    pub strings: Vec<Vec<String>>,
}

impl FretboardMap {
    /// Project a note set onto a neck.
    ///
    /// Frets sounding a note in the set show its spelling padded to two
    /// characters; every other fret is two spaces.
    pub fn map(
        layout: &InstrumentLayout,
        notes: &[ChromaticNote],
        chromatic: &ChromaticTable,
        key: KeyPreference,
    ) -> Result<Self> {
        let mut strings = vec![Vec::with_capacity(layout.fret_count()); layout.string_count()];
        for pos in layout.positions() {
            for (s, note) in pos.strings().into_iter().enumerate() {
                let token = if notes.contains(&note) {
                    format!("{:<width$}", chromatic.spelling_of(note, key)?, width = NOTE_WIDTH)
                } else {
                    " ".repeat(NOTE_WIDTH)
                };
                strings[s].push(token);
            }
        }
        Ok(Self { strings })
    }

    pub fn string(&self, index: usize) -> Option<&[String]> {
        self.strings.get(index).map(Vec::as_slice)
    }
}
