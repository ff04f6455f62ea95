// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Theory engine for tunetools.
//!
//! The engine owns the loaded tables and the notation parser built from
//! them. Every operation is a pure function of its input, the tables and
//! the key preference; the chord search additionally takes a caller-owned
//! random source.

pub mod search;
pub mod suggest;

pub use search::{ChordSearch, Relaxation, SearchOptions, DEFAULT_TRIALS};
pub use suggest::{collapse_aliases, AliasGroup, ScaleSuggestions, ALIAS_GROUPS};

use anyhow::Result as AnyResult;
use rand::Rng;
use tracing::debug;

use crate::config::Tables;
use crate::error::Result;
use crate::music::chord::ResolvedChord;
use crate::music::chromatic::{ChromaticNote, KeyPreference};
use crate::music::fretboard::{FretboardMap, Instrument};
use crate::music::notation::NotationParser;
use crate::music::scale::ResolvedScale;

/// Tables, parser and preferences bundled for queries
#[derive(Debug, Clone)]
pub struct Engine {
    tables: Tables,
    parser: NotationParser,
    key: KeyPreference,
    search: SearchOptions,
}

impl Engine {
    /// Create an engine over loaded tables
    pub fn new(tables: Tables, key: KeyPreference) -> AnyResult<Self> {
        let parser = NotationParser::new(&tables.chromatic, &tables.scales)?;
        Ok(Self {
            tables,
            parser,
            key,
            search: SearchOptions::default(),
        })
    }

    /// Replace the chord search options
    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn key(&self) -> KeyPreference {
        self.key
    }

    pub fn search_options(&self) -> SearchOptions {
        self.search
    }

    /// Root-relative chromatic numbers of a chord type
    pub fn resolve_chord_intervals(&self, name: &str) -> Result<Vec<ChromaticNote>> {
        self.tables.chords.get(name)?.intervals(&self.tables.chromatic)
    }

    /// A chord type transposed up by `interval` and labelled
    pub fn build_resolved_chord(&self, name: &str, interval: i32) -> Result<ResolvedChord> {
        self.tables
            .chords
            .get(name)?
            .resolve(&self.tables.chromatic, interval, self.key)
    }

    /// Parse a line of space-separated note spellings ("C Eb G")
    pub fn parse_notes(&self, line: &str) -> Result<Vec<ChromaticNote>> {
        line.split_whitespace()
            .map(|note| self.tables.chromatic.index_of(note))
            .collect()
    }

    /// Find a chord containing the target notes
    pub fn resolve_chord_from_target<R: Rng + ?Sized>(
        &self,
        target: &[ChromaticNote],
        rng: &mut R,
    ) -> Result<ResolvedChord> {
        ChordSearch::new(&self.tables.chromatic, &self.tables.chords, self.key, self.search)
            .find(target, rng)
    }

    /// Resolve printed chord text ("Am7", "G/B")
    pub fn resolve_chord_from_text(&self, text: &str) -> Result<ResolvedChord> {
        let parsed = self.parser.parse_chord(text)?;
        let root = self.tables.chromatic.index_of(&parsed.root)?;
        let chord = self.build_resolved_chord(parsed.chord_name(), root as i32 - 1)?;

        match parsed.bass {
            Some(bass) => {
                let index = self.tables.chromatic.index_of(&bass)?;
                debug!(chord = %chord.label, %bass, "adding slash bass");
                Ok(chord.with_bass(&bass, index))
            }
            None => Ok(chord),
        }
    }

    /// Spelled notes of printed chord text, bass first for slash chords
    pub fn chord_notes(&self, text: &str) -> Result<Vec<String>> {
        let chord = self.resolve_chord_from_text(text)?;
        self.tables.chromatic.spell_all(&chord.notes, self.key)
    }

    /// Resolve printed scale text ("F# natural minor")
    pub fn resolve_scale_from_text(&self, text: &str) -> Result<ResolvedScale> {
        let parsed = self.parser.parse_scale(text)?;
        let root = self.tables.chromatic.index_of(&parsed.root)?;
        self.tables.scales.get(&parsed.scale)?.on_root(&parsed.root, root)
    }

    /// Scales that fit a chord
    pub fn suggest_scales(&self, chord: &ResolvedChord) -> Result<ScaleSuggestions> {
        suggest::suggest_scales(&self.tables.chromatic, &self.tables.scales, &chord.notes, self.key)
    }

    /// Note tokens for a note set on an instrument neck
    pub fn map_note_set_to_fretboard(
        &self,
        instrument: Instrument,
        notes: &[ChromaticNote],
    ) -> Result<FretboardMap> {
        FretboardMap::map(
            self.tables.layouts.for_instrument(instrument),
            notes,
            &self.tables.chromatic,
            self.key,
        )
    }
}
