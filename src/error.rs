// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.
//!
//! Every variant terminates the current query. Nothing here is retried;
//! the tiered chord search is a search strategy, not error recovery.

use thiserror::Error;

/// Errors produced while resolving notes, chords and scales
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// Spelling not present in either column of the chromatic table
    #[error("{0} is not an existing note string label")]
    UnknownNote(String),

    /// Chromatic index outside the configured rows
    #[error("{0} is not an existing chromatic note index")]
    InvalidIndex(i32),

    /// Transposition interval outside [0, 11]
    #[error("invalid transposition interval {0}, expected 0-11")]
    InvalidInterval(i32),

    /// Printed chord text matched neither chord shape
    #[error("{0} is not a valid input chord")]
    InvalidChordText(String),

    /// Printed scale text did not name a known root and scale
    #[error("{0} is not a valid scale name")]
    InvalidScaleText(String),

    /// Chord, scale or interval token absent from its table
    #[error("{kind} '{name}' not found")]
    UnresolvedLookup { kind: &'static str, name: String },

    /// Every relaxation tier of the chord search ran out of trials
    #[error("no chord found containing {0}")]
    SearchExhausted(String),

    /// Key argument was neither "b" nor "#"
    #[error("incorrect keys argument '{0}', should be # or b")]
    InvalidKeyPreference(String),

    /// Instrument name with no layout
    #[error("invalid instrument '{0}', should be one of: guitar, bass, ukulele, violin, mandolin")]
    UnknownInstrument(String),
}

impl TheoryError {
    pub(crate) fn chord(name: &str) -> Self {
        TheoryError::UnresolvedLookup {
            kind: "chord",
            name: name.to_string(),
        }
    }

    pub(crate) fn scale(name: &str) -> Self {
        TheoryError::UnresolvedLookup {
            kind: "scale",
            name: name.to_string(),
        }
    }

    pub(crate) fn token(name: &str) -> Self {
        TheoryError::UnresolvedLookup {
            kind: "chord notation",
            name: name.to_string(),
        }
    }
}

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, TheoryError>;
