// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory model for tunetools.
//!
//! This module provides the chromatic-number model, chord and scale
//! definitions, printed notation parsing and instrument necks.

pub mod chord;
pub mod chromatic;
pub mod fretboard;
pub mod notation;
pub mod scale;

pub use chord::{ChordDefinition, ChordTable, ResolvedChord};
pub use chromatic::{transpose, ChromaticNote, ChromaticTable, KeyPreference};
pub use fretboard::{FretboardMap, Instrument, InstrumentLayout};
pub use notation::{ChordText, NotationParser, ScaleText};
pub use scale::{ResolvedScale, Scale, ScaleDefinition, ScaleTable};
