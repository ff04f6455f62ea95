// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! tunetools - chord and scale tools for musicians.
//!
//! Generates chord charts from note sets, lists chord notes, suggests
//! scales to play over chords and draws chords and scales on instrument
//! fingerboards.

pub mod config;
pub mod engine;
pub mod error;
pub mod music;
pub mod render;

pub use config::{Settings, Tables};
pub use engine::{Engine, ScaleSuggestions, SearchOptions};
pub use error::{Result, TheoryError};
pub use music::{ChromaticNote, Instrument, KeyPreference, ResolvedChord, ResolvedScale};
