// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Randomized chord search.
//!
//! Finds a chord containing a set of target notes by sampling chord types
//! and transpositions instead of enumerating them. When a tier runs out of
//! trials the target is relaxed and a fresh budget of trials starts.

use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Result, TheoryError};
use crate::music::chord::{ChordTable, ResolvedChord};
use crate::music::chromatic::{ChromaticNote, ChromaticTable, KeyPreference, CHROMATIC_LEN};

/// Trials per relaxation tier
pub const DEFAULT_TRIALS: usize = 1000;

/// Search budget and sampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Random trials per tier
    pub trials: usize,
    /// Sample chord types in proportion to their weight
    pub weighted: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            weighted: false,
        }
    }
}

/// How much of the target a tier must match, in the order tiers run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    Full,
    DropLast,
    DropLastTwo,
    FirstThree,
    FirstTwo,
    FirstOne,
}

impl Relaxation {
    pub const TIERS: [Relaxation; 6] = [
        Relaxation::Full,
        Relaxation::DropLast,
        Relaxation::DropLastTwo,
        Relaxation::FirstThree,
        Relaxation::FirstTwo,
        Relaxation::FirstOne,
    ];

    /// The part of the target this tier requires
    pub fn apply<T>(self, target: &[T]) -> &[T] {
        let len = target.len();
        let end = match self {
            Relaxation::Full => len,
            Relaxation::DropLast => len.saturating_sub(1),
            Relaxation::DropLastTwo => len.saturating_sub(2),
            Relaxation::FirstThree => len.min(3),
            Relaxation::FirstTwo => len.min(2),
            Relaxation::FirstOne => len.min(1),
        };
        &target[..end]
    }
}

/// Chord sampler over one chord table
pub struct ChordSearch<'a> {
    chromatic: &'a ChromaticTable,
    chords: &'a ChordTable,
    key: KeyPreference,
    trials: usize,
    /// Indices into the chord table; weighted mode repeats each by its weight
    pool: Vec<usize>,
}

impl<'a> ChordSearch<'a> {
    pub fn new(
        chromatic: &'a ChromaticTable,
        chords: &'a ChordTable,
        key: KeyPreference,
        options: SearchOptions,
    ) -> Self {
        let pool = chords
            .iter()
            .enumerate()
            .flat_map(|(i, chord)| {
                let copies = if options.weighted { chord.weight as usize } else { 1 };
                std::iter::repeat(i).take(copies)
            })
            .collect();

        Self {
            chromatic,
            chords,
            key,
            trials: options.trials,
            pool,
        }
    }

    /// Number of entries chord types are drawn from
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Draw one chord type and one transposition
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<ResolvedChord>> {
        if self.pool.is_empty() {
            return Ok(None);
        }
        let index = self.pool[rng.gen_range(0..self.pool.len())];
        let interval = rng.gen_range(0..CHROMATIC_LEN as i32);
        let chord = self
            .chords
            .iter()
            .nth(index)
            .ok_or_else(|| TheoryError::chord(&index.to_string()))?;
        chord.resolve(self.chromatic, interval, self.key).map(Some)
    }

    /// Find a chord containing `target`, relaxing it tier by tier.
    ///
    /// Tiers whose relaxed target is empty are skipped, since any chord
    /// would satisfy them.
    pub fn find<R: Rng + ?Sized>(
        &self,
        target: &[ChromaticNote],
        rng: &mut R,
    ) -> Result<ResolvedChord> {
        if let Some(&bad) = target.iter().find(|n| !(1..=CHROMATIC_LEN).contains(*n)) {
            return Err(TheoryError::InvalidIndex(bad as i32));
        }

        for tier in Relaxation::TIERS {
            let wanted = tier.apply(target);
            if wanted.is_empty() {
                trace!(?tier, "skipping empty tier");
                continue;
            }
            debug!(?tier, ?wanted, trials = self.trials, "searching");

            for trial in 0..self.trials {
                let Some(chord) = self.sample(rng)? else {
                    break;
                };
                if chord.contains_all(wanted) {
                    debug!(?tier, trial, label = %chord.label, "found chord");
                    return Ok(chord);
                }
            }
        }

        let spelled = self.chromatic.spell_all(target, self.key)?;
        Err(TheoryError::SearchExhausted(spelled.join(" ")))
    }
}
