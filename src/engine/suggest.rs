// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale suggestions for a chord.
//!
//! The chord is shifted so its first note sits on C, then compared against
//! every scale in all twelve rotations. Rotations holding the whole chord
//! are consonant; rotations holding all but one chord note are "other".

use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::music::chromatic::{transpose, ChromaticNote, ChromaticTable, KeyPreference, CHROMATIC_LEN};
use crate::music::scale::ScaleTable;

/// Roots of a transposition-symmetric scale that sound the same notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasGroup {
    pub scale: &'static str,
    pub roots: &'static [ChromaticNote],
}

/// Symmetric-scale groups collapsed into one label each
pub const ALIAS_GROUPS: [AliasGroup; 5] = [
    AliasGroup {
        scale: "whole half diminished",
        roots: &[1, 4, 7, 10],
    },
    AliasGroup {
        scale: "whole half diminished",
        roots: &[2, 5, 8, 11],
    },
    AliasGroup {
        scale: "whole half diminished",
        roots: &[3, 6, 9, 12],
    },
    AliasGroup {
        scale: "whole tone scale",
        roots: &[1, 3, 5, 7, 9, 11],
    },
    AliasGroup {
        scale: "whole tone scale",
        roots: &[12, 2, 4, 6, 8, 10],
    },
];

/// Scale labels ("Eb major") that fit a chord
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleSuggestions {
    /// Scales containing every chord note
    pub consonant: Vec<String>,
    /// Scales containing all but one chord note
    pub other: Vec<String>,
}

fn contains_all(scale: &[ChromaticNote], notes: &[ChromaticNote]) -> bool {
    notes.iter().all(|n| scale.contains(n))
}

/// Keep the first occurrence of each label
pub fn dedup_in_order(labels: Vec<String>) -> Vec<String> {
    labels.into_iter().unique().collect()
}

/// Semitones that move `root` onto 1
fn distance_to_c(root: ChromaticNote) -> i32 {
    let inv = CHROMATIC_LEN as i32 - (root as i32 - 1);
    if inv >= CHROMATIC_LEN as i32 {
        inv - CHROMATIC_LEN as i32
    } else {
        inv
    }
}

/// Undo the shift to C for a rotation root
fn shift_back(rotation_root: ChromaticNote, inv_dist: i32) -> ChromaticNote {
    let mut n = rotation_root as i32 - inv_dist;
    if n <= 0 {
        n += CHROMATIC_LEN as i32;
    }
    n as ChromaticNote
}

/// Suggest scales for a chord's notes (first note is treated as the root)
pub fn suggest_scales(
    chromatic: &ChromaticTable,
    scales: &ScaleTable,
    chord_notes: &[ChromaticNote],
    key: KeyPreference,
) -> Result<ScaleSuggestions> {
    let Some(&root) = chord_notes.first() else {
        return Ok(ScaleSuggestions::default());
    };
    let inv_dist = distance_to_c(root);
    let target = chord_notes
        .iter()
        .map(|&n| transpose(n, inv_dist))
        .collect::<Result<Vec<_>>>()?;
    let near: Vec<Vec<ChromaticNote>> = target
        .iter()
        .copied()
        .combinations(target.len() - 1)
        .collect();

    let mut consonant = Vec::new();
    let mut other = Vec::new();
    for scale in scales.iter() {
        for interval in 0..CHROMATIC_LEN as i32 {
            let rotation = scale.rotation(interval)?;
            let Some(&rotation_root) = rotation.first() else {
                continue;
            };
            let full = contains_all(&rotation, &target);
            let partial = near.iter().any(|combo| contains_all(&rotation, combo));
            if !full && !partial {
                continue;
            }

            let root_name = chromatic.spelling_of(shift_back(rotation_root, inv_dist), key)?;
            let label = format!("{} {}", root_name, scale.name());
            if full {
                consonant.push(label.clone());
            }
            if partial {
                other.push(label);
            }
        }
    }

    let consonant = dedup_in_order(consonant);
    let other: Vec<String> = dedup_in_order(other)
        .into_iter()
        .filter(|label| !consonant.contains(label))
        .collect();

    Ok(ScaleSuggestions {
        consonant: collapse_aliases(consonant, chromatic, key)?,
        other: collapse_aliases(other, chromatic, key)?,
    })
}

/// Replace each complete alias group with one combined label.
///
/// Labels of a group are spelled per `key`; the combined label lists the
/// roots in group order, e.g. "whole half diminished C, Eb, Gb, A".
pub fn collapse_aliases(
    mut labels: Vec<String>,
    chromatic: &ChromaticTable,
    key: KeyPreference,
) -> Result<Vec<String>> {
    for group in ALIAS_GROUPS {
        let roots = chromatic.spell_all(group.roots, key)?;
        let members: Vec<String> = roots
            .iter()
            .map(|r| format!("{} {}", r, group.scale))
            .collect();
        if !members.iter().all(|m| labels.contains(m)) {
            continue;
        }
        labels.retain(|l| !members.contains(l));
        let combined = format!("{} {}", group.scale, roots.join(", "));
        debug!(%combined, "collapsed symmetric scale");
        labels.push(combined);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tables;
    use crate::music::scale::ScaleDefinition;

    #[test]
    fn test_distance_to_c() {
        assert_eq!(distance_to_c(1), 0);
        assert_eq!(distance_to_c(3), 10);
        assert_eq!(distance_to_c(12), 1);
        for root in 1..=12u8 {
            assert_eq!(transpose(root, distance_to_c(root)).unwrap(), 1);
        }
    }

    #[test]
    fn test_shift_back() {
        assert_eq!(shift_back(1, 0), 1);
        assert_eq!(shift_back(1, 10), 3);
        assert_eq!(shift_back(11, 10), 1);
    }

    #[test]
    fn test_c_minor_natural_minor_once() {
        let t = Tables::builtin().unwrap();
        let s = suggest_scales(&t.chromatic, &t.scales, &[1, 4, 8], KeyPreference::Flat).unwrap();
        let count = s.consonant.iter().filter(|l| *l == "C natural minor").count();
        assert_eq!(count, 1);
        assert!(s.consonant.contains(&"C dorian".to_string()));
        assert!(s.consonant.contains(&"Eb major".to_string()));
        assert!(!s.consonant.contains(&"C major".to_string()));
        assert!(!s.other.contains(&"C natural minor".to_string()));
    }

    #[test]
    fn test_other_holds_near_matches() {
        let t = Tables::builtin().unwrap();
        let s = suggest_scales(&t.chromatic, &t.scales, &[1, 4, 8], KeyPreference::Flat).unwrap();
        // C major has C and G but not Eb
        assert!(s.other.contains(&"C major".to_string()));
        for label in &s.other {
            assert!(!s.consonant.contains(label), "{} in both lists", label);
        }
    }

    #[test]
    fn test_lists_are_deduplicated() {
        let t = Tables::builtin().unwrap();
        let s = suggest_scales(&t.chromatic, &t.scales, &[3, 6, 10, 1], KeyPreference::Sharp).unwrap();
        let unique = dedup_in_order(s.other.clone());
        assert_eq!(unique, s.other);
        let unique = dedup_in_order(s.consonant.clone());
        assert_eq!(unique, s.consonant);
    }

    #[test]
    fn test_root_shift_restores_key() {
        let t = Tables::builtin().unwrap();
        // D F# A
        let s = suggest_scales(&t.chromatic, &t.scales, &[3, 7, 10], KeyPreference::Sharp).unwrap();
        assert!(s.consonant.contains(&"D major".to_string()));
        assert!(s.consonant.contains(&"G major".to_string()));
        assert!(s.consonant.contains(&"A major".to_string()));
        assert!(s.consonant.contains(&"B natural minor".to_string()));
    }

    #[test]
    fn test_diminished_chord_collapses_groups() {
        let t = Tables::builtin().unwrap();
        // C Eb Gb A: a diminished seventh sits in two whole-half groups
        let s = suggest_scales(&t.chromatic, &t.scales, &[1, 4, 7, 10], KeyPreference::Flat).unwrap();
        assert!(s
            .consonant
            .contains(&"whole half diminished C, Eb, Gb, A".to_string()));
        assert!(s
            .consonant
            .contains(&"whole half diminished Db, E, G, Bb".to_string()));
        assert!(!s.consonant.iter().any(|l| l.ends_with(" whole half diminished")));
    }

    #[test]
    fn test_whole_tone_collapses() {
        let t = Tables::builtin().unwrap();
        // C E G#: augmented triad
        let s = suggest_scales(&t.chromatic, &t.scales, &[1, 5, 9], KeyPreference::Sharp).unwrap();
        assert!(s
            .consonant
            .contains(&"whole tone scale C, D, E, F#, G#, A#".to_string()));
        assert!(!s.consonant.contains(&"D whole tone scale".to_string()));
    }

    #[test]
    fn test_collapse_full_group() {
        let t = Tables::builtin().unwrap();
        let labels = vec![
            "C major".to_string(),
            "Db whole half diminished".to_string(),
            "E whole half diminished".to_string(),
            "G whole half diminished".to_string(),
            "Bb whole half diminished".to_string(),
        ];
        let cleaned = collapse_aliases(labels, &t.chromatic, KeyPreference::Flat).unwrap();
        assert_eq!(
            cleaned,
            vec![
                "C major".to_string(),
                "whole half diminished Db, E, G, Bb".to_string(),
            ]
        );
    }

    #[test]
    fn test_partial_group_is_kept() {
        let t = Tables::builtin().unwrap();
        let labels = vec![
            "C whole half diminished".to_string(),
            "Eb whole half diminished".to_string(),
        ];
        let cleaned = collapse_aliases(labels.clone(), &t.chromatic, KeyPreference::Flat).unwrap();
        assert_eq!(cleaned, labels);
    }

    #[test]
    fn test_sharp_spelled_group() {
        let t = Tables::builtin().unwrap();
        let labels: Vec<String> = ["B", "C#", "D#", "F", "G", "A"]
            .iter()
            .map(|r| format!("{} whole tone scale", r))
            .collect();
        let cleaned = collapse_aliases(labels, &t.chromatic, KeyPreference::Sharp).unwrap();
        assert_eq!(cleaned, vec!["whole tone scale B, C#, D#, F, G, A".to_string()]);
    }

    #[test]
    fn test_single_note_chord() {
        let t = Tables::builtin().unwrap();
        let scales = ScaleTable::new(vec![ScaleDefinition::new("major", &[1, 3, 5, 6, 8, 10, 12])]).unwrap();
        let s = suggest_scales(&t.chromatic, &scales, &[8], KeyPreference::Flat).unwrap();
        assert_eq!(s.consonant.len(), 7);
        assert!(s.consonant.contains(&"G major".to_string()));
        assert_eq!(s.other.len(), 5);
    }

    #[test]
    fn test_empty_chord() {
        let t = Tables::builtin().unwrap();
        let s = suggest_scales(&t.chromatic, &t.scales, &[], KeyPreference::Flat).unwrap();
        assert_eq!(s, ScaleSuggestions::default());
    }
}
