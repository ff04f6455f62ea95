// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Printed chord and scale notation.
//!
//! Patterns are generated from the loaded tables. Note spellings are tried
//! longest first so "C#" is never read as "C" followed by a "#" suffix.

use anyhow::{Context, Result as AnyResult};
use regex::Regex;

use super::chromatic::ChromaticTable;
use super::scale::ScaleTable;
use crate::error::{Result, TheoryError};

/// Chord-table key of the chord written with no suffix (the major triad)
pub const EMPTY_SUFFIX: &str = " ";

/// A printed chord split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordText {
    pub root: String,
    /// Suffix as written; a single space when a plain chord has none
    pub suffix: String,
    pub bass: Option<String>,
}

impl ChordText {
    /// The chord-table name for this suffix
    pub fn chord_name(&self) -> &str {
        if self.suffix.is_empty() {
            EMPTY_SUFFIX
        } else {
            &self.suffix
        }
    }
}

/// A printed scale name split into root and scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleText {
    pub root: String,
    pub scale: String,
}

/// Regex-based parser for written chords and scales
#[derive(Debug, Clone)]
pub struct NotationParser {
    slash: Regex,
    chord: Regex,
    scale: Option<Regex>,
}

fn alternation<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

impl NotationParser {
    /// Build the patterns from the note spellings and scale names
    pub fn new(chromatic: &ChromaticTable, scales: &ScaleTable) -> AnyResult<Self> {
        let mut spellings = chromatic.spellings();
        spellings.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        let notes = alternation(spellings);

        let slash = Regex::new(&format!(r"^({notes})(.*?)/({notes})$"))
            .context("failed to build slash chord pattern")?;
        let chord = Regex::new(&format!(r"^({notes})(.*)$"))
            .context("failed to build chord pattern")?;
        let scale = if scales.is_empty() {
            None
        } else {
            let names = alternation(scales.names_longest_first());
            Some(
                Regex::new(&format!(r"^({notes})\s+({names})$"))
                    .context("failed to build scale pattern")?,
            )
        };

        Ok(Self {
            slash,
            chord,
            scale,
        })
    }

    /// Split a printed chord ("C#m7", "G/B", "Am7/G") into root, suffix and bass
    pub fn parse_chord(&self, text: &str) -> Result<ChordText> {
        let text = text.trim();

        if let Some(caps) = self.slash.captures(text) {
            return Ok(ChordText {
                root: caps[1].to_string(),
                suffix: caps[2].to_string(),
                bass: Some(caps[3].to_string()),
            });
        }

        let caps = self
            .chord
            .captures(text)
            .ok_or_else(|| TheoryError::InvalidChordText(text.to_string()))?;
        let suffix = match &caps[2] {
            "" => EMPTY_SUFFIX.to_string(),
            s => s.to_string(),
        };
        Ok(ChordText {
            root: caps[1].to_string(),
            suffix,
            bass: None,
        })
    }

    /// Split a printed scale ("F# natural minor") into root and scale name
    pub fn parse_scale(&self, text: &str) -> Result<ScaleText> {
        let text = text.trim();
        let caps = self
            .scale
            .as_ref()
            .and_then(|re| re.captures(text))
            .ok_or_else(|| TheoryError::InvalidScaleText(text.to_string()))?;
        Ok(ScaleText {
            root: caps[1].to_string(),
            scale: caps[2].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tables;

    fn parser() -> NotationParser {
        let t = Tables::builtin().unwrap();
        NotationParser::new(&t.chromatic, &t.scales).unwrap()
    }

    #[test]
    fn test_parse_sharp_root_with_suffix() {
        let p = parser();
        assert_eq!(
            p.parse_chord("C#m7").unwrap(),
            ChordText {
                root: "C#".to_string(),
                suffix: "m7".to_string(),
                bass: None,
            }
        );
    }

    #[test]
    fn test_parse_flat_root() {
        let p = parser();
        let c = p.parse_chord("Bbmaj7").unwrap();
        assert_eq!(c.root, "Bb");
        assert_eq!(c.suffix, "maj7");
    }

    #[test]
    fn test_parse_slash_chord() {
        let p = parser();
        assert_eq!(
            p.parse_chord("G/B").unwrap(),
            ChordText {
                root: "G".to_string(),
                suffix: String::new(),
                bass: Some("B".to_string()),
            }
        );
        assert_eq!(p.parse_chord("G/B").unwrap().chord_name(), EMPTY_SUFFIX);
    }

    #[test]
    fn test_parse_slash_chord_with_suffix() {
        let p = parser();
        let c = p.parse_chord("Am7/G").unwrap();
        assert_eq!(c.root, "A");
        assert_eq!(c.suffix, "m7");
        assert_eq!(c.bass.as_deref(), Some("G"));
    }

    #[test]
    fn test_parse_root_marker_is_not_a_bass() {
        let p = parser();
        let c = p.parse_chord("C/root+5").unwrap();
        assert_eq!(c.root, "C");
        assert_eq!(c.suffix, "/root+5");
        assert_eq!(c.bass, None);
    }

    #[test]
    fn test_parse_bare_root() {
        let p = parser();
        let c = p.parse_chord(" D ").unwrap();
        assert_eq!(c.root, "D");
        assert_eq!(c.suffix, EMPTY_SUFFIX);
        assert_eq!(c.chord_name(), EMPTY_SUFFIX);
    }

    #[test]
    fn test_parse_invalid_chord() {
        let p = parser();
        assert_eq!(
            p.parse_chord("Hm7"),
            Err(TheoryError::InvalidChordText("Hm7".to_string()))
        );
        assert!(p.parse_chord("").is_err());
    }

    #[test]
    fn test_parse_scale() {
        let p = parser();
        assert_eq!(
            p.parse_scale("F# natural minor").unwrap(),
            ScaleText {
                root: "F#".to_string(),
                scale: "natural minor".to_string(),
            }
        );
        let s = p.parse_scale("C major pentatonic").unwrap();
        assert_eq!(s.scale, "major pentatonic");
        assert!(p.parse_scale("C bebop").is_err());
        assert!(p.parse_scale("major").is_err());
    }
}
