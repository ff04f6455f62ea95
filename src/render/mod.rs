// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text output for the command line tool.
//!
//! Renderers only format results; all theory lives in the engine.

pub mod diagram;

pub use diagram::fretboard_diagram;

use crate::engine::ScaleSuggestions;

/// One chart line for a sequence of chord labels: `| C | Am | F |`
pub fn chart_line<S: AsRef<str>>(labels: &[S]) -> String {
    let mut line = String::from("|");
    for label in labels {
        line.push(' ');
        line.push_str(label.as_ref());
        line.push_str(" |");
    }
    line
}

/// `Am7: A, C, E, G`
pub fn chord_notes_line<S: AsRef<str>>(text: &str, notes: &[S]) -> String {
    let notes: Vec<&str> = notes.iter().map(AsRef::as_ref).collect();
    format!("{}: {}", text.trim(), notes.join(", "))
}

/// Both suggestion lists under the chord label
pub fn suggestion_block(label: &str, suggestions: &ScaleSuggestions) -> String {
    format!(
        "{}:\nScale(s) with all chord notes\n{}\n\nOther scale(s)\n{}",
        label.trim(),
        suggestions.consonant.join("\n"),
        suggestions.other.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_line() {
        assert_eq!(chart_line(&["C", "Am", "F", "G7"]), "| C | Am | F | G7 |");
        assert_eq!(chart_line(&["Bbmaj7"]), "| Bbmaj7 |");
        assert_eq!(chart_line::<&str>(&[]), "|");
    }

    #[test]
    fn test_chord_notes_line() {
        assert_eq!(chord_notes_line("G/B", &["B", "G", "B", "D"]), "G/B: B, G, B, D");
        assert_eq!(
            chord_notes_line(" Cm ", &["C".to_string(), "Eb".to_string(), "G".to_string()]),
            "Cm: C, Eb, G"
        );
    }

    #[test]
    fn test_suggestion_block() {
        let s = ScaleSuggestions {
            consonant: vec!["C natural minor".to_string(), "C dorian".to_string()],
            other: vec!["C major".to_string()],
        };
        assert_eq!(
            suggestion_block("Cm", &s),
            "Cm:\nScale(s) with all chord notes\nC natural minor\nC dorian\n\nOther scale(s)\nC major"
        );
    }

    #[test]
    fn test_empty_suggestion_block() {
        let block = suggestion_block("C", &ScaleSuggestions::default());
        assert_eq!(block, "C:\nScale(s) with all chord notes\n\n\nOther scale(s)\n");
    }
}
