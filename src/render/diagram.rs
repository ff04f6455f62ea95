// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! ASCII fingerboard diagrams.

use crate::music::fretboard::{FretboardMap, Instrument, InstrumentLayout};

/// Draw a mapped note set on an instrument neck.
///
/// The label line is followed by an edge line above and below every
/// string, then the inlay dots for instruments that have them.
pub fn fretboard_diagram(
    label: &str,
    instrument: Instrument,
    layout: &InstrumentLayout,
    map: &FretboardMap,
) -> String {
    let positions = layout.positions();
    let edge: String = positions.iter().map(|p| p.edge.as_str()).collect();

    let mut lines = vec![format!("{} on {}", label.trim(), instrument)];
    for &s in instrument.string_order() {
        let Some(tokens) = map.string(s) else {
            continue;
        };
        let string_line: String = positions
            .iter()
            .zip(tokens)
            .map(|(pos, token)| {
                let (lead, tail) = pos.node_parts();
                format!("{}{}{}", lead, token, tail)
            })
            .collect();
        lines.push(edge.clone());
        lines.push(string_line);
    }
    lines.push(edge);

    if instrument.shows_inlays() {
        let dots: String = positions
            .iter()
            .filter_map(|p| p.inlay_dots.as_deref())
            .collect();
        lines.push(dots);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tables;
    use crate::music::chromatic::KeyPreference;

    fn draw(instrument: Instrument, notes: &[u8]) -> Vec<String> {
        let t = Tables::builtin().unwrap();
        let layout = t.layouts.for_instrument(instrument);
        let map = FretboardMap::map(layout, notes, &t.chromatic, KeyPreference::Flat).unwrap();
        fretboard_diagram("C ", instrument, layout, &map)
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_guitar_diagram_shape() {
        let lines = draw(Instrument::Guitar, &[1, 5, 8]);
        assert_eq!(lines[0], "C on guitar");
        // label, six strings with edges, closing edge, dots
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[1], format!("    |{}", "====|".repeat(12)));
        // top and bottom lines are both the E string
        assert_eq!(lines[2], lines[12]);
        assert!(lines[2].starts_with(" E  |-  -|-  -|-G -|"));
        assert_eq!(lines[14].chars().count(), 65);
        assert!(lines[14].contains('*'));
    }

    #[test]
    fn test_bass_diagram_uses_lower_strings() {
        let guitar = draw(Instrument::Guitar, &[1, 5, 8]);
        let bass = draw(Instrument::Bass, &[1, 5, 8]);
        assert_eq!(bass[0], "C on bass");
        assert_eq!(bass.len(), 11);
        // G, D, A strings then low E
        assert_eq!(bass[2], guitar[6]);
        assert_eq!(bass[4], guitar[8]);
        assert_eq!(bass[6], guitar[10]);
        assert_eq!(bass[8], guitar[2]);
    }

    #[test]
    fn test_violin_has_no_dots() {
        let lines = draw(Instrument::Violin, &[1, 5, 8]);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9], lines[1]);
    }

    #[test]
    fn test_mandolin_has_dots() {
        let lines = draw(Instrument::Mandolin, &[1, 5, 8]);
        assert_eq!(lines[0], "C on mandolin");
        // the shared violin neck has no inlay glyphs, so the dots line is blank
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[10], "");
    }
}
