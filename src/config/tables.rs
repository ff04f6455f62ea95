// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lookup tables: chromatic numbers, chords, scales and instrument necks.
//!
//! The tables ship in `resources/` and are compiled in as the defaults.
//! A directory holding files of the same names can replace them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::music::chord::{ChordDefinition, ChordTable};
use crate::music::chromatic::{ChromaticRow, ChromaticTable};
use crate::music::fretboard::{FretPosition, Instrument, InstrumentLayout};
use crate::music::scale::{ScaleDefinition, ScaleTable};

pub const CHROMATIC_FILE: &str = "chromatic_numbers.yaml";
pub const CHORDS_FILE: &str = "chords.yaml";
pub const SCALES_FILE: &str = "scales.yaml";
pub const GUITAR_FILE: &str = "guitar.yaml";
pub const UKULELE_FILE: &str = "ukulele.yaml";
pub const VIOLIN_FILE: &str = "violin.yaml";

const BUILTIN: [(&str, &str); 6] = [
    (CHROMATIC_FILE, include_str!("../../resources/chromatic_numbers.yaml")),
    (CHORDS_FILE, include_str!("../../resources/chords.yaml")),
    (SCALES_FILE, include_str!("../../resources/scales.yaml")),
    (GUITAR_FILE, include_str!("../../resources/guitar.yaml")),
    (UKULELE_FILE, include_str!("../../resources/ukulele.yaml")),
    (VIOLIN_FILE, include_str!("../../resources/violin.yaml")),
];

/// Instrument necks. Bass shares the guitar neck, mandolin the violin neck.
#[derive(Debug, Clone)]
pub struct Layouts {
    pub guitar: InstrumentLayout,
    pub ukulele: InstrumentLayout,
    pub violin: InstrumentLayout,
}

impl Layouts {
    /// The neck an instrument is drawn on
    pub fn for_instrument(&self, instrument: Instrument) -> &InstrumentLayout {
        match instrument {
            Instrument::Guitar | Instrument::Bass => &self.guitar,
            Instrument::Ukulele => &self.ukulele,
            Instrument::Violin | Instrument::Mandolin => &self.violin,
        }
    }
}

/// Every table the engine reads, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct Tables {
    pub chromatic: ChromaticTable,
    pub chords: ChordTable,
    pub scales: ScaleTable,
    pub layouts: Layouts,
}

fn parse<T: DeserializeOwned>(name: &str, yaml: &str) -> Result<Vec<T>> {
    serde_yaml::from_str(yaml).with_context(|| format!("Failed to parse table {}", name))
}

impl Tables {
    /// Tables compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_sources(|name| {
            BUILTIN
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, yaml)| yaml.to_string())
                .with_context(|| format!("No built-in table {}", name))
        })
    }

    /// Load every table from YAML files in a directory
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        info!(?dir, "loading tables");
        Self::from_sources(|name| {
            let path = dir.join(name);
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read table file: {:?}", path))
        })
    }

    fn from_sources<F>(read: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String>,
    {
        let chromatic = ChromaticTable::from_rows(parse::<ChromaticRow>(
            CHROMATIC_FILE,
            &read(CHROMATIC_FILE)?,
        )?)
        .context("Invalid chromatic table")?;
        let chords = ChordTable::new(parse::<ChordDefinition>(CHORDS_FILE, &read(CHORDS_FILE)?)?)
            .context("Invalid chord table")?;
        let scales = ScaleTable::new(parse::<ScaleDefinition>(SCALES_FILE, &read(SCALES_FILE)?)?)
            .context("Invalid scale table")?;

        let layout = |file: &str| -> Result<InstrumentLayout> {
            InstrumentLayout::new(parse::<FretPosition>(file, &read(file)?)?)
                .with_context(|| format!("Invalid instrument layout {}", file))
        };
        let layouts = Layouts {
            guitar: layout(GUITAR_FILE)?,
            ukulele: layout(UKULELE_FILE)?,
            violin: layout(VIOLIN_FILE)?,
        };

        Ok(Self {
            chromatic,
            chords,
            scales,
            layouts,
        })
    }

    /// Write the built-in tables into a directory as editable YAML
    pub fn export_builtin<P: AsRef<Path>>(dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create table directory: {:?}", dir))?;
        for (name, yaml) in BUILTIN {
            let path = dir.join(name);
            fs::write(&path, yaml)
                .with_context(|| format!("Failed to write table file: {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_tables_load() {
        let t = Tables::builtin().unwrap();
        assert_eq!(t.chromatic.rows().len(), 12);
        assert!(t.chords.len() > 20);
        assert!(t.scales.get("whole half diminished").is_ok());
        assert!(t.scales.get("whole tone scale").is_ok());
        assert_eq!(t.layouts.guitar.string_count(), 5);
        assert_eq!(t.layouts.ukulele.string_count(), 4);
        assert_eq!(t.layouts.violin.string_count(), 4);
    }

    #[test]
    fn test_builtin_chords_resolve() {
        let t = Tables::builtin().unwrap();
        for chord in t.chords.iter() {
            for interval in 0..12 {
                assert!(
                    chord.resolve(&t.chromatic, interval, Default::default()).is_ok(),
                    "chord {:?} at {}",
                    chord.name,
                    interval
                );
            }
        }
    }

    #[test]
    fn test_load_dir_round_trip() {
        let dir = tempdir().unwrap();
        Tables::export_builtin(dir.path()).unwrap();
        let t = Tables::load_dir(dir.path()).unwrap();
        assert_eq!(t.chords.len(), Tables::builtin().unwrap().chords.len());
    }

    #[test]
    fn test_load_dir_custom_chords() {
        let dir = tempdir().unwrap();
        Tables::export_builtin(dir.path()).unwrap();
        fs::write(
            dir.path().join(CHORDS_FILE),
            "- name: m\n  weight: 1\n  one: \"1\"\n  three: b3\n  five: \"5\"\n",
        )
        .unwrap();

        let t = Tables::load_dir(dir.path()).unwrap();
        assert_eq!(t.chords.len(), 1);
        assert_eq!(t.chords.get("m").unwrap().weight, 1);
    }

    #[test]
    fn test_load_dir_missing_file() {
        let dir = tempdir().unwrap();
        let err = Tables::load_dir(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(CHROMATIC_FILE));
    }

    #[test]
    fn test_load_dir_invalid_yaml() {
        let dir = tempdir().unwrap();
        Tables::export_builtin(dir.path()).unwrap();
        fs::write(dir.path().join(SCALES_FILE), "this is not valid yaml: [").unwrap();
        assert!(Tables::load_dir(dir.path()).is_err());
    }
}
