// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for tunetools.
//!
//! `Settings` holds the user preferences read from a TOML file; every
//! field has a default so an empty file is valid. The lookup tables live
//! in [`tables`].

pub mod tables;

pub use tables::{Layouts, Tables};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::engine::{Engine, SearchOptions, DEFAULT_TRIALS};
use crate::music::chromatic::KeyPreference;
use crate::music::fretboard::Instrument;

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Spell accidentals as flats ("b") or sharps ("#")
    pub key: KeyPreference,
    /// Sample chord types by table weight in the chord search
    pub weighted: bool,
    /// Chord search trials per relaxation tier
    pub trials: usize,
    /// Fixed seed for repeatable chord charts
    pub seed: Option<u64>,
    /// Instrument for fingerboard output
    pub instrument: Option<Instrument>,
    /// List the notes of each generated chord under the chart
    pub show_notes: bool,
    /// tracing level name: error, warn, info, debug or trace
    pub log_level: String,
    /// Directory of YAML tables replacing the built-in ones
    pub tables: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key: KeyPreference::default(),
            weighted: false,
            trials: DEFAULT_TRIALS,
            seed: None,
            instrument: None,
            show_notes: false,
            log_level: "warn".to_string(),
            tables: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Failed to parse TOML configuration")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml = self.to_toml()?;
        fs::write(path.as_ref(), toml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// The configured log level
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("Invalid log level: {}", self.log_level))
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            trials: self.trials,
            weighted: self.weighted,
        }
    }

    /// Load the tables: the override directory if set, else the built-ins
    pub fn tables(&self) -> Result<Tables> {
        match &self.tables {
            Some(dir) => Tables::load_dir(dir),
            None => Tables::builtin(),
        }
    }

    /// Build an engine from these settings
    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::new(self.tables()?, self.key)?.with_search(self.search_options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.key, KeyPreference::Flat);
        assert_eq!(settings.trials, DEFAULT_TRIALS);
        assert_eq!(settings.level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_parse_settings() {
        let toml = r##"
key = "#"
weighted = true
trials = 250
seed = 42
instrument = "ukulele"
show_notes = true
log_level = "debug"
"##;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.key, KeyPreference::Sharp);
        assert!(settings.weighted);
        assert_eq!(settings.trials, 250);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.instrument, Some(Instrument::Ukulele));
        assert!(settings.show_notes);
        assert_eq!(settings.level().unwrap(), Level::DEBUG);
        assert_eq!(
            settings.search_options(),
            SearchOptions {
                trials: 250,
                weighted: true
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Settings::from_toml("key = \"x\"").is_err());
        assert!(Settings::from_toml("instrument = \"banjo\"").is_err());

        let settings = Settings::from_toml("log_level = \"loud\"").unwrap();
        assert!(settings.level().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let settings = Settings {
            key: KeyPreference::Sharp,
            seed: Some(7),
            instrument: Some(Instrument::Bass),
            ..Default::default()
        };
        settings.save(file.path()).unwrap();

        let loaded = Settings::load(file.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_tables_override_directory() {
        let dir = tempdir().unwrap();
        Tables::export_builtin(dir.path()).unwrap();
        fs::write(
            dir.path().join(tables::SCALES_FILE),
            "- name: major\n  chromatic_numbers: \"1|3|5|6|8|10|12\"\n",
        )
        .unwrap();

        let settings = Settings {
            tables: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let engine = settings.engine().unwrap();
        assert_eq!(engine.tables().scales.len(), 1);
        assert!(engine.resolve_scale_from_text("C dorian").is_err());
    }
}
