// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale definitions.
//!
//! Scales are stored as chromatic numbers counted from a root at 1, so a
//! scale "in C" is the stored list itself and any other root is a
//! transposition of it.

use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Context, Result as AnyResult};
use serde::{Deserialize, Serialize};

use super::chromatic::{transpose, ChromaticNote, CHROMATIC_LEN};
use crate::error::{Result, TheoryError};

/// A named scale as pipe-delimited chromatic numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub name: String,
    /// e.g. "1|3|5|6|8|10|12" for major
    pub chromatic_numbers: String,
}

impl ScaleDefinition {
    pub fn new(name: impl Into<String>, numbers: &[ChromaticNote]) -> Self {
        let chromatic_numbers = numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("|");
        Self {
            name: name.into(),
            chromatic_numbers,
        }
    }

    fn parse_numbers(&self) -> AnyResult<Vec<ChromaticNote>> {
        let mut numbers = Vec::new();
        for part in self.chromatic_numbers.split('|') {
            let n: ChromaticNote = part
                .trim()
                .parse()
                .with_context(|| format!("scale '{}' has a bad number '{}'", self.name, part))?;
            if !(1..=CHROMATIC_LEN).contains(&n) {
                bail!("scale '{}' number {} is outside 1-12", self.name, n);
            }
            numbers.push(n);
        }
        Ok(numbers)
    }
}

/// A validated scale: name plus numbers relative to a root at 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    name: String,
    numbers: Vec<ChromaticNote>,
}

impl Scale {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numbers relative to a root at 1
    pub fn numbers(&self) -> &[ChromaticNote] {
        &self.numbers
    }

    /// The scale transposed up by `interval` semitones
    pub fn rotation(&self, interval: i32) -> Result<Vec<ChromaticNote>> {
        self.numbers.iter().map(|&n| transpose(n, interval)).collect()
    }

    /// Build the scale on a root, labelled with the root as written
    pub fn on_root(&self, root_label: &str, root: ChromaticNote) -> Result<ResolvedScale> {
        if !(1..=CHROMATIC_LEN).contains(&root) {
            return Err(TheoryError::InvalidIndex(root as i32));
        }
        Ok(ResolvedScale {
            label: format!("{} {}", root_label, self.name),
            notes: self.rotation(root as i32 - 1)?,
        })
    }
}

/// Immutable set of scales, in table order
#[derive(Debug, Clone, Default)]
pub struct ScaleTable {
    scales: Vec<Scale>,
}

impl ScaleTable {
    /// Validate definitions: unique names, numbers in 1-12
    pub fn new(definitions: Vec<ScaleDefinition>) -> AnyResult<Self> {
        let mut seen = HashSet::new();
        let mut scales = Vec::with_capacity(definitions.len());
        for def in definitions {
            if def.name.trim().is_empty() {
                bail!("scale with an empty name");
            }
            if !seen.insert(def.name.clone()) {
                bail!("scale '{}' is defined twice", def.name);
            }
            let numbers = def.parse_numbers()?;
            scales.push(Scale {
                name: def.name,
                numbers,
            });
        }
        Ok(Self { scales })
    }

    pub fn get(&self, name: &str) -> Result<&Scale> {
        self.scales
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| TheoryError::scale(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }

    /// Scale names, longest first so prefixes never shadow longer names
    pub fn names_longest_first(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scales.iter().map(|s| s.name.as_str()).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

/// A scale on a concrete root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScale {
    pub label: String,
    pub notes: Vec<ChromaticNote>,
}

impl fmt::Display for ResolvedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
