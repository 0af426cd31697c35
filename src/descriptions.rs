// src/descriptions.rs

//! Description table for initial check-ins
//!
//! RCS keeps a descriptive text per archive, set on the first check-in. A
//! description table supplies it per file:
//!
//! ```text
//! main.c: Command-line driver
//! util.c: String helpers
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// `filename -> description` mapping
#[derive(Debug, Clone, Default)]
pub struct DescriptionTable {
    entries: HashMap<String, String>,
}

impl DescriptionTable {
    /// Parse table text
    ///
    /// Blank lines are skipped. Every other line must split on `:` into
    /// exactly two fields, and a filename may appear only once.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(':').collect();
            let [filename, description] = fields[..] else {
                return Err(Error::MalformedDescription(line.to_string()));
            };

            if entries.contains_key(filename) {
                return Err(Error::DuplicateDescription(filename.to_string()));
            }
            entries.insert(filename.to_string(), description.trim().to_string());
        }
        Ok(Self { entries })
    }

    /// Read and parse a table file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Description for `stem`, if the table has one
    pub fn get(&self, stem: &str) -> Option<&str> {
        self.entries.get(stem).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
