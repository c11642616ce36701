//! Chord library — the fixed table of diagram shapes, looked up by name.
//!
//! The built-in table is created once per process and shared read-only.
//! A user table can be loaded from JSON and laid over it.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::model::Chord;

#[derive(Debug, Clone, Default)]
pub struct ChordLibrary {
    chords: BTreeMap<String, Chord>,
}

impl ChordLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shapes shipped with the crate.
    pub fn builtin() -> &'static ChordLibrary {
        static BUILTIN: OnceLock<ChordLibrary> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut library = ChordLibrary::new();
            for chord in [
                Chord::new("Am", 0, 4, [2, 0, 0, 0], "2000"),
                Chord::new("C", 2, 4, [-1, 0, 0, 3], "0003"),
                Chord::new("D7", 0, 4, [2, 0, 2, 0], "1030"),
                Chord::new("Em", 0, 4, [0, 4, 3, 2], "0321"),
                Chord::new("F", 0, 4, [2, 0, 1, 0], "2010"),
                Chord::new("Fm", 0, 4, [1, 0, 1, 3], "1024"),
                Chord::new("G", 0, 4, [0, 2, 3, 2], "0132"),
                Chord::new("G7", 0, 4, [0, 2, 1, 2], "0213"),
            ] {
                library.chords.insert(chord.name.clone(), chord);
            }
            library
        })
    }

    /// Parse a JSON array of chords. Every entry is validated.
    pub fn from_json(json: &str) -> Result<ChordLibrary> {
        let chords: Vec<Chord> = serde_json::from_str(json)?;
        let mut library = ChordLibrary::new();
        for chord in chords {
            library.insert(chord)?;
        }
        Ok(library)
    }

    pub fn insert(&mut self, chord: Chord) -> Result<()> {
        chord.validate().map_err(|reason| Error::InvalidChord {
            name: chord.name.clone(),
            reason,
        })?;
        self.chords.insert(chord.name.clone(), chord);
        Ok(())
    }

    /// Overlay `other` on this library; entries in `other` win.
    pub fn extend(&mut self, other: ChordLibrary) {
        self.chords.extend(other.chords);
    }

    pub fn lookup(&self, name: &str) -> Option<&Chord> {
        self.chords.get(name)
    }

    /// Like [`ChordLibrary::lookup`] but absence is an error.
    pub fn require(&self, name: &str) -> Result<&Chord> {
        self.lookup(name).ok_or_else(|| Error::UnknownChord {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chords.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chords.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}
