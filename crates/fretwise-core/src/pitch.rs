//! Pitch classes, note spelling and key signatures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FretwiseError, Result};

/// Canonical sharp spellings, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings, indexed by pitch class.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Major keys written with a flat key signature.
pub const FLAT_KEYS: [&str; 6] = ["F", "Bb", "Eb", "Ab", "Db", "Gb"];

/// Circle-of-fifths spelling of every major key, indexed by pitch class.
/// F# is the boundary key and keeps its sharp spelling.
const MAJOR_KEY_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Enharmonic spellings resolved to their canonical sharp name before lookup.
const ENHARMONIC_TO_SHARP: [(&str, &str); 9] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
    ("Cb", "B"),
    ("Fb", "E"),
    ("E#", "F"),
    ("B#", "C"),
];

/// A note identity modulo the octave, always in `0..12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wraps any semitone count into a pitch class.
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Ascending distance from `root` to `self`, in `0..12`.
    pub fn semitones_above(self, root: PitchClass) -> u8 {
        (self.0 + 12 - root.0) % 12
    }

    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.0 as usize]
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        if value < 12 {
            Ok(Self(value))
        } else {
            Err(format!("pitch class out of range: {value}"))
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> Self {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

impl FromStr for PitchClass {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self> {
        to_pitch_class(s)
    }
}

/// Uppercases the letter and folds Unicode accidentals to `#`/`b`.
/// Returns `None` for anything that is not a letter A–G followed by accidentals.
fn normalize_spelling(name: &str) -> Option<String> {
    let mut chars = name.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !('A'..='G').contains(&letter) {
        return None;
    }

    let mut spelled = String::with_capacity(3);
    spelled.push(letter);
    for c in chars {
        match c {
            '#' | '♯' => spelled.push('#'),
            'b' | '♭' => spelled.push('b'),
            _ => return None,
        }
    }
    Some(spelled)
}

/// Convert a note name in any single-accidental spelling to its pitch class.
pub fn to_pitch_class(name: &str) -> Result<PitchClass> {
    let unknown = || FretwiseError::UnknownNote(name.to_string());
    let spelled = normalize_spelling(name).ok_or_else(unknown)?;

    let sharp = ENHARMONIC_TO_SHARP
        .iter()
        .find(|(alias, _)| *alias == spelled)
        .map(|(_, sharp)| *sharp)
        .unwrap_or(spelled.as_str());

    SHARP_NAMES
        .iter()
        .position(|&n| n == sharp)
        .map(|idx| PitchClass(idx as u8))
        .ok_or_else(unknown)
}

/// Map any spelling of a major key to its circle-of-fifths name (C# → Db, F# stays F#).
pub fn normalize_major_key_name(key: &str) -> Result<&'static str> {
    let pc = to_pitch_class(key)?;
    Ok(MAJOR_KEY_NAMES[pc.value() as usize])
}

/// Whether `key` is spelled, or normalizes to, a flat-signature major key.
/// Unrecognized keys fall back to sharps.
pub fn is_flat_key(key: &str) -> bool {
    if let Some(spelled) = normalize_spelling(key) {
        if FLAT_KEYS.contains(&spelled.as_str()) {
            return true;
        }
    }
    normalize_major_key_name(key)
        .map(|canonical| FLAT_KEYS.contains(&canonical))
        .unwrap_or(false)
}

/// Spell a pitch class for display, using flats only in flat-signature keys.
pub fn to_display_name(pc: PitchClass, key: Option<&str>) -> &'static str {
    match key {
        Some(key) if is_flat_key(key) => pc.flat_name(),
        _ => pc.sharp_name(),
    }
}

/// The relative minor tonic of a major key, spelled in that key's signature.
pub fn relative_minor(major_key: &str) -> Result<&'static str> {
    let tonic = to_pitch_class(major_key)?;
    Ok(to_display_name(tonic.transpose(-3), Some(major_key)))
}
