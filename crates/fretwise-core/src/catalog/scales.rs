//! Scale formulas and the seven diatonic modes

use serde::{Deserialize, Serialize};

use super::{resolve, Formula};

const fn scale(id: &'static str, name: &'static str, symbol: &'static str, semitones: &'static [u8]) -> Formula {
    Formula { id, name, symbol, semitones }
}

static SCALES: [Formula; 15] = [
    scale("major", "Major", "maj", &[0, 2, 4, 5, 7, 9, 11]),
    scale("dorian", "Dorian", "dor", &[0, 2, 3, 5, 7, 9, 10]),
    scale("phrygian", "Phrygian", "phr", &[0, 1, 3, 5, 7, 8, 10]),
    scale("lydian", "Lydian", "lyd", &[0, 2, 4, 6, 7, 9, 11]),
    scale("mixolydian", "Mixolydian", "mix", &[0, 2, 4, 5, 7, 9, 10]),
    scale("aeolian", "Aeolian", "aeo", &[0, 2, 3, 5, 7, 8, 10]),
    scale("locrian", "Locrian", "loc", &[0, 1, 3, 5, 6, 8, 10]),
    scale("harmonic-minor", "Harmonic Minor", "hm", &[0, 2, 3, 5, 7, 8, 11]),
    scale("melodic-minor", "Melodic Minor", "mm", &[0, 2, 3, 5, 7, 9, 11]),
    scale("major-pentatonic", "Major Pentatonic", "pent", &[0, 2, 4, 7, 9]),
    scale("minor-pentatonic", "Minor Pentatonic", "m pent", &[0, 3, 5, 7, 10]),
    scale("blues", "Blues", "blues", &[0, 3, 5, 6, 7, 10]),
    scale("major-blues", "Major Blues", "maj blues", &[0, 2, 3, 4, 7, 9]),
    scale("whole-tone", "Whole Tone", "wt", &[0, 2, 4, 6, 8, 10]),
    scale("chromatic", "Chromatic", "chr", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
];

static SCALE_ALIASES: [(&str, &str); 8] = [
    ("ionian", "major"),
    ("minor", "aeolian"),
    ("natural-minor", "aeolian"),
    ("pentatonic", "minor-pentatonic"),
    ("minor-blues", "blues"),
    ("harmonic", "harmonic-minor"),
    ("melodic", "melodic-minor"),
    ("jazz-minor", "melodic-minor"),
];

/// Look up a scale formula by id or alias.
pub fn scale_formula(id: &str) -> Option<&'static Formula> {
    resolve(id, &SCALES, &SCALE_ALIASES)
}

/// Canonical id for `id`, if it names a scale.
pub fn resolve_scale_id(id: &str) -> Option<&'static str> {
    scale_formula(id).map(|f| f.id)
}

/// Every scale in the catalog, in listing order.
pub fn scale_formulas() -> &'static [Formula] {
    &SCALES
}

/// The modes of the major scale, in degree order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiatonicMode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl DiatonicMode {
    pub const ALL: [DiatonicMode; 7] = [
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
    ];

    /// Zero-based scale degree of the parent major scale this mode starts on.
    pub fn degree(self) -> usize {
        self as usize
    }

    pub fn from_degree(degree: usize) -> Self {
        Self::ALL[degree % 7]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ionian => "Ionian",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Aeolian => "Aeolian",
            Self::Locrian => "Locrian",
        }
    }

    /// Semitones from the parent major tonic up to this mode's root.
    pub fn offset_from_tonic(self) -> u8 {
        major_formula().semitones[self.degree()]
    }

    /// This mode's own formula, rotated out of the major scale.
    pub fn semitones(self) -> Vec<u8> {
        let major = major_formula().semitones;
        let start = major[self.degree()];
        (0..7)
            .map(|i| (major[(self.degree() + i) % 7] + 12 - start) % 12)
            .collect()
    }
}

fn major_formula() -> &'static Formula {
    &SCALES[0]
}
