//! Error types for fretwise

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FretwiseError {
    #[error("Unknown note: {0}")]
    UnknownNote(String),
    #[error("Unknown chord or scale formula: {0}")]
    UnknownFormula(String),
    #[error("Invalid interval token: {0}")]
    InvalidInterval(String),
    #[error("Pitch class {pitch_class} is not on string {string} at or below fret {max_fret}")]
    NoteNotOnFretboard {
        string: usize,
        pitch_class: u8,
        max_fret: u8,
    },
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Formula is not a three-note triad: {0}")]
    NotATriad(String),
    #[error("No triad voicings on strings {0:?}")]
    NoVoicings([usize; 3]),
    #[error("Engine invariant violated: {0}")]
    EngineInvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, FretwiseError>;
