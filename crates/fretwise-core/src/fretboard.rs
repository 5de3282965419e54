//! Tunings and the pitch class at every (string, fret)

use serde::{Deserialize, Serialize};

use crate::error::{FretwiseError, Result};
use crate::pitch::{to_pitch_class, PitchClass};

/// Standard six-string tuning, low to high: E A D G B E.
pub const STANDARD_TUNING: [u8; 6] = [4, 9, 2, 7, 11, 4];

/// Ordered open-string pitch classes, lowest-pitched string first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    strings: Vec<PitchClass>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl Tuning {
    pub fn standard() -> Self {
        Self {
            strings: STANDARD_TUNING.iter().map(|&pc| PitchClass::new(pc as i32)).collect(),
        }
    }

    pub fn new(strings: Vec<PitchClass>) -> Result<Self> {
        if strings.is_empty() {
            return Err(FretwiseError::InvalidTuning("tuning has no strings".into()));
        }
        Ok(Self { strings })
    }

    /// Build a tuning from note names, e.g. `["D", "A", "D", "G", "B", "E"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let strings = names
            .iter()
            .map(|n| to_pitch_class(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(strings)
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn open(&self, string: usize) -> PitchClass {
        self.strings[string]
    }

    pub fn strings(&self) -> &[PitchClass] {
        &self.strings
    }

    pub fn string_name(&self, string: usize) -> &'static str {
        self.strings[string].sharp_name()
    }

    /// Require at least `min` strings for an engine that needs them.
    pub fn require_strings(&self, min: usize) -> Result<()> {
        if self.strings.len() < min {
            return Err(FretwiseError::InvalidTuning(format!(
                "need at least {min} strings, tuning has {}",
                self.strings.len()
            )));
        }
        Ok(())
    }
}

/// A concrete (string, fret) location and the pitch class sounding there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FretPosition {
    pub string: usize,
    pub fret: u8,
    pub pitch_class: PitchClass,
}

/// A tuning bounded to frets `0..=max_fret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    max_fret: u8,
}

impl Default for Fretboard {
    fn default() -> Self {
        Self::new(Tuning::standard(), Self::DEFAULT_MAX_FRET)
    }
}

impl Fretboard {
    pub const DEFAULT_MAX_FRET: u8 = 24;

    pub fn new(tuning: Tuning, max_fret: u8) -> Self {
        Self { tuning, max_fret }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn max_fret(&self) -> u8 {
        self.max_fret
    }

    pub fn string_count(&self) -> usize {
        self.tuning.string_count()
    }

    /// Pitch class at `(string, fret)`. Frets past `max_fret` are still computed.
    pub fn pitch_at(&self, string: usize, fret: u8) -> PitchClass {
        self.tuning.open(string).transpose(fret as i32)
    }

    pub fn position(&self, string: usize, fret: u8) -> FretPosition {
        FretPosition { string, fret, pitch_class: self.pitch_at(string, fret) }
    }

    /// Every fret on `string` within bounds that sounds `pc`, ascending.
    pub fn frets_of(&self, string: usize, pc: PitchClass) -> Vec<u8> {
        let first = pc.semitones_above(self.tuning.open(string));
        (first..=self.max_fret).step_by(12).collect()
    }

    /// Lowest fret at or above `min_fret` on `string` that sounds `pc`.
    pub fn lowest_fret(&self, string: usize, pc: PitchClass, min_fret: u8) -> Result<u8> {
        self.frets_of(string, pc)
            .into_iter()
            .find(|&f| f >= min_fret)
            .ok_or(FretwiseError::NoteNotOnFretboard {
                string,
                pitch_class: pc.value(),
                max_fret: self.max_fret,
            })
    }

    /// Every position on the neck sounding `pc`, string by string.
    pub fn positions_of(&self, pc: PitchClass) -> Vec<FretPosition> {
        (0..self.string_count())
            .flat_map(|string| {
                self.frets_of(string, pc)
                    .into_iter()
                    .map(move |fret| FretPosition { string, fret, pitch_class: pc })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tuning_pitches() {
        let board = Fretboard::default();
        assert_eq!(board.pitch_at(0, 0).value(), 4);
        assert_eq!(board.pitch_at(0, 5), board.pitch_at(1, 0));
        assert_eq!(board.pitch_at(3, 4), board.pitch_at(4, 0));
        assert_eq!(board.pitch_at(5, 12), board.pitch_at(0, 0));
        assert_eq!(board.pitch_at(1, 3).sharp_name(), "C");
    }

    #[test]
    fn test_frets_of() {
        let board = Fretboard::new(Tuning::standard(), 20);
        let c = PitchClass::new(0);
        assert_eq!(board.frets_of(0, c), vec![8, 20]);
        assert_eq!(board.frets_of(4, c), vec![1, 13]);
        assert_eq!(board.frets_of(5, PitchClass::new(4)), vec![0, 12]);
    }

    #[test]
    fn test_lowest_fret_bounds() {
        let board = Fretboard::new(Tuning::standard(), 12);
        let c = PitchClass::new(0);
        assert_eq!(board.lowest_fret(1, c, 0), Ok(3));
        assert_eq!(board.lowest_fret(1, c, 4), Err(FretwiseError::NoteNotOnFretboard {
            string: 1,
            pitch_class: 0,
            max_fret: 12,
        }));
    }

    #[test]
    fn test_positions_of_covers_every_string() {
        let board = Fretboard::new(Tuning::standard(), 11);
        let positions = board.positions_of(PitchClass::new(7));
        assert_eq!(positions.len(), 6);
        assert!(positions.iter().all(|p| board.pitch_at(p.string, p.fret).value() == 7));
    }

    #[test]
    fn test_tuning_from_names() {
        let drop_d = Tuning::from_names(&["D", "A", "D", "G", "B", "E"]).unwrap();
        assert_eq!(drop_d.open(0).value(), 2);
        assert_eq!(drop_d.string_name(3), "G");
        assert!(Tuning::from_names::<&str>(&[]).is_err());
        assert!(Tuning::from_names(&["E", "H"]).is_err());
        assert!(Tuning::standard().require_strings(6).is_ok());
        assert!(drop_d.require_strings(7).is_err());
    }
}
