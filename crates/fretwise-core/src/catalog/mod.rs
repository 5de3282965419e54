//! Chord and scale formulas, alias resolution and interval tokens
//!
//! Formulas are semitone offsets from the root. Entries are `'static` tables
//! built at compile time, so the catalog is shared freely across threads.

mod chords;
mod intervals;
mod scales;

use serde::Serialize;

use crate::error::{FretwiseError, Result};
use crate::pitch::{to_pitch_class, PitchClass};

pub use chords::{chord_formula, chord_formulas, resolve_chord_id};
pub use intervals::{interval_token_to_semitones, IntervalQuality};
pub use scales::{resolve_scale_id, scale_formula, scale_formulas, DiatonicMode};

/// A named list of semitone offsets from a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Formula {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub semitones: &'static [u8],
}

impl Formula {
    /// Pitch classes of this formula built on `root`, in formula order.
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.semitones.iter().map(|&s| root.transpose(s as i32)).collect()
    }
}

/// Look `id` up in `table`, exactly first, then through `aliases`, then
/// case-insensitively for word-like ids such as "Major" or "Dominant".
fn resolve<'a>(
    id: &str,
    table: &'a [Formula],
    aliases: &[(&str, &'static str)],
) -> Option<&'a Formula> {
    let id = id.trim();
    let by_id = |target: &str| table.iter().find(|f| f.id == target);

    if let Some(formula) = by_id(id) {
        return Some(formula);
    }
    if let Some((_, target)) = aliases.iter().find(|(alias, _)| *alias == id) {
        return by_id(target);
    }

    let wordy = id.len() > 2 && id.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if !wordy {
        return None;
    }
    if let Some(formula) = table.iter().find(|f| f.id.eq_ignore_ascii_case(id)) {
        return Some(formula);
    }
    aliases
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(id))
        .and_then(|(_, target)| by_id(target))
}

/// Pitch classes of chord `chord_id` rooted at `root`, e.g. `build_chord("F", "major")`.
pub fn build_chord(root: &str, chord_id: &str) -> Result<Vec<PitchClass>> {
    let root = to_pitch_class(root)?;
    let formula = chord_formula(chord_id)
        .ok_or_else(|| FretwiseError::UnknownFormula(chord_id.to_string()))?;
    Ok(formula.pitch_classes(root))
}

/// Pitch classes of scale `scale_id` rooted at `root`.
pub fn build_scale(root: &str, scale_id: &str) -> Result<Vec<PitchClass>> {
    let root = to_pitch_class(root)?;
    let formula = scale_formula(scale_id)
        .ok_or_else(|| FretwiseError::UnknownFormula(scale_id.to_string()))?;
    Ok(formula.pitch_classes(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pcs: Vec<PitchClass>) -> Vec<u8> {
        pcs.into_iter().map(PitchClass::value).collect()
    }

    #[test]
    fn test_build_chord() {
        assert_eq!(values(build_chord("F", "major").unwrap()), vec![5, 9, 0]);
        assert_eq!(values(build_chord("F", "minor").unwrap()), vec![5, 8, 0]);
        assert_eq!(values(build_chord("G", "dom").unwrap()), vec![7, 11, 2, 5]);
        assert_eq!(values(build_chord("B", "half-diminished").unwrap()), vec![11, 2, 5, 9]);
    }

    #[test]
    fn test_build_chord_errors() {
        assert_eq!(
            build_chord("F", "nope"),
            Err(FretwiseError::UnknownFormula("nope".into()))
        );
        assert_eq!(
            build_chord("H", "major"),
            Err(FretwiseError::UnknownNote("H".into()))
        );
    }

    #[test]
    fn test_build_scale() {
        assert_eq!(values(build_scale("A", "minor").unwrap()), vec![9, 11, 0, 2, 4, 5, 7]);
        assert_eq!(values(build_scale("E", "blues").unwrap()), vec![4, 7, 9, 10, 11, 2]);
        assert!(build_scale("C", "bebop-ultra").is_err());
    }

    #[test]
    fn test_word_aliases_ignore_case() {
        assert_eq!(chord_formula("Major").map(|f| f.id), Some("major"));
        assert_eq!(chord_formula("Dominant").map(|f| f.id), Some("7"));
        assert_eq!(scale_formula("Dorian").map(|f| f.id), Some("dorian"));
        // Case carries meaning for short symbols
        assert_eq!(chord_formula("M7").map(|f| f.id), Some("maj7"));
        assert_eq!(chord_formula("m7").map(|f| f.id), Some("m7"));
    }
}
