//! Chord formulas

use super::{resolve, Formula};

const fn chord(id: &'static str, name: &'static str, symbol: &'static str, semitones: &'static [u8]) -> Formula {
    Formula { id, name, symbol, semitones }
}

static CHORDS: [Formula; 24] = [
    // Triads
    chord("major", "Major", "", &[0, 4, 7]),
    chord("minor", "Minor", "m", &[0, 3, 7]),
    chord("dim", "Diminished", "dim", &[0, 3, 6]),
    chord("aug", "Augmented", "aug", &[0, 4, 8]),
    chord("sus2", "Suspended 2nd", "sus2", &[0, 2, 7]),
    chord("sus4", "Suspended 4th", "sus4", &[0, 5, 7]),
    chord("5", "Power Chord", "5", &[0, 7]),
    // Sixths and sevenths
    chord("6", "Major 6th", "6", &[0, 4, 7, 9]),
    chord("m6", "Minor 6th", "m6", &[0, 3, 7, 9]),
    chord("7", "Dominant 7th", "7", &[0, 4, 7, 10]),
    chord("maj7", "Major 7th", "maj7", &[0, 4, 7, 11]),
    chord("m7", "Minor 7th", "m7", &[0, 3, 7, 10]),
    chord("m7b5", "Half-Diminished 7th", "m7b5", &[0, 3, 6, 10]),
    chord("dim7", "Diminished 7th", "dim7", &[0, 3, 6, 9]),
    chord("mMaj7", "Minor-Major 7th", "mMaj7", &[0, 3, 7, 11]),
    chord("7sus4", "Dominant 7th Suspended 4th", "7sus4", &[0, 5, 7, 10]),
    // Extensions (offsets past 12 are the compound intervals)
    chord("add9", "Added 9th", "add9", &[0, 4, 7, 14]),
    chord("9", "Dominant 9th", "9", &[0, 4, 7, 10, 14]),
    chord("maj9", "Major 9th", "maj9", &[0, 4, 7, 11, 14]),
    chord("m9", "Minor 9th", "m9", &[0, 3, 7, 10, 14]),
    chord("7b9", "Dominant 7th Flat 9th", "7b9", &[0, 4, 7, 10, 13]),
    chord("7#9", "Dominant 7th Sharp 9th", "7#9", &[0, 4, 7, 10, 15]),
    chord("11", "Dominant 11th", "11", &[0, 4, 7, 10, 14, 17]),
    chord("13", "Dominant 13th", "13", &[0, 4, 7, 10, 14, 21]),
];

static CHORD_ALIASES: [(&str, &str); 22] = [
    ("maj", "major"),
    ("M", "major"),
    ("min", "minor"),
    ("m", "minor"),
    ("-", "minor"),
    ("diminished", "dim"),
    ("°", "dim"),
    ("augmented", "aug"),
    ("+", "aug"),
    ("power", "5"),
    ("dom", "7"),
    ("dom7", "7"),
    ("dominant", "7"),
    ("M7", "maj7"),
    ("Δ", "maj7"),
    ("Δ7", "maj7"),
    ("min7", "m7"),
    ("-7", "m7"),
    ("half-diminished", "m7b5"),
    ("ø", "m7b5"),
    ("mM7", "mMaj7"),
    ("minMaj7", "mMaj7"),
];

/// Look up a chord formula by id or alias.
pub fn chord_formula(id: &str) -> Option<&'static Formula> {
    resolve(id, &CHORDS, &CHORD_ALIASES)
}

/// Canonical id for `id`, if it names a chord.
pub fn resolve_chord_id(id: &str) -> Option<&'static str> {
    chord_formula(id).map(|f| f.id)
}

/// Every chord in the catalog, in listing order.
pub fn chord_formulas() -> &'static [Formula] {
    &CHORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::interval_token_to_semitones;

    #[test]
    fn test_aliases_resolve_to_catalog_entries() {
        for (alias, target) in CHORD_ALIASES.iter() {
            assert_eq!(resolve_chord_id(alias), Some(*target), "alias {alias}");
        }
        assert_eq!(resolve_chord_id("mM7"), Some("mMaj7"));
        assert_eq!(resolve_chord_id("dom"), Some("7"));
        assert_eq!(resolve_chord_id("wat"), None);
    }

    #[test]
    fn test_formulas_are_well_formed() {
        for formula in chord_formulas() {
            assert_eq!(formula.semitones[0], 0, "{} must start on the root", formula.id);
            assert!(
                formula.semitones.windows(2).all(|w| w[0] < w[1]),
                "{} offsets must ascend",
                formula.id
            );
        }
        let mut ids: Vec<_> = chord_formulas().iter().map(|f| f.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), chord_formulas().len());
    }

    #[test]
    fn test_extensions_match_interval_tokens() {
        let expect = |id: &str, tokens: &[&str]| {
            let semitones: Vec<u8> = tokens
                .iter()
                .map(|t| interval_token_to_semitones(t).unwrap())
                .collect();
            assert_eq!(chord_formula(id).unwrap().semitones, semitones.as_slice(), "{id}");
        };
        expect("13", &["1P", "3M", "5P", "7m", "9M", "13M"]);
        expect("11", &["1P", "3M", "5P", "7m", "9M", "11P"]);
        expect("dim7", &["1P", "3m", "5d", "7d"]);
        expect("7#9", &["1P", "3M", "5P", "7m", "9A"]);
        expect("m7b5", &["1P", "3m", "5d", "7m"]);
    }
}
