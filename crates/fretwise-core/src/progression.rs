//! Roman numeral progressions rendered as chord names in a key

use tracing::warn;

use crate::catalog::scale_formula;
use crate::pitch::{to_display_name, to_pitch_class, PitchClass};

/// Longest numerals first so `VII` is not read as `V` followed by `II`.
const NUMERALS: [(&str, usize); 7] = [
    ("VII", 6),
    ("III", 2),
    ("VI", 5),
    ("IV", 3),
    ("II", 1),
    ("V", 4),
    ("I", 0),
];

/// Suffixes that already name a quality, so a lowercase numeral adds no `m`.
const QUALITY_PREFIXES: [&str; 4] = ["o", "°", "ø", "dim"];

/// Pieces a chord suffix is spelled with, besides digits. Longer pieces come
/// before their prefixes.
const SUFFIX_PIECES: &[&str] = &[
    "maj", "min", "dim", "aug", "sus", "add", "alt", "m", "M", "o", "°", "ø", "Δ", "+", "-", "b", "#", "♭",
    "♯", "(", ")", "/",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spelling {
    Key,
    Flat,
    Sharp,
}

struct Numeral<'a> {
    degree: usize,
    accidental: i32,
    minor: bool,
    spelling: Spelling,
    suffix: &'a str,
}

fn parse_numeral(token: &str) -> Option<Numeral<'_>> {
    let mut accidental = 0;
    let mut spelling = Spelling::Key;
    let mut rest = token;
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            Some('b' | '♭') => {
                accidental -= 1;
                spelling = Spelling::Flat;
            }
            Some('#' | '♯') => {
                accidental += 1;
                spelling = Spelling::Sharp;
            }
            _ => break,
        }
        rest = chars.as_str();
    }

    NUMERALS.iter().find_map(|&(upper, degree)| {
        if let Some(suffix) = rest.strip_prefix(upper).filter(|s| is_chord_suffix(s)) {
            return Some(Numeral { degree, accidental, minor: false, spelling, suffix });
        }
        let lower = upper.to_ascii_lowercase();
        rest.strip_prefix(lower.as_str())
            .filter(|s| is_chord_suffix(s))
            .map(|suffix| Numeral {
                degree,
                accidental,
                minor: true,
                spelling,
                suffix,
            })
    })
}

/// True for an empty suffix or one built from digits and chord symbols, so
/// words that merely start with a numeral ("Intro", "Verse") are left alone.
fn is_chord_suffix(suffix: &str) -> bool {
    let mut rest = suffix;
    while !rest.is_empty() {
        let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        rest = if after_digits.len() < rest.len() {
            after_digits
        } else {
            match SUFFIX_PIECES.iter().find_map(|piece| rest.strip_prefix(piece)) {
                Some(next) => next,
                None => return false,
            }
        };
    }
    true
}

fn render_token(token: &str, tonic: PitchClass, key: &str, major: &[u8]) -> Option<String> {
    let numeral = parse_numeral(token)?;
    let pc = tonic.transpose(major[numeral.degree] as i32 + numeral.accidental);
    let name = match numeral.spelling {
        Spelling::Key => to_display_name(pc, Some(key)),
        Spelling::Flat => pc.flat_name(),
        Spelling::Sharp => pc.sharp_name(),
    };

    let quality_given = QUALITY_PREFIXES.iter().any(|q| numeral.suffix.starts_with(q));
    let minor = if numeral.minor && !quality_given { "m" } else { "" };
    Some(format!("{name}{minor}{}", numeral.suffix))
}

/// Replace each numeral token in `progression` with its chord name in `key`.
///
/// Uppercase numerals are major, lowercase minor; `b`/`#` prefixes alter the
/// degree and pick that accidental for the spelling. Anything after the
/// numeral (`7`, `maj7`, `sus4`) is kept as written. Bar lines, whitespace,
/// words and other unrecognized tokens pass through unchanged, and so does the
/// whole input if `key` is not a note name.
pub fn render_roman_progression_to_chords(progression: &str, key: &str) -> String {
    let tonic = match to_pitch_class(key) {
        Ok(tonic) => tonic,
        Err(e) => {
            warn!("Cannot render progression: {e}");
            return progression.to_string();
        }
    };
    let Some(major) = scale_formula("major").map(|f| f.semitones) else {
        return progression.to_string();
    };

    let mut rendered = String::with_capacity(progression.len());
    let mut token_start = None;
    for (i, c) in progression.char_indices() {
        match (c.is_whitespace(), token_start) {
            (true, Some(start)) => {
                push_token(&mut rendered, &progression[start..i], tonic, key, major);
                token_start = None;
                rendered.push(c);
            }
            (true, None) => rendered.push(c),
            (false, None) => token_start = Some(i),
            (false, Some(_)) => {}
        }
    }
    if let Some(start) = token_start {
        push_token(&mut rendered, &progression[start..], tonic, key, major);
    }
    rendered
}

fn push_token(out: &mut String, token: &str, tonic: PitchClass, key: &str, major: &[u8]) {
    match render_token(token, tonic, key, major) {
        Some(chord) => out.push_str(&chord),
        None => out.push_str(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_bar_blues_in_e() {
        assert_eq!(
            render_roman_progression_to_chords("I7 I7 I7 I7 | IV7 IV7 I7 I7 | V7 IV7 I7 V7", "E"),
            "E7 E7 E7 E7 | A7 A7 E7 E7 | B7 A7 E7 B7"
        );
    }

    #[test]
    fn test_minor_numerals() {
        assert_eq!(render_roman_progression_to_chords("ii7 V7 Imaj7", "C"), "Dm7 G7 Cmaj7");
        assert_eq!(render_roman_progression_to_chords("I vi IV V", "G"), "G Em C D");
        assert_eq!(render_roman_progression_to_chords("viio7", "C"), "Bo7");
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(render_roman_progression_to_chords("I bVII IV I", "C"), "C Bb F C");
        assert_eq!(render_roman_progression_to_chords("#IV", "C"), "F#");
        assert_eq!(render_roman_progression_to_chords("bIII", "A"), "C");
    }

    #[test]
    fn test_key_spelling() {
        assert_eq!(render_roman_progression_to_chords("I IV V", "F"), "F Bb C");
        assert_eq!(render_roman_progression_to_chords("I IV V", "Db"), "Db Gb Ab");
        assert_eq!(render_roman_progression_to_chords("I IV V", "C#"), "Db Gb Ab");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(render_roman_progression_to_chords("  I  |\tV  ", "C"), "  C  |\tG  ");
        assert_eq!(render_roman_progression_to_chords("N.C. I", "D"), "N.C. D");
        assert_eq!(render_roman_progression_to_chords("I IV V", "H"), "I IV V");
        assert_eq!(render_roman_progression_to_chords("", "C"), "");
    }

    #[test]
    fn test_words_starting_with_numerals_pass_through() {
        assert_eq!(
            render_roman_progression_to_chords("Intro: I IV | Verse: vi V", "E"),
            "Intro: E A | Verse: C#m B"
        );
        assert_eq!(render_roman_progression_to_chords("Vamp on IV", "G"), "Vamp on C");
    }

    #[test]
    fn test_extended_suffixes() {
        assert_eq!(
            render_roman_progression_to_chords("Imaj7 V7sus4 ii7b5 bVII(add9) IV/V", "C"),
            "Cmaj7 G7sus4 Dm7b5 Bb(add9) IV/V"
        );
        assert!(is_chord_suffix(""));
        assert!(is_chord_suffix("m7b5"));
        assert!(!is_chord_suffix("ntro:"));
    }
}
