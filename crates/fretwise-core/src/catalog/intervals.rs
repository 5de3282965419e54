//! Interval tokens such as `3m`, `5P` or `9M`

use crate::error::{FretwiseError, Result};

/// Semitones of the major/perfect interval for each simple degree 1..=7.
const DEGREE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalQuality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

impl IntervalQuality {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'P' => Some(Self::Perfect),
            'M' => Some(Self::Major),
            'm' => Some(Self::Minor),
            'A' => Some(Self::Augmented),
            'd' => Some(Self::Diminished),
            _ => None,
        }
    }
}

/// Unisons, fourths and fifths (and their compounds) take perfect qualities.
fn is_perfect_degree(simple: usize) -> bool {
    matches!(simple, 1 | 4 | 5)
}

/// Parse `<degree><quality>` into a semitone count from the root.
///
/// Compound degrees add an octave per 7 steps, so `9M` is 14 and `13M` is 21.
pub fn interval_token_to_semitones(token: &str) -> Result<u8> {
    let invalid = || FretwiseError::InvalidInterval(token.to_string());
    let token = token.trim();

    let split = token.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
    let (digits, rest) = token.split_at(split);
    // Degrees past u8 range are invalid
    let degree: u8 = digits.parse().map_err(|_| invalid())?;

    let mut rest = rest.chars();
    let quality = rest.next().and_then(IntervalQuality::from_char).ok_or_else(invalid)?;
    if degree == 0 || rest.next().is_some() {
        return Err(invalid());
    }

    let simple = usize::from((degree - 1) % 7 + 1);
    let octaves = i32::from((degree - 1) / 7);

    let adjustment = match (is_perfect_degree(simple), quality) {
        (true, IntervalQuality::Perfect) => 0,
        (true, IntervalQuality::Augmented) => 1,
        (true, IntervalQuality::Diminished) => -1,
        (false, IntervalQuality::Major) => 0,
        (false, IntervalQuality::Minor) => -1,
        (false, IntervalQuality::Augmented) => 1,
        (false, IntervalQuality::Diminished) => -2,
        _ => return Err(invalid()),
    };

    let semitones = DEGREE_SEMITONES[simple - 1] + 12 * octaves + adjustment;
    u8::try_from(semitones).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_intervals() {
        assert_eq!(interval_token_to_semitones("1P"), Ok(0));
        assert_eq!(interval_token_to_semitones("3M"), Ok(4));
        assert_eq!(interval_token_to_semitones("3m"), Ok(3));
        assert_eq!(interval_token_to_semitones("4A"), Ok(6));
        assert_eq!(interval_token_to_semitones("5d"), Ok(6));
        assert_eq!(interval_token_to_semitones("5A"), Ok(8));
        assert_eq!(interval_token_to_semitones("7m"), Ok(10));
        assert_eq!(interval_token_to_semitones("7d"), Ok(9));
        assert_eq!(interval_token_to_semitones("8P"), Ok(12));
    }

    #[test]
    fn test_compound_intervals() {
        assert_eq!(interval_token_to_semitones("9M"), Ok(14));
        assert_eq!(interval_token_to_semitones("9m"), Ok(13));
        assert_eq!(interval_token_to_semitones("11P"), Ok(17));
        assert_eq!(interval_token_to_semitones("11A"), Ok(18));
        assert_eq!(interval_token_to_semitones("13M"), Ok(21));
        assert_eq!(interval_token_to_semitones("15P"), Ok(24));
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["", "M3", "3", "3P", "5M", "0P", "3mm", "1d", "x5P", "3X", "155P", "256P", "1000000000000P"] {
            assert_eq!(
                interval_token_to_semitones(bad),
                Err(FretwiseError::InvalidInterval(bad.to_string())),
                "{bad:?}"
            );
        }
    }
}
