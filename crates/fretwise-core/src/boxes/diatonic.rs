//! Seven mode boxes of the major scale

use tracing::debug;

use super::window::StringCrossingWindow;
use super::{BoxShapePattern, ScaleFamily, BOX_STRINGS};
use crate::catalog::DiatonicMode;
use crate::error::{FretwiseError, Result};
use crate::fretboard::{Fretboard, Tuning};
use crate::pitch::PitchClass;

/// Boxes at or past this number are kept out of open position.
const FIRST_LIFTED_BOX: u8 = 6;

/// Two-note string tried first for each mode box.
const PREFERRED_PAIR_STRING: [usize; 7] = [4, 3, 3, 4, 4, 4, 4];

/// Inner strings that may carry the two-note run. The outer strings keep three
/// notes so the high string mirrors the low one.
const PAIR_CANDIDATES: [usize; 4] = [4, 3, 2, 1];

/// How far from the window start the low string's first note may sit.
const SEED_REACH: u8 = 2;

/// Ionian through Locrian, one box each, with window starts two frets apart.
pub(super) fn diatonic_boxes(board: &Fretboard, tonic: PitchClass) -> Result<Vec<BoxShapePattern>> {
    let tuning = board.tuning();
    let mut first_start = tonic.semitones_above(tuning.open(0));
    if first_start + 2 * (FIRST_LIFTED_BOX - 1) < 12 {
        first_start += 12;
    }

    DiatonicMode::ALL
        .iter()
        .map(|&mode| {
            let start = first_start + 2 * mode.degree() as u8;
            let window = StringCrossingWindow::new(tonic, mode);
            let strings = lay_out_box(&window, tuning, mode.degree(), start).ok_or_else(|| {
                FretwiseError::InvalidTuning(format!("no {} box starts at fret {start}", mode.name()))
            })?;

            Ok(BoxShapePattern::new(
                board,
                mode.degree() + 1,
                mode.name(),
                ScaleFamily::Major,
                strings,
                window.root(),
                Vec::new(),
            ))
        })
        .collect()
}

fn note_counts(pair: usize) -> [usize; BOX_STRINGS] {
    let mut counts = [3; BOX_STRINGS];
    counts[pair] = 2;
    counts
}

/// The narrowest continuous run whose lowest fret is `start`.
///
/// The mode's preferred two-note string is tried first. Tunings with no such
/// run fall back to the preferred layout from the first scale tone at or
/// above `start`.
fn lay_out_box(
    window: &StringCrossingWindow,
    tuning: &Tuning,
    degree: usize,
    start: u8,
) -> Option<Vec<Vec<u8>>> {
    let preferred = PREFERRED_PAIR_STRING[degree];
    let pairs = std::iter::once(preferred).chain(PAIR_CANDIDATES.into_iter().filter(|&p| p != preferred));

    for pair in pairs {
        let counts = note_counts(pair);
        let best = (start.saturating_sub(SEED_REACH)..=start + SEED_REACH)
            .filter_map(|seed| window.lay_out(tuning, &counts, 0, seed))
            .filter(|strings| lowest(strings) == Some(start))
            .min_by_key(|strings| highest(strings));
        if let Some(strings) = best {
            if pair != preferred {
                debug!("Box {} moves its two-note run to string {pair}", degree + 1);
            }
            return Some(strings);
        }
    }

    debug!("Box {} has no run starting at fret {start}", degree + 1);
    (start..=start + 1).find_map(|seed| window.lay_out(tuning, &note_counts(preferred), 0, seed))
}

fn lowest(strings: &[Vec<u8>]) -> Option<u8> {
    strings.iter().flatten().copied().min()
}

fn highest(strings: &[Vec<u8>]) -> Option<u8> {
    strings.iter().flatten().copied().max()
}
