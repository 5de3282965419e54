//! Minor pentatonic boxes and their blues variants

use super::{BoxShapePattern, ScaleFamily};
use crate::catalog::scale_formula;
use crate::error::{FretwiseError, Result};
use crate::fretboard::{FretPosition, Fretboard};
use crate::pitch::PitchClass;

pub(super) const PENTATONIC_BOXES: usize = 5;

/// Scale tones per string needed to lay out five chained boxes plus the bridge.
const RUN_LENGTH: usize = PENTATONIC_BOXES + 2;

fn formula_semitones(id: &str) -> Result<&'static [u8]> {
    scale_formula(id)
        .map(|f| f.semitones)
        .ok_or_else(|| FretwiseError::UnknownFormula(id.to_string()))
}

/// Semitones above the root of the tone the blues scale adds to the pentatonic.
fn blue_note_semitones() -> Result<u8> {
    let pentatonic = formula_semitones("minor-pentatonic")?;
    formula_semitones("blues")?
        .iter()
        .copied()
        .find(|s| !pentatonic.contains(s))
        .ok_or_else(|| FretwiseError::UnknownFormula("blues".to_string()))
}

/// Consecutive pentatonic frets on each string, from the tonic's fret on the
/// lowest string upward.
fn runs(board: &Fretboard, tonic: PitchClass) -> Result<Vec<Vec<u8>>> {
    let scale: Vec<PitchClass> = formula_semitones("minor-pentatonic")?
        .iter()
        .map(|&s| tonic.transpose(s as i32))
        .collect();
    let start = tonic.semitones_above(board.tuning().open(0));

    Ok((0..board.string_count())
        .map(|s| {
            (start..)
                .filter(|&f| scale.contains(&board.pitch_at(s, f)))
                .take(RUN_LENGTH)
                .collect()
        })
        .collect())
}

/// Five chained boxes; box `i` spans the i-th and (i+1)-th scale fret of every
/// string, so neighbouring boxes share a fret per string.
///
/// For [`ScaleFamily::Blues`] each box gains the flat fifth wherever it falls
/// inside the box's window, and `experimental` appends a sixth box that
/// bridges box 5 to the octave repeat of box 1.
pub(super) fn pentatonic_boxes(
    board: &Fretboard,
    tonic: PitchClass,
    family: ScaleFamily,
    experimental: bool,
) -> Result<Vec<BoxShapePattern>> {
    let runs = runs(board, tonic)?;

    let mut shapes: Vec<Vec<Vec<u8>>> = (0..PENTATONIC_BOXES)
        .map(|i| runs.iter().map(|run| vec![run[i], run[i + 1]]).collect())
        .collect();
    if family == ScaleFamily::Blues && experimental {
        let lower = board.string_count() / 2;
        shapes.push(
            runs.iter()
                .enumerate()
                .map(|(s, run)| {
                    let i = if s < lower { PENTATONIC_BOXES - 1 } else { PENTATONIC_BOXES };
                    vec![run[i], run[i + 1]]
                })
                .collect(),
        );
    }

    let blue_note = match family {
        ScaleFamily::Blues => Some(tonic.transpose(blue_note_semitones()? as i32)),
        _ => None,
    };

    Ok(shapes
        .into_iter()
        .enumerate()
        .map(|(i, mut strings)| {
            let blue_notes = match blue_note {
                Some(blue) => add_blue_notes(board, &mut strings, blue),
                None => Vec::new(),
            };
            BoxShapePattern::new(board, i + 1, family.label(), family, strings, tonic, blue_notes)
        })
        .collect())
}

/// Insert every fret sounding `blue` within the box's current fret span.
fn add_blue_notes(board: &Fretboard, strings: &mut [Vec<u8>], blue: PitchClass) -> Vec<FretPosition> {
    let all = strings.iter().flatten().copied();
    let (Some(start), Some(end)) = (all.clone().min(), all.max()) else {
        return Vec::new();
    };

    let mut positions = Vec::new();
    for (string, frets) in strings.iter_mut().enumerate() {
        for fret in start..=end {
            if board.pitch_at(string, fret) == blue {
                frets.push(fret);
                positions.push(board.position(string, fret));
            }
        }
        frets.sort_unstable();
    }
    positions
}
