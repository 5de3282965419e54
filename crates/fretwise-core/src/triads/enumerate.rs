//! Exhaustive voicing search on one string group

use super::{Inversion, TriadOptions, TriadVoicing};
use crate::error::{FretwiseError, Result};
use crate::fretboard::Fretboard;
use crate::pitch::PitchClass;

/// Every fret combination on `strings` that sounds exactly `triad` within the
/// stretch limit, sorted by average fret and then by frets.
pub(super) fn enumerate_group(
    board: &Fretboard,
    strings: [usize; 3],
    triad: &[PitchClass; 3],
    options: &TriadOptions,
) -> Result<Vec<TriadVoicing>> {
    let mut wanted = *triad;
    wanted.sort();

    let mut voicings = Vec::new();
    for f0 in 0..=options.max_fret {
        for f1 in 0..=options.max_fret {
            for f2 in 0..=options.max_fret {
                let frets = [f0, f1, f2];
                let (lo, hi) = (f0.min(f1).min(f2), f0.max(f1).max(f2));
                if hi - lo > options.max_stretch {
                    continue;
                }

                let pitch_classes = [
                    board.pitch_at(strings[0], f0),
                    board.pitch_at(strings[1], f1),
                    board.pitch_at(strings[2], f2),
                ];
                let mut sounding = pitch_classes;
                sounding.sort();
                if sounding != wanted {
                    continue;
                }

                let inversion = classify(triad, pitch_classes[0])?;
                voicings.push(TriadVoicing {
                    position: 0,
                    strings,
                    frets,
                    pitch_classes,
                    inversion,
                    average_fret: (f0 as f64 + f1 as f64 + f2 as f64) / 3.0,
                });
            }
        }
    }

    voicings.sort_by(|a, b| {
        a.average_fret
            .total_cmp(&b.average_fret)
            .then_with(|| a.frets.cmp(&b.frets))
    });
    Ok(voicings)
}

/// Inversion named by the chord tone in the bass.
fn classify(triad: &[PitchClass; 3], bass: PitchClass) -> Result<Inversion> {
    let inversion = triad
        .iter()
        .position(|&tone| tone == bass)
        .and_then(Inversion::from_chord_tone);
    debug_assert!(inversion.is_some(), "bass {bass} is not a tone of {triad:?}");
    inversion.ok_or_else(|| {
        FretwiseError::EngineInvariantViolation(format!("bass {bass} is not a tone of {triad:?}"))
    })
}
