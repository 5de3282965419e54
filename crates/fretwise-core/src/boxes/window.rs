//! The seven-step string-crossing window behind the diatonic boxes

use crate::catalog::DiatonicMode;
use crate::fretboard::Tuning;
use crate::pitch::PitchClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Whole,
    Half,
}

impl Step {
    fn semitones(self) -> u8 {
        match self {
            Step::Whole => 2,
            Step::Half => 1,
        }
    }
}

/// Step pattern of the major scale, starting on the tonic.
const BASE: [Step; 7] = [
    Step::Whole,
    Step::Whole,
    Step::Half,
    Step::Whole,
    Step::Whole,
    Step::Whole,
    Step::Half,
];

/// Interval between neighbouring strings that needs no crossing correction.
const FOURTH: i16 = 5;

/// The base step cycle rotated to start on one mode's root.
///
/// A box is a continuous run of scale tones laid across the strings. Where a
/// run leaves one string and picks up on the next, the next string's first
/// fret moves relative to this string's first fret by two terms:
///
/// * the steps spent on this string, less a fourth: `+1` when three notes
///   climb three whole steps, `0` when a half step is among them
/// * a fourth less the interval between the two strings: `+1` across the
///   major third between G and B in standard tuning, `0` across fourths
///
/// Walking toward lower strings applies the same offsets with the sign flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCrossingWindow {
    root: PitchClass,
    steps: [Step; 7],
}

impl StringCrossingWindow {
    /// Window for `mode` of the major scale on `tonic`.
    pub fn new(tonic: PitchClass, mode: DiatonicMode) -> Self {
        let mut steps = BASE;
        steps.rotate_left(mode.degree());
        Self {
            root: tonic.transpose(mode.offset_from_tonic() as i32),
            steps,
        }
    }

    /// Mode root this window is rotated to.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Zero-based degree of `pc` within the mode, if it is a scale tone.
    pub fn degree_of(&self, pc: PitchClass) -> Option<usize> {
        let target = pc.semitones_above(self.root);
        let mut offset = 0;
        for (degree, step) in self.steps.iter().enumerate() {
            if offset == target {
                return Some(degree);
            }
            offset += step.semitones();
        }
        None
    }

    fn climb(&self, degree: usize, count: usize) -> i16 {
        (0..count)
            .map(|i| self.steps[(degree + i) % self.steps.len()].semitones() as i16)
            .sum()
    }

    /// Fret offset from the first note on `string` to the first note on the
    /// string above, when `string` carries `count` notes starting on `degree`.
    pub fn crossing_offset(&self, tuning: &Tuning, string: usize, degree: usize, count: usize) -> i16 {
        let gap = tuning.open(string + 1).semitones_above(tuning.open(string)) as i16;
        (self.climb(degree, count) - FOURTH) + (FOURTH - gap)
    }

    /// Lay out a continuous run with `counts[s]` notes on string `s`,
    /// anchored so that `seed_string` starts on `seed_fret`.
    ///
    /// `None` when the seed is not a scale tone or the run would reach
    /// below the nut.
    pub fn lay_out(
        &self,
        tuning: &Tuning,
        counts: &[usize],
        seed_string: usize,
        seed_fret: u8,
    ) -> Option<Vec<Vec<u8>>> {
        if seed_string >= counts.len() || counts.len() > tuning.string_count() {
            return None;
        }
        let len = self.steps.len();
        let seed_degree = self.degree_of(tuning.open(seed_string).transpose(seed_fret as i32))?;

        // (first fret, degree of the first note) per string
        let mut firsts = vec![(0i16, 0usize); counts.len()];
        firsts[seed_string] = (seed_fret as i16, seed_degree);

        for s in seed_string..counts.len().saturating_sub(1) {
            let (fret, degree) = firsts[s];
            firsts[s + 1] = (
                fret + self.crossing_offset(tuning, s, degree, counts[s]),
                (degree + counts[s]) % len,
            );
        }
        for s in (0..seed_string).rev() {
            let (fret, degree) = firsts[s + 1];
            let degree = (degree + len - counts[s] % len) % len;
            firsts[s] = (fret - self.crossing_offset(tuning, s, degree, counts[s]), degree);
        }

        firsts
            .iter()
            .zip(counts)
            .map(|(&(fret, degree), &count)| self.run(fret, degree, count))
            .collect()
    }

    /// `count` consecutive scale frets on one string from `first`.
    fn run(&self, first: i16, degree: usize, count: usize) -> Option<Vec<u8>> {
        let mut fret = u8::try_from(first).ok()?;
        let mut degree = degree;
        let mut frets = Vec::with_capacity(count);
        for _ in 0..count {
            frets.push(fret);
            fret = fret.checked_add(self.steps[degree].semitones())?;
            degree = (degree + 1) % self.steps.len();
        }
        Some(frets)
    }
}
