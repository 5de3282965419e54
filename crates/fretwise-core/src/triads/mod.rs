//! Triad voicings across overlapping three-string groups
//!
//! For every group of three adjacent strings the engine enumerates all
//! close-stretch voicings of a triad, links voicings that share frets on the
//! two strings adjacent groups have in common, and picks four positions per
//! group that climb the neck while cycling root → first → second inversion.

mod chain;
mod enumerate;
mod select;

#[cfg(test)]
mod fixtures;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::chord_formula;
use crate::error::{FretwiseError, Result};
use crate::fretboard::{Fretboard, Tuning};
use crate::pitch::{normalize_major_key_name, to_display_name, to_pitch_class, PitchClass};

/// Number of positions selected per string group.
pub const POSITIONS_PER_GROUP: usize = 4;

/// Which chord tone sounds on the lowest string of a voicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inversion {
    Root,
    First,
    Second,
}

impl Inversion {
    pub const CYCLE: [Inversion; 3] = [Self::Root, Self::First, Self::Second];

    /// Inversion for a bass note that is chord tone `index` (0 = root, 1 = third, 2 = fifth).
    pub fn from_chord_tone(index: usize) -> Option<Self> {
        Self::CYCLE.get(index).copied()
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Move `steps` along the root → first → second cycle; negative steps walk backwards.
    pub fn step(self, steps: i32) -> Self {
        Self::CYCLE[(self.index() as i32 + steps).rem_euclid(3) as usize]
    }

    pub fn next(self) -> Self {
        self.step(1)
    }

    pub fn previous(self) -> Self {
        self.step(-1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

/// True if `sequence` is consecutive terms of the inversion cycle, in either direction.
pub fn is_inversion_cycle(sequence: &[Inversion]) -> bool {
    [1, -1].into_iter().any(|direction| {
        sequence.windows(2).all(|pair| pair[1] == pair[0].step(direction))
    })
}

/// One playable triad shape on three adjacent strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriadVoicing {
    /// 0..=3, ascending along the neck
    pub position: usize,
    /// Low to high
    pub strings: [usize; 3],
    pub frets: [u8; 3],
    pub pitch_classes: [PitchClass; 3],
    pub inversion: Inversion,
    pub average_fret: f64,
}

impl TriadVoicing {
    pub fn min_fret(&self) -> u8 {
        self.frets.iter().copied().min().unwrap_or(0)
    }

    pub fn max_fret(&self) -> u8 {
        self.frets.iter().copied().max().unwrap_or(0)
    }

    pub fn stretch(&self) -> u8 {
        self.max_fret() - self.min_fret()
    }
}

/// The four selected voicings for one group of three strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringGroupTriads {
    pub strings: [usize; 3],
    pub string_names: [&'static str; 3],
    pub voicings: Vec<TriadVoicing>,
}

/// Triad voicings for one key across every string group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriadsData {
    pub key: &'static str,
    pub chord: &'static str,
    pub triad_notes: [&'static str; 3],
    pub groups: Vec<StringGroupTriads>,
}

/// Search bounds for the voicing enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriadOptions {
    /// Highest fret considered by the search
    pub max_fret: u8,
    /// Largest allowed distance between the lowest and highest fret
    pub max_stretch: u8,
    /// The top position prefers voicings that stay at or below this fret
    pub practical_max_fret: u8,
}

impl Default for TriadOptions {
    fn default() -> Self {
        Self {
            max_fret: 18,
            max_stretch: 5,
            practical_max_fret: 16,
        }
    }
}

/// Triad voicing engine bound to one tuning.
#[derive(Debug, Clone)]
pub struct TriadEngine {
    fretboard: Fretboard,
    options: TriadOptions,
}

impl Default for TriadEngine {
    fn default() -> Self {
        Self::new(Tuning::standard(), TriadOptions::default())
    }
}

impl TriadEngine {
    pub fn new(tuning: Tuning, options: TriadOptions) -> Self {
        let fretboard = Fretboard::new(tuning, options.max_fret);
        Self { fretboard, options }
    }

    pub fn options(&self) -> &TriadOptions {
        &self.options
    }

    /// Major triad voicings for `key`.
    pub fn generate(&self, key: &str) -> Result<TriadsData> {
        self.generate_chord(key, "major")
    }

    /// Voicings for any three-note chord formula rooted at `key`.
    pub fn generate_chord(&self, key: &str, chord_id: &str) -> Result<TriadsData> {
        self.fretboard.tuning().require_strings(3)?;

        let key_name = normalize_major_key_name(key)?;
        let (chord, triad) = triad_pitch_classes(key, chord_id)?;

        let string_sets: Vec<[usize; 3]> = (0..self.fretboard.string_count() - 2)
            .map(|low| [low, low + 1, low + 2])
            .collect();

        let candidates = string_sets
            .iter()
            .map(|&strings| {
                let voicings = enumerate::enumerate_group(&self.fretboard, strings, &triad, &self.options)?;
                if voicings.is_empty() {
                    return Err(FretwiseError::NoVoicings(strings));
                }
                Ok(voicings)
            })
            .collect::<Result<Vec<_>>>()?;

        let chains = chain::complete_chains(&candidates);
        debug!(
            "{key_name} {chord}: {} candidate voicings, {} complete chains",
            candidates.iter().map(Vec::len).sum::<usize>(),
            chains.len()
        );

        let selected: Vec<Vec<TriadVoicing>> = match select::select_from_chains(&chains, &self.options) {
            Some(picked) => (0..candidates.len())
                .map(|group| picked.iter().map(|c| c.voicings[group].clone()).collect())
                .collect(),
            None => {
                warn!("{key_name} {chord}: chained selection failed, selecting per string group");
                candidates
                    .iter()
                    .map(|voicings| select::select_per_group(voicings, &self.options))
                    .collect()
            }
        };

        let groups = string_sets
            .iter()
            .zip(selected)
            .map(|(&strings, mut voicings)| {
                for (position, voicing) in voicings.iter_mut().enumerate() {
                    voicing.position = position;
                }
                StringGroupTriads {
                    strings,
                    string_names: strings.map(|s| self.fretboard.tuning().string_name(s)),
                    voicings,
                }
            })
            .collect();

        Ok(TriadsData {
            key: key_name,
            chord,
            triad_notes: triad.map(|pc| to_display_name(pc, Some(key_name))),
            groups,
        })
    }
}

/// Resolve `chord_id` and build its three distinct pitch classes on `root`.
fn triad_pitch_classes(root: &str, chord_id: &str) -> Result<(&'static str, [PitchClass; 3])> {
    let root = to_pitch_class(root)?;
    let formula = chord_formula(chord_id)
        .ok_or_else(|| FretwiseError::UnknownFormula(chord_id.to_string()))?;

    let not_a_triad = || FretwiseError::NotATriad(formula.id.to_string());
    let tones: [PitchClass; 3] = formula
        .pitch_classes(root)
        .try_into()
        .map_err(|_| not_a_triad())?;
    if tones[0] == tones[1] || tones[1] == tones[2] || tones[0] == tones[2] {
        return Err(not_a_triad());
    }
    Ok((formula.id, tones))
}

/// Major triad voicings for `key` on a standard-tuned guitar.
pub fn generate_triads_data(key: &str) -> Result<TriadsData> {
    TriadEngine::default().generate(key)
}
