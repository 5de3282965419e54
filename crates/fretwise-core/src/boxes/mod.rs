//! Scale box shapes: seven diatonic mode boxes, five pentatonic boxes and
//! their blues variants.

mod diatonic;
mod display;
mod pentatonic;
mod window;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FretwiseError, Result};
use crate::fretboard::{FretPosition, Fretboard, Tuning};
use crate::pitch::{to_pitch_class, PitchClass};

pub use display::display_ordered_box_patterns;
pub use window::StringCrossingWindow;

/// Strings every box is laid out across.
pub const BOX_STRINGS: usize = 6;

// ============================================================================
// Families and options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFamily {
    /// The major scale, expanded into its seven modes
    Major,
    /// Minor pentatonic on the key's tonal center
    Pentatonic,
    /// Minor pentatonic plus the flat fifth
    Blues,
}

impl ScaleFamily {
    pub const ALL: [ScaleFamily; 3] = [Self::Major, Self::Pentatonic, Self::Blues];

    pub fn label(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Pentatonic => "Minor Pentatonic",
            Self::Blues => "Blues",
        }
    }
}

impl fmt::Display for ScaleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScaleFamily {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "modes" | "diatonic" => Ok(Self::Major),
            "pentatonic" | "minor-pentatonic" | "pent" => Ok(Self::Pentatonic),
            "blues" => Ok(Self::Blues),
            _ => Err(FretwiseError::UnknownFormula(s.to_string())),
        }
    }
}

/// How a key names the root of the pentatonic and blues boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TonalCenter {
    /// The key is the minor pentatonic root: "A" gives A minor pentatonic
    #[default]
    Minor,
    /// The key is a major key, played from its relative minor: "C" gives A minor pentatonic
    Major,
}

impl TonalCenter {
    /// Minor pentatonic root for `key` under this tonal center.
    pub fn pentatonic_root(self, key: PitchClass) -> PitchClass {
        match self {
            Self::Minor => key,
            Self::Major => key.transpose(-3),
        }
    }
}

impl fmt::Display for TonalCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minor => "minor",
            Self::Major => "major",
        })
    }
}

impl FromStr for TonalCenter {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minor" | "min" => Ok(Self::Minor),
            "major" | "maj" => Ok(Self::Major),
            _ => Err(FretwiseError::UnknownFormula(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    /// Append the sixth bridging box to the blues family
    pub experimental_blues_box: bool,
    /// Only the pentatonic and blues families read this
    pub tonal_center: TonalCenter,
}

// ============================================================================
// Box patterns
// ============================================================================

/// One fingering position of a scale across all six strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxShapePattern {
    /// 1-based, in generation order
    pub shape_number: usize,
    /// Mode name for diatonic boxes, family label otherwise
    pub name: &'static str,
    pub family: ScaleFamily,
    /// Sorted frets per string, low string first
    pub strings: Vec<Vec<u8>>,
    pub window_start: u8,
    pub window_end: u8,
    pub root_positions: Vec<FretPosition>,
    /// Empty outside the blues family
    pub blue_note_positions: Vec<FretPosition>,
    pub shape_root: PitchClass,
    pub label: String,
}

impl BoxShapePattern {
    fn new(
        board: &Fretboard,
        shape_number: usize,
        name: &'static str,
        family: ScaleFamily,
        strings: Vec<Vec<u8>>,
        shape_root: PitchClass,
        blue_note_positions: Vec<FretPosition>,
    ) -> Self {
        let frets = || strings.iter().flatten().copied();
        let window_start = frets().min().unwrap_or(0);
        let window_end = frets().max().unwrap_or(0);

        let root_positions = strings
            .iter()
            .enumerate()
            .flat_map(|(string, frets)| frets.iter().map(move |&fret| board.position(string, fret)))
            .filter(|position| position.pitch_class == shape_root)
            .collect();

        Self {
            shape_number,
            name,
            family,
            label: format!("Box {shape_number} · {name}"),
            strings,
            window_start,
            window_end,
            root_positions,
            blue_note_positions,
            shape_root,
        }
    }

    /// Every position in the box, low string first.
    pub fn positions(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.strings
            .iter()
            .enumerate()
            .flat_map(|(string, frets)| frets.iter().map(move |&fret| (string, fret)))
    }

    pub fn is_root(&self, string: usize, fret: u8) -> bool {
        self.root_positions.iter().any(|p| p.string == string && p.fret == fret)
    }

    pub fn is_blue_note(&self, string: usize, fret: u8) -> bool {
        self.blue_note_positions.iter().any(|p| p.string == string && p.fret == fret)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Box shape generator bound to one six-string fretboard.
#[derive(Debug, Clone)]
pub struct BoxGenerator {
    fretboard: Fretboard,
    options: BoxOptions,
}

impl Default for BoxGenerator {
    fn default() -> Self {
        Self::new(Tuning::standard(), BoxOptions::default())
    }
}

impl BoxGenerator {
    pub fn new(tuning: Tuning, options: BoxOptions) -> Self {
        Self::with_fretboard(Fretboard::new(tuning, Fretboard::DEFAULT_MAX_FRET), options)
    }

    pub fn with_fretboard(fretboard: Fretboard, options: BoxOptions) -> Self {
        Self { fretboard, options }
    }

    pub fn fretboard(&self) -> &Fretboard {
        &self.fretboard
    }

    pub fn options(&self) -> &BoxOptions {
        &self.options
    }

    /// Boxes for `key` in shape-number order.
    pub fn generate(&self, key: &str, family: ScaleFamily) -> Result<Vec<BoxShapePattern>> {
        let strings = self.fretboard.string_count();
        if strings != BOX_STRINGS {
            return Err(FretwiseError::InvalidTuning(format!(
                "box shapes need {BOX_STRINGS} strings, tuning has {strings}"
            )));
        }
        let tonic = to_pitch_class(key)?;

        let patterns = match family {
            ScaleFamily::Major => diatonic::diatonic_boxes(&self.fretboard, tonic)?,
            ScaleFamily::Pentatonic | ScaleFamily::Blues => pentatonic::pentatonic_boxes(
                &self.fretboard,
                self.options.tonal_center.pentatonic_root(tonic),
                family,
                self.options.experimental_blues_box,
            )?,
        };
        debug!("{key} {family}: {} boxes", patterns.len());

        let max_fret = self.fretboard.max_fret();
        for pattern in patterns.iter().filter(|p| p.window_end > max_fret) {
            warn!(
                "{key} {} reaches fret {}, past the {max_fret}-fret board",
                pattern.label, pattern.window_end
            );
        }
        Ok(patterns)
    }
}

/// Boxes for `key` on a standard-tuned guitar, in shape-number order.
pub fn generate_box_shape_patterns(key: &str, family: ScaleFamily, options: &BoxOptions) -> Result<Vec<BoxShapePattern>> {
    BoxGenerator::new(Tuning::standard(), options.clone()).generate(key, family)
}
