//! fretwise-core: Fretboard pattern engine for triads, scale boxes and progressions

pub mod boxes;
pub mod catalog;
mod error;
pub mod fretboard;
pub mod pitch;
pub mod progression;
pub mod triads;

pub use boxes::{
    display_ordered_box_patterns, generate_box_shape_patterns,
    BoxGenerator, BoxOptions, BoxShapePattern, ScaleFamily, TonalCenter,
};
pub use catalog::{
    build_chord, build_scale, chord_formula, interval_token_to_semitones,
    scale_formula, DiatonicMode, Formula,
};
pub use error::{FretwiseError, Result};
pub use fretboard::{FretPosition, Fretboard, Tuning, STANDARD_TUNING};
pub use pitch::{
    is_flat_key, normalize_major_key_name, relative_minor, to_display_name,
    to_pitch_class, PitchClass, SHARP_NAMES,
};
pub use progression::render_roman_progression_to_chords;
pub use triads::{
    generate_triads_data, Inversion, StringGroupTriads, TriadEngine,
    TriadOptions, TriadVoicing, TriadsData,
};
