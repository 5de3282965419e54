//! Command line interface for the fretwise pattern engine

use clap::{Parser, Subcommand};
use fretwise_core::{ScaleFamily, TonalCenter};

/// Triad voicings, scale boxes and chord names for fretted instruments
#[derive(Parser, Debug)]
#[command(name = "fretwise", author, version, about, long_about = None)]
pub struct Cli {
    /// Print JSON instead of diagrams
    #[arg(long, global = true)]
    pub json: bool,

    /// Open strings low to high, e.g. "D A D G B E" (overrides config)
    #[arg(long, global = true)]
    pub tuning: Option<String>,

    /// Highest fret searched for triad voicings (overrides config)
    #[arg(long, global = true)]
    pub max_fret: Option<u8>,

    /// Add the experimental sixth blues box
    #[arg(long, global = true)]
    pub experimental: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Four inversion-cycling triad positions per string group
    Triads(TriadsCommand),

    /// Scale box shapes for a key
    Boxes(BoxesCommand),

    /// Notes of a chord, or the chord catalog
    Chord(FormulaCommand),

    /// Notes of a scale, or the scale catalog
    Scale(FormulaCommand),

    /// Semitone counts of interval tokens such as 3m or 9M
    Interval(IntervalCommand),

    /// Render a roman numeral progression in a key
    Progression(ProgressionCommand),

    /// Key signature, relative minor and scale of a major key
    Key(KeyCommand),

    /// Show or create the config file
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct TriadsCommand {
    /// Key, in either spelling (C#, Db, E♭)
    pub key: String,

    /// Three-note chord to voice (major, minor, dim, aug, sus2, sus4)
    #[arg(short, long, default_value = "major")]
    pub chord: String,
}

#[derive(Parser, Debug)]
pub struct BoxesCommand {
    /// Key; the tonal center for pentatonic and blues
    pub key: String,

    /// Scale family (major, pentatonic, blues)
    #[arg(short, long, default_value = "major")]
    pub family: ScaleFamily,

    /// Order boxes by neck position instead of shape number
    #[arg(long)]
    pub display_order: bool,

    /// Read the key as a minor pentatonic root or as a major key (overrides config)
    #[arg(short, long)]
    pub tonal_center: Option<TonalCenter>,
}

#[derive(Parser, Debug)]
pub struct FormulaCommand {
    /// Root note
    #[arg(required_unless_present = "list")]
    pub root: Option<String>,

    /// Formula id or alias
    #[arg(default_value = "major")]
    pub formula: String,

    /// List the catalog instead
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Parser, Debug)]
pub struct IntervalCommand {
    /// Tokens of the form <degree><quality>
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ProgressionCommand {
    pub key: String,

    /// Space-separated numerals, e.g. "I7 IV7 | V7 IV7 I7"
    pub progression: String,
}

#[derive(Parser, Debug)]
pub struct KeyCommand {
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Split a tuning given as "E A D G B E", "E,A,D,G,B,E", "EADGBE" or "eadgbe".
pub fn parse_tuning(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.contains(|c: char| c == ',' || c.is_whitespace()) {
        return text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    // Compact form: a new note starts at every uppercase letter. An all-lowercase
    // tuning starts one at every letter a-g instead, so "Eb" keeps its flat.
    let lowercase = !text.chars().any(|c| c.is_ascii_uppercase());
    let starts_note = |c: char| c.is_ascii_uppercase() || (lowercase && matches!(c, 'a'..='g'));

    let mut notes: Vec<String> = Vec::new();
    for c in text.chars() {
        match notes.last_mut() {
            Some(note) if !starts_note(c) => note.push(c),
            _ => notes.push(c.to_ascii_uppercase().to_string()),
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tuning() {
        assert_eq!(parse_tuning("D A D G B E"), vec!["D", "A", "D", "G", "B", "E"]);
        assert_eq!(parse_tuning("Eb,Ab,Db,Gb,Bb,Eb")[1], "Ab");
        assert_eq!(parse_tuning("DADGBE").len(), 6);
        assert_eq!(parse_tuning("EbAbDbGbBbEb"), vec!["Eb", "Ab", "Db", "Gb", "Bb", "Eb"]);
    }

    #[test]
    fn test_parse_lowercase_tuning() {
        assert_eq!(parse_tuning("eadgbe"), vec!["E", "A", "D", "G", "B", "E"]);
        assert_eq!(parse_tuning("dadgad"), vec!["D", "A", "D", "G", "A", "D"]);
        assert_eq!(parse_tuning("c#f#beg#c#"), vec!["C#", "F#", "B", "E", "G#", "C#"]);
        // With any uppercase letter a lowercase b is a flat
        assert_eq!(parse_tuning("DbAbDbGbBbEb")[0], "Db");
    }

    #[test]
    fn test_boxes_arguments() {
        let cli = Cli::parse_from([
            "fretwise",
            "boxes",
            "A",
            "-f",
            "blues",
            "--display-order",
            "--experimental",
            "--tonal-center",
            "major",
        ]);
        assert!(cli.experimental);
        match cli.command {
            Commands::Boxes(cmd) => {
                assert_eq!(cmd.key, "A");
                assert_eq!(cmd.family, ScaleFamily::Blues);
                assert!(cmd.display_order);
                assert_eq!(cmd.tonal_center, Some(TonalCenter::Major));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_chord_list_needs_no_root() {
        let cli = Cli::parse_from(["fretwise", "chord", "--list"]);
        assert!(matches!(cli.command, Commands::Chord(FormulaCommand { list: true, root: None, .. })));
        assert!(Cli::try_parse_from(["fretwise", "chord"]).is_err());
    }
}
