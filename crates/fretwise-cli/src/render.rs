//! Plain-text fretboard diagrams

use std::fmt::Write;

use fretwise_core::{BoxShapePattern, StringGroupTriads, Tuning, TriadsData};

const CELL: usize = 4;

/// Draw a fretboard section from `first` to `last`, high string on top.
///
/// `mark` names the symbol shown at a (string, fret), if any.
pub fn fret_grid(tuning: &Tuning, first: u8, last: u8, mark: impl Fn(usize, u8) -> Option<char>) -> String {
    let mut out = String::new();

    out.push_str("    ");
    for fret in first..=last {
        let _ = write!(out, "{fret:^CELL$}");
    }
    out.push('\n');

    for string in (0..tuning.string_count()).rev() {
        let name = tuning.string_name(string);
        let _ = write!(out, "{name:>2} |");
        for fret in first..=last {
            let symbol = mark(string, fret).unwrap_or('-');
            let _ = write!(out, "-{symbol}-|");
        }
        out.push('\n');
    }
    out
}

fn group_diagram(tuning: &Tuning, group: &StringGroupTriads) -> String {
    let frets = || group.voicings.iter().flat_map(|v| v.frets);
    let first = frets().min().unwrap_or(0);
    let last = frets().max().unwrap_or(0);

    fret_grid(tuning, first, last, |string, fret| {
        let slot = group.strings.iter().position(|&s| s == string)?;
        let mut hits = group.voicings.iter().filter(|v| v.frets[slot] == fret);
        let hit = hits.next()?;
        if hits.next().is_some() {
            return Some('*');
        }
        char::from_digit(hit.position as u32, 10)
    })
}

pub fn triads_text(data: &TriadsData, tuning: &Tuning) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} triads: {}", data.key, data.chord, data.triad_notes.join(" "));

    for group in &data.groups {
        let _ = writeln!(out, "\nStrings {}", group.string_names.join(" "));
        for voicing in &group.voicings {
            let frets: Vec<String> = voicing.frets.iter().map(u8::to_string).collect();
            let _ = writeln!(
                out,
                "  {}  {:<6}  frets {:<9} avg {:.2}",
                voicing.position,
                voicing.inversion.label(),
                frets.join("-"),
                voicing.average_fret
            );
        }
        out.push_str(&group_diagram(tuning, group));
    }
    out
}

pub fn box_text(pattern: &BoxShapePattern, tuning: &Tuning) -> String {
    let mut out = format!(
        "{}  (frets {}-{})\n",
        pattern.label, pattern.window_start, pattern.window_end
    );
    out.push_str(&fret_grid(tuning, pattern.window_start, pattern.window_end, |string, fret| {
        if !pattern.strings.get(string)?.contains(&fret) {
            None
        } else if pattern.is_root(string, fret) {
            Some('R')
        } else if pattern.is_blue_note(string, fret) {
            Some('b')
        } else {
            Some('o')
        }
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretwise_core::{generate_box_shape_patterns, generate_triads_data, BoxOptions, ScaleFamily};

    #[test]
    fn test_grid_layout() {
        let grid = fret_grid(&Tuning::standard(), 3, 4, |s, f| (s == 0 && f == 3).then_some('R'));
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], " E |---|---|");
        assert_eq!(lines[6], " E |-R-|---|");
    }

    #[test]
    fn test_blues_box_marks() {
        let patterns = generate_box_shape_patterns("A", ScaleFamily::Blues, &BoxOptions::default()).unwrap();
        let text = box_text(&patterns[0], &Tuning::standard());
        assert!(text.starts_with("Box 1 · Blues  (frets 5-8)"));
        let a_string = text.lines().find(|l| l.starts_with(" A |")).unwrap();
        assert_eq!(a_string, " A |-o-|-b-|-o-|---|");
    }

    #[test]
    fn test_triads_text_lists_every_position() {
        let data = generate_triads_data("C").unwrap();
        let text = triads_text(&data, &Tuning::standard());
        assert!(text.starts_with("C major triads: C E G"));
        assert_eq!(text.matches("Strings ").count(), 4);
        assert!(text.contains("  0  second  frets 3-3-2"));
    }
}
