//! Left-to-right ordering of boxes for neck diagrams

use super::{BoxShapePattern, ScaleFamily};

/// Window start with pentatonic boxes folded back by whole octaves.
///
/// Pentatonic and blues boxes repeat every twelve frets, so a box that only
/// lands past the octave is shown where its lower repeat would sit.
fn neck_position(pattern: &BoxShapePattern, family: ScaleFamily) -> (u8, u8) {
    let fold = match family {
        ScaleFamily::Major => 0,
        ScaleFamily::Pentatonic | ScaleFamily::Blues => 12 * (pattern.window_start / 12),
    };
    (pattern.window_start - fold, pattern.window_end - fold)
}

/// `patterns` sorted by neck position, then window end, then shape number.
///
/// For pentatonic tonal centers whose box 1 sits high on the neck (A minor,
/// which C major shares) this starts the sequence from the higher-numbered
/// boxes: 4, 5, 1, 2, 3.
pub fn display_ordered_box_patterns(patterns: &[BoxShapePattern], family: ScaleFamily) -> Vec<BoxShapePattern> {
    let mut ordered = patterns.to_vec();
    ordered.sort_by_key(|p| {
        let (start, end) = neck_position(p, family);
        (start, end, p.shape_number)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{generate_box_shape_patterns, BoxOptions, TonalCenter};

    fn shuffled(key: &str, family: ScaleFamily, options: &BoxOptions) -> Vec<BoxShapePattern> {
        let mut patterns = generate_box_shape_patterns(key, family, options).unwrap();
        patterns.reverse();
        patterns.rotate_left(2);
        patterns
    }

    fn order(key: &str, family: ScaleFamily, options: &BoxOptions) -> Vec<usize> {
        display_ordered_box_patterns(&shuffled(key, family, options), family)
            .iter()
            .map(|p| p.shape_number)
            .collect()
    }

    #[test]
    fn test_pentatonic_wraps_from_higher_boxes() {
        let options = BoxOptions::default();
        assert_eq!(order("A", ScaleFamily::Pentatonic, &options), vec![4, 5, 1, 2, 3]);
        assert_eq!(order("C", ScaleFamily::Pentatonic, &options), vec![3, 4, 5, 1, 2]);
        assert_eq!(order("E", ScaleFamily::Pentatonic, &options), vec![1, 2, 3, 4, 5]);
        assert_eq!(order("G", ScaleFamily::Blues, &options), vec![5, 1, 2, 3, 4]);

        let experimental = BoxOptions {
            experimental_blues_box: true,
            ..BoxOptions::default()
        };
        assert_eq!(order("A", ScaleFamily::Blues, &experimental), vec![4, 5, 6, 1, 2, 3]);

        let major_center = BoxOptions {
            tonal_center: TonalCenter::Major,
            ..BoxOptions::default()
        };
        assert_eq!(order("C", ScaleFamily::Pentatonic, &major_center), vec![4, 5, 1, 2, 3]);
        assert_eq!(order("C", ScaleFamily::Blues, &major_center), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_ordered_by_folded_neck_position() {
        let options = BoxOptions::default();
        for key in ["C", "D", "F#", "A", "B"] {
            for family in [ScaleFamily::Major, ScaleFamily::Pentatonic, ScaleFamily::Blues] {
                let ordered = display_ordered_box_patterns(&shuffled(key, family, &options), family);
                let positions: Vec<(u8, u8)> = ordered.iter().map(|p| neck_position(p, family)).collect();
                assert!(positions.windows(2).all(|w| w[0] <= w[1]), "{key} {family:?}: {positions:?}");
            }
        }
    }

    #[test]
    fn test_major_boxes_keep_shape_order_in_c() {
        let options = BoxOptions::default();
        assert_eq!(order("C", ScaleFamily::Major, &options), vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
