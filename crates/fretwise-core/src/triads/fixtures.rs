//! Known-good major triad layouts in standard tuning

use super::{generate_triads_data, Inversion};
use super::Inversion::{First as Fi, Root as Ro, Second as Se};

type Group = [([u8; 3], Inversion); 4];

/// Groups listed low strings to high, positions ascending.
const C_MAJOR: [Group; 4] = [
    [([3, 3, 2], Se), ([8, 7, 5], Ro), ([12, 10, 10], Fi), ([15, 15, 14], Se)],
    [([3, 2, 0], Ro), ([7, 5, 5], Fi), ([10, 10, 9], Se), ([15, 14, 12], Ro)],
    [([2, 0, 1], Fi), ([5, 5, 5], Se), ([10, 9, 8], Ro), ([14, 12, 13], Fi)],
    [([0, 1, 0], Se), ([5, 5, 3], Ro), ([9, 8, 8], Fi), ([12, 13, 12], Se)],
];

const A_MAJOR: [Group; 4] = [
    [([5, 4, 2], Ro), ([9, 7, 7], Fi), ([12, 12, 11], Se), ([17, 16, 14], Ro)],
    [([4, 2, 2], Fi), ([7, 7, 6], Se), ([12, 11, 9], Ro), ([16, 14, 14], Fi)],
    [([2, 2, 2], Se), ([7, 6, 5], Ro), ([11, 9, 10], Fi), ([14, 14, 14], Se)],
    [([2, 2, 0], Ro), ([6, 5, 5], Fi), ([9, 10, 9], Se), ([14, 14, 12], Ro)],
];

// Selected group by group; the chained search has too few candidates in G.
const G_MAJOR: [Group; 4] = [
    [([3, 2, 0], Ro), ([7, 5, 5], Fi), ([10, 10, 9], Se), ([15, 14, 12], Ro)],
    [([2, 0, 0], Fi), ([5, 5, 4], Se), ([10, 9, 7], Ro), ([14, 12, 12], Fi)],
    [([0, 0, 0], Se), ([5, 4, 3], Ro), ([9, 7, 8], Fi), ([12, 12, 12], Se)],
    [([4, 3, 3], Fi), ([7, 8, 7], Se), ([12, 12, 10], Ro), ([16, 15, 15], Fi)],
];

fn assert_layout(key: &str, expected: &[Group; 4]) {
    let data = generate_triads_data(key).unwrap();
    for (g, (group, want)) in data.groups.iter().zip(expected).enumerate() {
        let got: Vec<([u8; 3], Inversion)> = group.voicings.iter().map(|v| (v.frets, v.inversion)).collect();
        assert_eq!(got, want.to_vec(), "{key} group {g}");
    }
}

#[test]
fn test_c_major_layout() {
    assert_layout("C", &C_MAJOR);
}

#[test]
fn test_a_major_layout() {
    assert_layout("A", &A_MAJOR);
}

#[test]
fn test_g_major_layout() {
    assert_layout("G", &G_MAJOR);
}

#[test]
fn test_shared_frets_between_groups() {
    // Chained layouts hand their top two frets to the next group up
    for layout in [&C_MAJOR, &A_MAJOR] {
        for pair in layout.windows(2) {
            for (lower, upper) in pair[0].iter().zip(&pair[1]) {
                assert_eq!(lower.0[1..], upper.0[..2]);
            }
        }
    }
}
