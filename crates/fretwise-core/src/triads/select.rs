//! Choosing four climbing, inversion-cycling positions

use super::chain::Chain;
use super::{is_inversion_cycle, Inversion, TriadOptions, TriadVoicing, POSITIONS_PER_GROUP};

/// Relative targets along the neck for positions 0..=3.
const POSITION_TARGETS: [f64; POSITIONS_PER_GROUP] = [0.0, 0.25, 0.5, 1.0];

/// Nearest-rank percentile of `sorted`, rounding half up.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = ((sorted.len() - 1) as f64 * p + 0.5).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Candidate closest to `target`, lower fret first on ties.
fn nearest<'a, T>(candidates: impl Iterator<Item = &'a T>, target: f64, average: impl Fn(&T) -> f64) -> Option<&'a T>
where
    T: 'a,
{
    candidates.fold(None, |best: Option<&'a T>, candidate| match best {
        Some(b) => {
            let (cd, bd) = ((average(candidate) - target).abs(), (average(b) - target).abs());
            if cd < bd || (cd == bd && average(candidate) < average(b)) {
                Some(candidate)
            } else {
                Some(b)
            }
        }
        None => Some(candidate),
    })
}

fn bucket<'a>(chains: &'a [Chain], inversion: Inversion) -> impl Iterator<Item = &'a Chain> + 'a {
    chains.iter().filter(move |c| c.inversion() == inversion)
}

/// Each group in the selection must climb and cycle on its own.
fn is_valid_selection(selection: &[&Chain]) -> bool {
    let groups = selection.first().map_or(0, |c| c.voicings.len());
    (0..groups).all(|group| {
        let voicings: Vec<&TriadVoicing> = selection.iter().map(|c| &c.voicings[group]).collect();
        let climbing = voicings.windows(2).all(|w| w[0].average_fret < w[1].average_fret);
        let inversions: Vec<Inversion> = voicings.iter().map(|v| v.inversion).collect();
        climbing && is_inversion_cycle(&inversions)
    })
}

/// Pick four chains whose voicings climb and cycle inversions in every group.
///
/// The lowest and highest positions come from the same inversion bucket; the
/// middle two come from the neighbouring buckets in either cycle direction.
/// Returns `None` when no such selection exists.
pub(super) fn select_from_chains<'a>(chains: &'a [Chain], options: &TriadOptions) -> Option<Vec<&'a Chain>> {
    if chains.len() < POSITIONS_PER_GROUP {
        return None;
    }

    let averages: Vec<f64> = chains.iter().map(|c| c.average_fret).collect();
    let quarter = percentile(&averages, POSITION_TARGETS[1]);
    let half = percentile(&averages, POSITION_TARGETS[2]);

    let mut categories: Vec<(Inversion, Vec<&Chain>)> = Inversion::CYCLE
        .iter()
        .map(|&inv| (inv, bucket(chains, inv).collect::<Vec<_>>()))
        .filter(|(_, members)| members.len() >= 2)
        .collect();
    let span = |members: &[&Chain]| members[members.len() - 1].average_fret - members[0].average_fret;
    categories.sort_by(|(_, a), (_, b)| span(b).total_cmp(&span(a)));

    for (inversion, members) in &categories {
        let low = members[0];
        let high = members
            .iter()
            .rev()
            .find(|c| c.max_fret <= options.practical_max_fret && c.average_fret > low.average_fret)
            .copied()
            .unwrap_or(members[members.len() - 1]);

        for direction in [1, -1] {
            let between = |floor: f64| {
                move |c: &&Chain| c.average_fret > floor && c.average_fret < high.average_fret
            };
            let Some(second) = nearest(
                bucket(chains, inversion.step(direction)).filter(between(low.average_fret)),
                quarter,
                |c| c.average_fret,
            ) else {
                continue;
            };
            let Some(third) = nearest(
                bucket(chains, inversion.step(2 * direction)).filter(between(second.average_fret)),
                half,
                |c| c.average_fret,
            ) else {
                continue;
            };

            let selection = vec![low, second, third, high];
            if is_valid_selection(&selection) {
                return Some(selection);
            }
        }
    }
    None
}

/// Select four voicings from one group's candidates (sorted by average fret)
/// without regard to neighbouring groups.
///
/// Walks the inversion cycle from the lowest voicing in either direction; if
/// neither direction can be completed, falls back to evenly spaced quartiles.
pub(super) fn select_per_group(voicings: &[TriadVoicing], options: &TriadOptions) -> Vec<TriadVoicing> {
    let Some(first) = voicings.first() else {
        return Vec::new();
    };
    let averages: Vec<f64> = voicings.iter().map(|v| v.average_fret).collect();

    for direction in [1, -1] {
        if let Some(selection) = walk_cycle(voicings, first, &averages, direction, options) {
            return selection;
        }
    }
    quartiles(voicings)
}

fn walk_cycle(
    voicings: &[TriadVoicing],
    first: &TriadVoicing,
    averages: &[f64],
    direction: i32,
    options: &TriadOptions,
) -> Option<Vec<TriadVoicing>> {
    let mut selection = vec![first.clone()];
    for (step, &target) in POSITION_TARGETS.iter().enumerate().skip(1) {
        let inversion = first.inversion.step(direction * step as i32);
        let floor = selection[selection.len() - 1].average_fret;
        let mut candidates: Vec<&TriadVoicing> = voicings
            .iter()
            .filter(|v| v.inversion == inversion && v.average_fret > floor)
            .collect();
        if step == POSITIONS_PER_GROUP - 1 {
            let practical: Vec<&TriadVoicing> = candidates
                .iter()
                .copied()
                .filter(|v| v.max_fret() <= options.practical_max_fret)
                .collect();
            if !practical.is_empty() {
                candidates = practical;
            }
        }
        let pick = nearest(candidates.into_iter(), percentile(averages, target), |v| v.average_fret)?;
        selection.push(pick.clone());
    }
    Some(selection)
}

/// Evenly spaced picks at the quartile targets, skipping duplicates.
fn quartiles(voicings: &[TriadVoicing]) -> Vec<TriadVoicing> {
    let last = voicings.len() - 1;
    let mut indices: Vec<usize> = Vec::with_capacity(POSITIONS_PER_GROUP);
    for target in POSITION_TARGETS {
        let mut index = (target * last as f64 + 0.5).floor() as usize;
        while indices.contains(&index) && index < last {
            index += 1;
        }
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices.sort_unstable();
    indices.into_iter().map(|i| voicings[i].clone()).collect()
}
