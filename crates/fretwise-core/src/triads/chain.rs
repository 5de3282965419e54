//! Linking voicings across adjacent string groups

use super::{Inversion, TriadVoicing};

/// One voicing per string group, each sharing its top two frets with the
/// next group's bottom two.
#[derive(Debug, Clone)]
pub(super) struct Chain {
    pub voicings: Vec<TriadVoicing>,
    pub average_fret: f64,
    pub max_fret: u8,
}

impl Chain {
    fn new(voicings: Vec<TriadVoicing>) -> Self {
        let average_fret = voicings.iter().map(|v| v.average_fret).sum::<f64>() / voicings.len() as f64;
        let max_fret = voicings.iter().map(TriadVoicing::max_fret).max().unwrap_or(0);
        Self { voicings, average_fret, max_fret }
    }

    /// Chains are ranked by the inversion of their lowest group.
    pub fn inversion(&self) -> Inversion {
        self.voicings[0].inversion
    }
}

/// Adjacent groups overlap on two strings; the frets there must agree.
fn links(lower: &TriadVoicing, upper: &TriadVoicing) -> bool {
    lower.strings[1..] == upper.strings[..2] && lower.frets[1..] == upper.frets[..2]
}

/// Every complete chain through `groups`, sorted by average fret.
///
/// `groups[g]` holds the candidates for the g-th string group, lowest first.
pub(super) fn complete_chains(groups: &[Vec<TriadVoicing>]) -> Vec<Chain> {
    let Some(first) = groups.first() else {
        return Vec::new();
    };

    let mut partial: Vec<Vec<usize>> = (0..first.len()).map(|i| vec![i]).collect();
    for (g, candidates) in groups.iter().enumerate().skip(1) {
        let previous = &groups[g - 1];
        partial = partial
            .into_iter()
            .flat_map(|path| {
                let tail = &previous[path[path.len() - 1]];
                candidates
                    .iter()
                    .enumerate()
                    .filter(move |(_, v)| links(tail, v))
                    .map(move |(i, _)| {
                        let mut extended = path.clone();
                        extended.push(i);
                        extended
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
    }

    let mut chains: Vec<Chain> = partial
        .into_iter()
        .map(|path| {
            Chain::new(
                path.iter()
                    .enumerate()
                    .map(|(g, &i)| groups[g][i].clone())
                    .collect(),
            )
        })
        .collect();

    chains.sort_by(|a, b| {
        a.average_fret.total_cmp(&b.average_fret).then_with(|| {
            let frets = |c: &Chain| c.voicings.iter().map(|v| v.frets).collect::<Vec<_>>();
            frets(a).cmp(&frets(b))
        })
    });
    chains
}
