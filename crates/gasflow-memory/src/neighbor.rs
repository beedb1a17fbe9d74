//! Near-duplicate search used before anything is added to the cache or history.
//!
//! - **Perfect match**: all four fields equal.
//! - **Partial match**: same output and exactly two of position, pressure and
//!   air aperture equal. The stored entry takes the candidate's position and
//!   context, so a noisy repeat reuses the slot instead of growing the list.
//!
//! Scan order is index 0 upward; the first match wins.

use gasflow_core::models::Observation;

/// Where a candidate landed in the scanned entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborMatch {
    /// Entry at this index is identical to the candidate.
    Perfect(usize),
    /// Entry at this index was overwritten with the candidate's fields.
    Corrected(usize),
}

impl NeighborMatch {
    pub fn index(&self) -> usize {
        match *self {
            Self::Perfect(i) | Self::Corrected(i) => i,
        }
    }
}

/// Find the first entry `candidate` duplicates, correcting partial matches in place.
pub fn find(entries: &mut [Observation], candidate: &Observation) -> Option<NeighborMatch> {
    for (index, entry) in entries.iter_mut().enumerate() {
        if !same(entry.output, candidate.output) {
            continue;
        }
        match matching_fields(entry, candidate) {
            3 => return Some(NeighborMatch::Perfect(index)),
            2 => {
                entry.correct_from(candidate);
                return Some(NeighborMatch::Corrected(index));
            }
            _ => {}
        }
    }
    None
}

/// Count of equal fields among position, pressure and air aperture.
fn matching_fields(a: &Observation, b: &Observation) -> usize {
    [
        same(a.position, b.position),
        same(a.pressure, b.pressure),
        same(a.air_aperture, b.air_aperture),
    ]
    .into_iter()
    .filter(|eq| *eq)
    .count()
}

fn same(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(position: f64, pressure: f64, air: f64, output: f64) -> Observation {
        Observation::new(position, pressure, air, output)
    }

    #[test]
    fn perfect_match_leaves_entry_alone() {
        let mut entries = vec![obs(1.0, 1000.0, 50.0, 20.0), obs(2.0, 1000.0, 50.0, 22.0)];
        let found = find(&mut entries, &obs(2.0, 1000.0, 50.0, 22.0));
        assert_eq!(found, Some(NeighborMatch::Perfect(1)));
        assert_eq!(entries[1], obs(2.0, 1000.0, 50.0, 22.0));
    }

    #[test]
    fn partial_match_overwrites_context() {
        let mut entries = vec![obs(10.0, 1000.0, 50.0, 20.0)];
        let found = find(&mut entries, &obs(10.0, 1005.0, 50.0, 20.0));
        assert_eq!(found, Some(NeighborMatch::Corrected(0)));
        assert_eq!(entries[0], obs(10.0, 1005.0, 50.0, 20.0));
    }

    #[test]
    fn one_of_three_is_not_a_match() {
        let mut entries = vec![obs(10.0, 1000.0, 50.0, 20.0)];
        assert_eq!(find(&mut entries, &obs(11.0, 1001.0, 50.0, 20.0)), None);
        assert_eq!(entries[0], obs(10.0, 1000.0, 50.0, 20.0));
    }

    #[test]
    fn different_output_is_never_a_match() {
        let mut entries = vec![obs(10.0, 1000.0, 50.0, 20.0)];
        assert_eq!(find(&mut entries, &obs(10.0, 1000.0, 50.0, 20.5)), None);
    }

    #[test]
    fn first_match_wins() {
        let mut entries = vec![
            obs(10.0, 1000.0, 50.0, 20.0),
            obs(10.0, 1000.0, 50.0, 20.0),
        ];
        let found = find(&mut entries, &obs(10.0, 1000.0, 60.0, 20.0));
        assert_eq!(found, Some(NeighborMatch::Corrected(0)));
        assert_eq!(entries[1].air_aperture, 50.0);
    }
}
