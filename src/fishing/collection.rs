//! Fish collection summary shown in the collection overlay.

use super::types::{CaughtFish, FishSpecies};

/// Per-species totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesSummary {
    pub species: FishSpecies,
    pub count: usize,
    pub biggest_cm: u32,
    /// Mean size rounded to the nearest centimetre, 0 when none caught
    pub average_cm: u32,
}

impl SpeciesSummary {
    pub fn has_caught(&self) -> bool {
        self.count > 0
    }
}

/// Totals over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    /// One entry per species, in `FishSpecies::ALL` order
    pub species: Vec<SpeciesSummary>,
    pub total: usize,
    pub biggest_cm: u32,
}

impl CollectionSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of species caught at least once.
    pub fn species_discovered(&self) -> usize {
        self.species.iter().filter(|s| s.has_caught()).count()
    }
}

/// Summarizes a set of catches by species.
pub fn summarize<'a>(catches: impl IntoIterator<Item = &'a CaughtFish>) -> CollectionSummary {
    let mut counts = [0usize; 5];
    let mut sums = [0u64; 5];
    let mut biggest = [0u32; 5];

    for fish in catches {
        let i = species_slot(fish.species);
        counts[i] += 1;
        sums[i] += fish.size_cm as u64;
        biggest[i] = biggest[i].max(fish.size_cm);
    }

    let species = FishSpecies::ALL
        .iter()
        .enumerate()
        .map(|(i, &species)| SpeciesSummary {
            species,
            count: counts[i],
            biggest_cm: biggest[i],
            average_cm: if counts[i] == 0 {
                0
            } else {
                (sums[i] as f64 / counts[i] as f64).round() as u32
            },
        })
        .collect();

    CollectionSummary {
        species,
        total: counts.iter().sum(),
        biggest_cm: biggest.iter().copied().max().unwrap_or(0),
    }
}

fn species_slot(species: FishSpecies) -> usize {
    match species {
        FishSpecies::Bass => 0,
        FishSpecies::Trout => 1,
        FishSpecies::Salmon => 2,
        FishSpecies::Pike => 3,
        FishSpecies::Catfish => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::Weather;

    fn fish(species: FishSpecies, size_cm: u32) -> CaughtFish {
        CaughtFish {
            species,
            size_cm,
            weather: Weather::Sunset,
            caught_at: 0,
        }
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let summary = summarize(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.biggest_cm, 0);
        assert_eq!(summary.species.len(), 5);
        assert!(summary.species.iter().all(|s| !s.has_caught()));
        assert!(summary.species.iter().all(|s| s.average_cm == 0));
    }

    #[test]
    fn test_summary_groups_by_species() {
        let catches = vec![
            fish(FishSpecies::Pike, 40),
            fish(FishSpecies::Pike, 61),
            fish(FishSpecies::Bass, 12),
            fish(FishSpecies::Pike, 90),
        ];
        let summary = summarize(&catches);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.biggest_cm, 90);
        assert_eq!(summary.species_discovered(), 2);

        let pike = &summary.species[3];
        assert_eq!(pike.species, FishSpecies::Pike);
        assert_eq!(pike.count, 3);
        assert_eq!(pike.biggest_cm, 90);
        // (40 + 61 + 90) / 3 = 63.67
        assert_eq!(pike.average_cm, 64);

        let trout = &summary.species[1];
        assert_eq!(trout.count, 0);
        assert_eq!(trout.biggest_cm, 0);
    }

    #[test]
    fn test_species_order_matches_all() {
        let summary = summarize(&[fish(FishSpecies::Catfish, 30)]);
        let order: Vec<_> = summary.species.iter().map(|s| s.species).collect();
        assert_eq!(order, FishSpecies::ALL.to_vec());
    }
}
