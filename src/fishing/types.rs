//! Fish species and catch types.

use crate::weather::Weather;
use serde::{Deserialize, Serialize};

/// The five species that can bite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishSpecies {
    Bass,
    Trout,
    Salmon,
    Pike,
    Catfish,
}

impl FishSpecies {
    /// All species in collection display order.
    pub const ALL: [FishSpecies; 5] = [
        FishSpecies::Bass,
        FishSpecies::Trout,
        FishSpecies::Salmon,
        FishSpecies::Pike,
        FishSpecies::Catfish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FishSpecies::Bass => "Bass",
            FishSpecies::Trout => "Trout",
            FishSpecies::Salmon => "Salmon",
            FishSpecies::Pike => "Pike",
            FishSpecies::Catfish => "Catfish",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FishSpecies::Bass => "🐟",
            FishSpecies::Trout => "🎣",
            FishSpecies::Salmon => "🍣",
            FishSpecies::Pike => "🦈",
            FishSpecies::Catfish => "🐱",
        }
    }
}

impl std::fmt::Display for FishSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fish that was reeled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtFish {
    pub species: FishSpecies,
    /// Length in whole centimetres (10-110)
    pub size_cm: u32,
    /// Weather at the moment of the catch
    pub weather: Weather,
    /// Unix timestamp in milliseconds
    pub caught_at: i64,
}
