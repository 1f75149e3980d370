//! Catch generation.
//!
//! Size is uniform over [10, 110) cm rounded to the nearest centimetre, and
//! species is uniform over the five species. Neither function touches storage.

use super::types::{CaughtFish, FishSpecies};
use crate::core::constants::{MAX_FISH_SIZE_CM, MIN_FISH_SIZE_CM};
use crate::weather::Weather;
use rand::Rng;

/// Builds a catch from explicit random draws.
///
/// `size_draw` is the raw continuous size; out-of-range draws are clamped.
/// `species_index` wraps around the species list.
pub fn catch_from_draw(
    size_draw: f64,
    species_index: usize,
    weather: Weather,
    caught_at: i64,
) -> CaughtFish {
    let size_cm = (size_draw.round() as i64)
        .clamp(MIN_FISH_SIZE_CM as i64, MAX_FISH_SIZE_CM as i64) as u32;
    let species = FishSpecies::ALL[species_index % FishSpecies::ALL.len()];

    CaughtFish {
        species,
        size_cm,
        weather,
        caught_at,
    }
}

/// Rolls a random catch for the current weather.
pub fn roll_catch(rng: &mut impl Rng, weather: Weather, caught_at: i64) -> CaughtFish {
    let size_draw = rng.gen_range(MIN_FISH_SIZE_CM as f64..MAX_FISH_SIZE_CM as f64);
    let species_index = rng.gen_range(0..FishSpecies::ALL.len());
    catch_from_draw(size_draw, species_index, weather, caught_at)
}
