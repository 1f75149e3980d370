//! Fishing: species, catch generation, and the collection summary.

pub mod collection;
pub mod generation;
pub mod types;

pub use collection::{summarize, CollectionSummary, SpeciesSummary};
pub use generation::{catch_from_draw, roll_catch};
pub use types::{CaughtFish, FishSpecies};
