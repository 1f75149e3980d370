//! Core game state and the dock state machine.

pub mod constants;
pub mod game_logic;
pub mod game_state;

pub use constants::*;
pub use game_logic::{GameEvent, GameSession};
pub use game_state::{FishingMode, GameState, Overlay, PlayerState, Posture};
