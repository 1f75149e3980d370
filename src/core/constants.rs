// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 50;
pub const INPUT_POLL_MS: u64 = 16;
pub const DEFAULT_WEATHER_INTERVAL_SECONDS: u64 = 150;

// Dock layout (percent of the dock width)
pub const MIN_POSITION: i32 = 5;
pub const MAX_POSITION: i32 = 95;
pub const START_POSITION: i32 = 50;
pub const MOVE_STEP: i32 = 1;

// Catch sizes in centimetres. Draws are uniform over [MIN, MAX) before rounding.
pub const MIN_FISH_SIZE_CM: u32 = 10;
pub const MAX_FISH_SIZE_CM: u32 = 110;

// Identity used when no owner is configured
pub const GUEST_OWNER: &str = "guest@lakeside.local";

// How long quitting waits for queued writes before leaving them behind
pub const PERSIST_SHUTDOWN_GRACE_MS: u64 = 2_000;

// Store collection keys
pub const CATCHES_KEY: &str = "catches";
pub const STATS_KEY: &str = "stats";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

// Logging
pub const LOG_FILE_NAME: &str = "lakeside.log";
pub const LOG_FILTER_ENV: &str = "LAKESIDE_LOG";
