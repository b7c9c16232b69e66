//! Hotel dimensions and request limits
//!
//! Plain numeric constants with no state. Both the engine and the simtest
//! harness read these.

/// Number of floors (1-based, floor 1 is the lowest).
pub const FLOOR_COUNT: u32 = 10;

/// Rooms on every floor except the top one.
pub const ROOMS_PER_FLOOR: u32 = 10;

/// Rooms on the top floor.
pub const TOP_FLOOR_ROOMS: u32 = 7;

/// Total number of rooms in the hotel (9 × 10 + 7).
pub const TOTAL_ROOMS: usize = ((FLOOR_COUNT - 1) * ROOMS_PER_FLOOR + TOP_FLOOR_ROOMS) as usize;

/// Multiplier applied to a floor number to build a room id.
pub const FLOOR_ID_STRIDE: u32 = 100;

/// Smallest number of rooms a single request may ask for.
pub const MIN_ROOMS_PER_BOOKING: u32 = 1;

/// Largest number of rooms a single request may ask for.
pub const MAX_ROOMS_PER_BOOKING: u32 = 5;

/// Travel cost of riding the elevator one floor up or down.
pub const ELEVATOR_COST_PER_FLOOR: u32 = 2;

/// Default delay (time units) between highlighting a selection and booking it.
pub const DEFAULT_CONFIRM_DELAY: f64 = 4.0;

/// Default random-fill range, inclusive.
pub const DEFAULT_FILL_MIN: u32 = 20;
pub const DEFAULT_FILL_MAX: u32 = 60;

/// Default cap on candidates the combinatorial fallback may evaluate.
pub const DEFAULT_MAX_CANDIDATES: u64 = 5_000_000;
