//! Engine configuration and validation.
//!
//! Everything the booking engine treats as a tunable lives here: how long a
//! selection stays highlighted, how many rooms a random fill books, and how
//! far the combinatorial fallback may search. Configs deserialize from JSON
//! with every field optional.
//!
//! ```
//! use hotelsim_logic::config::{validate_config, HotelConfig};
//!
//! let config = HotelConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::allocator::SearchBudget;
use crate::constants::{
    DEFAULT_CONFIRM_DELAY, DEFAULT_FILL_MAX, DEFAULT_FILL_MIN, TOTAL_ROOMS,
};

/// Inclusive range of rooms a random fill books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRange {
    pub min: u32,
    pub max: u32,
}

impl FillRange {
    /// A range that always fills exactly `count` rooms.
    pub fn fixed(count: u32) -> Self {
        Self {
            min: count,
            max: count,
        }
    }
}

impl Default for FillRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_FILL_MIN,
            max: DEFAULT_FILL_MAX,
        }
    }
}

/// Booking engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    /// Time units between highlighting a selection and booking it.
    pub confirm_delay: f64,
    /// Rooms booked by one random fill.
    pub random_fill: FillRange,
    /// Limits on the combinatorial fallback search.
    pub search_budget: SearchBudget,
    /// Random seed for fills (None = seeded from entropy).
    pub seed: Option<u64>,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            confirm_delay: DEFAULT_CONFIRM_DELAY,
            random_fill: FillRange::default(),
            search_budget: SearchBudget::default(),
            seed: None,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Confirm delay negative or not finite.
    #[error("invalid confirm delay: {0}")]
    InvalidConfirmDelay(f64),
    /// Fill range has min above max.
    #[error("random fill range inverted: {min}..={max}")]
    FillRangeInverted { min: u32, max: u32 },
    /// Fill range asks for more rooms than the hotel has.
    #[error("random fill max {0} exceeds {rooms} rooms", rooms = TOTAL_ROOMS)]
    FillRangeTooLarge(u32),
    /// Candidate budget of zero would reject every fallback search.
    #[error("search budget max_candidates is 0")]
    ZeroCandidateBudget,
    /// Duration budget of zero would reject every fallback search.
    #[error("search budget max_duration_ms is 0")]
    ZeroDurationBudget,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &HotelConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.confirm_delay.is_finite() || config.confirm_delay < 0.0 {
        errors.push(ConfigError::InvalidConfirmDelay(config.confirm_delay));
    }

    let FillRange { min, max } = config.random_fill;
    if min > max {
        errors.push(ConfigError::FillRangeInverted { min, max });
    }
    if max as usize > TOTAL_ROOMS {
        errors.push(ConfigError::FillRangeTooLarge(max));
    }

    if config.search_budget.max_candidates == Some(0) {
        errors.push(ConfigError::ZeroCandidateBudget);
    }
    if config.search_budget.max_duration_ms == Some(0) {
        errors.push(ConfigError::ZeroDurationBudget);
    }

    errors
}
