//! Booking request validation.

use std::str::FromStr;

use hotelsim_logic::constants::{MAX_ROOMS_PER_BOOKING, MIN_ROOMS_PER_BOOKING};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A validated request for 1–5 rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBookingRequest")]
pub struct BookingRequest {
    count: u32,
}

/// Wire shape of a request before its count is checked
#[derive(Deserialize)]
struct RawBookingRequest {
    count: i64,
}

impl TryFrom<RawBookingRequest> for BookingRequest {
    type Error = BookingError;

    fn try_from(raw: RawBookingRequest) -> Result<Self, Self::Error> {
        Self::new(raw.count)
    }
}

impl BookingRequest {
    pub fn new(count: i64) -> Result<Self, BookingError> {
        let valid = MIN_ROOMS_PER_BOOKING as i64..=MAX_ROOMS_PER_BOOKING as i64;
        if valid.contains(&count) {
            Ok(Self {
                count: count as u32,
            })
        } else {
            Err(BookingError::InvalidCount(count.to_string()))
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Parses raw user input. Only whole numbers are accepted: `"2.5"`, `"x"`
/// and `""` are all invalid.
impl FromStr for BookingRequest {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let count: i64 = trimmed
            .parse()
            .map_err(|_| BookingError::InvalidCount(trimmed.to_string()))?;
        Self::new(count)
    }
}
