//! Booking error taxonomy.

use hotelsim_logic::allocator::AllocationError;
use hotelsim_logic::RoomId;

use crate::registry::RoomStatus;

/// Errors returned by booking commands. No command that returns an error
/// has changed the hotel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Requested count missing, not an integer, or outside 1..=5.
    #[error("invalid room count {0:?}: expected a whole number from 1 to 5")]
    InvalidCount(String),

    #[error("not enough free rooms: requested {requested}, available {available}")]
    InsufficientRooms { requested: usize, available: usize },

    /// Internal consistency violation: a selected room was not Empty or does
    /// not exist. `found` is `None` for unknown ids.
    #[error("room {room} cannot be selected (found {found:?})")]
    InvalidSelection {
        room: RoomId,
        found: Option<RoomStatus>,
    },

    /// Internal consistency violation: a selection with no rooms.
    #[error("selection contains no rooms")]
    EmptySelection,

    #[error("room search exceeded its budget after {evaluated} candidates")]
    AllocationTimeout { evaluated: u64 },
}

impl From<AllocationError> for BookingError {
    fn from(e: AllocationError) -> Self {
        match e {
            AllocationError::InsufficientRooms {
                requested,
                available,
            } => BookingError::InsufficientRooms {
                requested,
                available,
            },
            AllocationError::AllocationTimeout { evaluated } => {
                BookingError::AllocationTimeout { evaluated }
            }
        }
    }
}
