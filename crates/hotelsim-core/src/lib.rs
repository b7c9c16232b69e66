//! HotelSim Core - hotel booking engine
//!
//! Holds the mutable side of the simulation: the room registry, the
//! deferred highlight-to-booked confirmation and the command surface a
//! presentation layer drives. Room selection itself is delegated to
//! `hotelsim_logic::allocator`.
//!
//! # Architecture
//!
//! - **Registry**: an immutable `Hotel` value; every command builds the
//!   next value and commits it only when the whole command succeeds
//! - **Availability**: free-room views computed from a `Hotel` on demand
//! - **Scheduler**: a simulated clock with cancellable deferred tasks
//! - **Booking**: the Empty → Highlighted → Booked state machine
//! - **Engine**: validated commands (`book`, `reset`, `random_fill`, `tick`)
//!
//! # Example
//!
//! ```rust
//! use hotelsim_core::prelude::*;
//!
//! let mut engine = HotelEngine::new(HotelConfig::default());
//!
//! let outcome = engine.book(3).unwrap();
//! assert_eq!(outcome.rooms, vec![101, 102, 103]);
//!
//! // Highlighted until the confirmation delay elapses
//! engine.tick(4.0);
//! assert_eq!(engine.occupancy().booked, 3);
//! ```

pub mod availability;
pub mod booking;
pub mod engine;
pub mod error;
pub mod registry;
pub mod request;
pub mod scheduler;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{BookingOutcome, HotelEngine};
    pub use crate::error::BookingError;
    pub use crate::registry::{FloorRow, Hotel, OccupancySummary, Room, RoomStatus};
    pub use crate::request::BookingRequest;
    pub use hotelsim_logic::config::HotelConfig;
    pub use hotelsim_logic::RoomId;
}
