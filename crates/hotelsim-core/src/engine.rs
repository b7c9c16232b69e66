//! Hotel engine - main entry point for driving the simulation

use hotelsim_logic::allocator::{allocate, Strategy};
use hotelsim_logic::config::{validate_config, ConfigError, HotelConfig};
use hotelsim_logic::sampling::draw_count;
use hotelsim_logic::travel::TravelMetrics;
use hotelsim_logic::RoomId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::availability;
use crate::booking::{BookingStateMachine, PendingSelection};
use crate::error::BookingError;
use crate::registry::{FloorRow, Hotel, OccupancySummary};
use crate::request::BookingRequest;

/// Result of a successful `book` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOutcome {
    /// Highlighted rooms, ascending
    pub rooms: Vec<RoomId>,
    pub metrics: TravelMetrics,
    pub strategy: Strategy,
    /// Simulated time at which the rooms become Booked
    pub confirm_at: f64,
}

/// Main booking engine
pub struct HotelEngine {
    config: HotelConfig,
    booking: BookingStateMachine,
    rng: StdRng,
}

impl HotelEngine {
    /// Create an engine with a fresh, empty hotel.
    ///
    /// Configuration problems are logged and otherwise ignored; use
    /// [`HotelEngine::try_new`] to reject them.
    pub fn new(config: HotelConfig) -> Self {
        for err in validate_config(&config) {
            log::warn!("Hotel config problem: {}", err);
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            booking: BookingStateMachine::new(config.confirm_delay),
            config,
            rng,
        }
    }

    /// Create an engine, refusing a configuration that fails validation
    pub fn try_new(config: HotelConfig) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(&config);
        if errors.is_empty() {
            Ok(Self::new(config))
        } else {
            Err(errors)
        }
    }

    /// Create an engine over an existing hotel snapshot
    pub fn from_hotel(config: HotelConfig, hotel: Hotel) -> Self {
        let mut engine = Self::new(config);
        engine.booking = BookingStateMachine::from_hotel(hotel, engine.config.confirm_delay);
        engine
    }

    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    /// Allocate and highlight `count` rooms.
    ///
    /// `count` outside 1..=5 is rejected before anything else happens.
    pub fn book(&mut self, count: i64) -> Result<BookingOutcome, BookingError> {
        let request = BookingRequest::new(count).map_err(|e| {
            log::warn!("Rejected booking request: {}", e);
            e
        })?;
        self.book_request(request)
    }

    /// Parse raw user input and book.
    pub fn book_input(&mut self, raw: &str) -> Result<BookingOutcome, BookingError> {
        let request = raw.parse::<BookingRequest>().map_err(|e| {
            log::warn!("Rejected booking input: {}", e);
            e
        })?;
        self.book_request(request)
    }

    pub fn book_request(
        &mut self,
        request: BookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        let count = request.count() as usize;
        let free = availability::snapshot(self.booking.hotel());

        let allocation = allocate(&free, count, &self.config.search_budget).map_err(|e| {
            log::warn!("Booking {} rooms failed: {}", count, e);
            BookingError::from(e)
        })?;

        let pending = self
            .booking
            .select(&allocation.rooms, allocation.metrics)?;
        let confirm_at = pending.deadline;

        log::info!(
            "Booked {:?} via {:?} (edge {}, total {}), confirm at t={}",
            allocation.rooms,
            allocation.strategy,
            allocation.metrics.edge_travel,
            allocation.metrics.total_travel,
            confirm_at
        );

        Ok(BookingOutcome {
            rooms: allocation.rooms,
            metrics: allocation.metrics,
            strategy: allocation.strategy,
            confirm_at,
        })
    }

    /// Return every room to Empty and drop any pending selection
    pub fn reset(&mut self) {
        self.booking.reset();
        log::info!("Hotel reset");
    }

    /// Book a random number of rooms (drawn from the configured fill range)
    pub fn random_fill(&mut self) -> Vec<RoomId> {
        let range = self.config.random_fill;
        let count = draw_count(range.min, range.max, &mut self.rng);
        self.random_fill_exact(count as usize)
    }

    /// Book exactly `min(count, free)` random rooms
    pub fn random_fill_exact(&mut self, count: usize) -> Vec<RoomId> {
        let filled = self.booking.random_fill(count, &mut self.rng);
        log::info!("Random fill booked {} of {} requested rooms", filled.len(), count);
        filled
    }

    /// Advance the simulated clock; returns rooms confirmed during the tick
    pub fn tick(&mut self, delta: f64) -> Vec<RoomId> {
        self.booking.tick(delta)
    }

    pub fn hotel(&self) -> &Hotel {
        self.booking.hotel()
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.booking.pending()
    }

    pub fn occupancy(&self) -> OccupancySummary {
        self.booking.hotel().occupancy()
    }

    pub fn floor_rows(&self) -> Vec<FloorRow> {
        self.booking.hotel().floor_rows()
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.booking.now()
    }

    pub fn free_count(&self) -> usize {
        availability::free_count(self.booking.hotel())
    }
}

impl Default for HotelEngine {
    fn default() -> Self {
        Self::new(HotelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RoomStatus;
    use hotelsim_logic::allocator::SearchBudget;
    use hotelsim_logic::config::FillRange;
    use std::time::Duration;

    fn seeded() -> HotelEngine {
        HotelEngine::new(HotelConfig {
            seed: Some(17),
            ..Default::default()
        })
    }

    #[test]
    fn test_engine_creation() {
        let engine = HotelEngine::default();
        assert_eq!(engine.hotel().len(), 97);
        assert_eq!(engine.free_count(), 97);
        assert_eq!(engine.now(), 0.0);
        assert!(engine.pending().is_none());
    }

    #[test]
    fn test_book_then_confirm() {
        let mut engine = seeded();
        let outcome = engine.book(3).unwrap();
        assert_eq!(outcome.rooms, vec![101, 102, 103]);
        assert_eq!(outcome.strategy, Strategy::SingleFloor { floor: 1 });
        assert_eq!(outcome.confirm_at, 4.0);
        assert_eq!(engine.occupancy().highlighted, 3);

        assert!(engine.tick(3.0).is_empty());
        assert_eq!(engine.tick(1.0), vec![101, 102, 103]);
        assert_eq!(engine.occupancy().booked, 3);
        assert_eq!(engine.occupancy().highlighted, 0);
    }

    #[test]
    fn test_invalid_counts_leave_hotel_unchanged() {
        let mut engine = seeded();
        engine.book(2).unwrap();
        let before = engine.hotel().clone();
        for n in [0, 6, -1] {
            assert!(matches!(engine.book(n), Err(BookingError::InvalidCount(_))));
        }
        assert!(matches!(
            engine.book_input("x"),
            Err(BookingError::InvalidCount(_))
        ));
        assert_eq!(engine.hotel(), &before);
    }

    #[test]
    fn test_book_input_parses() {
        let mut engine = seeded();
        let outcome = engine.book_input(" 2 ").unwrap();
        assert_eq!(outcome.rooms, vec![101, 102]);
    }

    #[test]
    fn test_full_hotel_insufficient() {
        let mut engine = seeded();
        engine.random_fill_exact(97);
        assert_eq!(
            engine.book(1),
            Err(BookingError::InsufficientRooms {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_allocation_timeout_is_reported() {
        // One free room per floor, so a 2-room request needs the fallback.
        let hotel = Hotel::new().with_statuses(
            Hotel::new()
                .rooms()
                .filter(|r| r.position != 1)
                .map(|r| (r.id, RoomStatus::Booked)),
        );
        let mut engine = HotelEngine::from_hotel(
            HotelConfig {
                search_budget: SearchBudget::unlimited().with_max_candidates(1),
                ..Default::default()
            },
            hotel.clone(),
        );
        assert_eq!(engine.free_count(), 10);
        assert_eq!(
            engine.book(2),
            Err(BookingError::AllocationTimeout { evaluated: 1 })
        );
        assert_eq!(engine.hotel(), &hotel);
        assert!(engine.pending().is_none());
    }

    #[test]
    fn test_duration_timeout_keeps_hotel_and_pending() {
        let hotel = Hotel::new().with_statuses(
            Hotel::new()
                .rooms()
                .filter(|r| r.position != 1)
                .map(|r| (r.id, RoomStatus::Booked)),
        );
        let mut engine = HotelEngine::from_hotel(
            HotelConfig {
                search_budget: SearchBudget::unlimited().with_max_duration(Duration::ZERO),
                ..Default::default()
            },
            hotel,
        );
        // Single-floor requests never touch the clock budget.
        assert_eq!(engine.book(1).unwrap().rooms, vec![101]);
        let before = engine.hotel().clone();
        let pending = engine.pending().cloned();

        assert_eq!(
            engine.book(2),
            Err(BookingError::AllocationTimeout { evaluated: 0 })
        );
        assert_eq!(engine.hotel(), &before);
        assert_eq!(engine.pending().cloned(), pending);
        assert_eq!(engine.tick(4.0), vec![101]);
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let bad = HotelConfig {
            confirm_delay: f64::INFINITY,
            random_fill: FillRange { min: 30, max: 10 },
            ..Default::default()
        };
        let errors = HotelEngine::try_new(bad.clone()).err().unwrap();
        assert!(errors.contains(&ConfigError::InvalidConfirmDelay(f64::INFINITY)));
        assert!(errors.contains(&ConfigError::FillRangeInverted { min: 30, max: 10 }));

        // `new` still builds an engine from the same config.
        assert_eq!(HotelEngine::new(bad).free_count(), 97);
        assert!(HotelEngine::try_new(HotelConfig::default()).is_ok());
    }

    #[test]
    fn test_random_fill_uses_configured_range() {
        let mut engine = HotelEngine::new(HotelConfig {
            random_fill: FillRange { min: 5, max: 15 },
            seed: Some(3),
            ..Default::default()
        });
        let filled = engine.random_fill();
        assert!((5..=15).contains(&filled.len()));
        assert!(filled
            .iter()
            .all(|&id| engine.hotel().status(id) == Some(RoomStatus::Booked)));
    }

    #[test]
    fn test_seeded_fill_is_reproducible() {
        let mut a = seeded();
        let mut b = seeded();
        assert_eq!(a.random_fill(), b.random_fill());
    }

    #[test]
    fn test_reset_restores_fresh_hotel() {
        let mut engine = seeded();
        engine.book(4).unwrap();
        engine.random_fill();
        engine.reset();
        assert_eq!(engine.hotel(), &Hotel::new());
        assert!(engine.pending().is_none());
        assert!(engine.tick(10.0).is_empty());
    }
}
