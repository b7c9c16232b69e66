//! Booking state machine - Empty → Highlighted → Booked
//!
//! A selection is highlighted immediately and confirmed (booked) when its
//! scheduled confirmation fires. Only one selection is pending at a time:
//! selecting again while one is pending confirms the earlier selection on the
//! spot and cancels its scheduled confirmation. `reset` returns every room to
//! Empty and cancels whatever is pending.

use hotelsim_logic::sampling::sample_rooms;
use hotelsim_logic::travel::TravelMetrics;
use hotelsim_logic::RoomId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::availability::all_free_rooms;
use crate::error::BookingError;
use crate::registry::{Hotel, RoomStatus};
use crate::scheduler::{Scheduler, TaskHandle};

/// Deferred work owned by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    ConfirmDue,
}

/// The selection currently highlighted and awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSelection {
    /// Highlighted rooms, ascending
    pub rooms: Vec<RoomId>,
    pub metrics: TravelMetrics,
    /// Simulated time at which the rooms become Booked
    pub deadline: f64,
    /// Handle of the scheduled confirmation
    pub handle: TaskHandle,
}

/// Applies selections to the registry and drives their confirmation
#[derive(Debug, Clone)]
pub struct BookingStateMachine {
    hotel: Hotel,
    pending: Option<PendingSelection>,
    scheduler: Scheduler<DeferredTask>,
    confirm_delay: f64,
}

impl BookingStateMachine {
    pub fn new(confirm_delay: f64) -> Self {
        Self {
            hotel: Hotel::new(),
            pending: None,
            scheduler: Scheduler::new(),
            confirm_delay,
        }
    }

    /// Start from an existing hotel state. Highlighted rooms in `hotel` have no
    /// pending confirmation and stay Highlighted until reset.
    pub fn from_hotel(hotel: Hotel, confirm_delay: f64) -> Self {
        Self {
            hotel,
            ..Self::new(confirm_delay)
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn confirm_delay(&self) -> f64 {
        self.confirm_delay
    }

    /// Highlight `ids` and schedule their confirmation.
    ///
    /// `ids` must be non-empty and every id an Empty room (no duplicates). A
    /// selection already pending is confirmed first. On error nothing changes.
    pub fn select(
        &mut self,
        ids: &[RoomId],
        metrics: TravelMetrics,
    ) -> Result<&PendingSelection, BookingError> {
        if ids.is_empty() {
            log::error!("select rejected: no rooms given");
            return Err(BookingError::EmptySelection);
        }
        let mut next = self.hotel.clone();
        for &id in ids {
            match next.status(id) {
                Some(RoomStatus::Empty) => {
                    next = next.with_statuses([(id, RoomStatus::Highlighted)]);
                }
                found => {
                    log::error!("select rejected: room {} is {:?}", id, found);
                    return Err(BookingError::InvalidSelection { room: id, found });
                }
            }
        }

        if let Some(prior) = self.pending.take() {
            self.scheduler.cancel(prior.handle);
            log::info!(
                "Superseding selection {:?}: confirmed early",
                prior.rooms
            );
            next = next.with_statuses(prior.rooms.iter().map(|&id| (id, RoomStatus::Booked)));
        }

        let handle = self
            .scheduler
            .schedule_in(self.confirm_delay, DeferredTask::ConfirmDue);
        let deadline = self.scheduler.deadline(handle).unwrap_or(self.now());

        self.hotel = next;
        Ok(self.pending.insert(PendingSelection {
            rooms: ids.to_vec(),
            metrics,
            deadline,
            handle,
        }))
    }

    /// Book every room in the pending selection. No-op without one.
    ///
    /// Returns the rooms that moved to Booked.
    pub fn confirm_due(&mut self) -> Vec<RoomId> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        self.scheduler.cancel(pending.handle);

        let confirmed: Vec<RoomId> = pending
            .rooms
            .into_iter()
            .filter(|&id| self.hotel.status(id) == Some(RoomStatus::Highlighted))
            .collect();
        self.hotel = self
            .hotel
            .with_statuses(confirmed.iter().map(|&id| (id, RoomStatus::Booked)));
        log::info!("Confirmed rooms {:?}", confirmed);
        confirmed
    }

    /// Every room back to Empty; pending selection and its timer discarded.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
        }
        self.hotel = Hotel::new();
    }

    /// Book `min(count, free)` random Empty rooms directly, skipping the
    /// Highlighted stage. The pending selection is left alone.
    pub fn random_fill<R: Rng>(&mut self, count: usize, rng: &mut R) -> Vec<RoomId> {
        let free = all_free_rooms(&self.hotel);
        let picked = sample_rooms(&free, count, rng);
        self.hotel = self
            .hotel
            .with_statuses(picked.iter().map(|&id| (id, RoomStatus::Booked)));
        picked
    }

    /// Advance the clock and run whatever deferred work is due.
    ///
    /// Returns the rooms confirmed during this tick.
    pub fn tick(&mut self, delta: f64) -> Vec<RoomId> {
        let mut confirmed = Vec::new();
        for (handle, task) in self.scheduler.advance(delta) {
            match task {
                DeferredTask::ConfirmDue => {
                    // A stale handle means the selection was superseded or reset.
                    if self.pending.as_ref().map(|p| p.handle) == Some(handle) {
                        confirmed.extend(self.confirm_due());
                    }
                }
            }
        }
        confirmed
    }
}
