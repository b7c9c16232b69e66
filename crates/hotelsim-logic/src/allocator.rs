//! Room allocation: picks which free rooms to offer for a request.
//!
//! Two passes:
//! 1. **Single floor.** Floors are scanned bottom-up; the first floor with at
//!    least `count` free rooms wins and its lowest `count` rooms are offered.
//!    No cross-floor option is compared against it, even a cheaper one.
//! 2. **Combinatorial fallback.** Every order-preserving `count`-subset of the
//!    global free list is scored by [`TravelMetrics`]: smallest edge travel,
//!    then smallest total travel, then first in enumeration order.
//!
//! The fallback only runs when every floor has fewer than `count` free rooms,
//! so at most `FLOOR_COUNT * (count - 1)` rooms reach it (`C(40, 5)` =
//! 658,008 candidates). Callers that need a hard bound pass a
//! [`SearchBudget`]; running past it fails with
//! [`AllocationError::AllocationTimeout`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::combinations::{binomial, Combinations};
use crate::constants::{DEFAULT_MAX_CANDIDATES, FLOOR_COUNT};
use crate::travel::TravelMetrics;
use crate::RoomId;

/// How often (in candidates) the wall-clock budget is checked.
const CLOCK_CHECK_INTERVAL: u64 = 4096;

/// Errors from the allocator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("not enough free rooms: requested {requested}, available {available}")]
    InsufficientRooms { requested: usize, available: usize },

    #[error("room search exceeded its budget after {evaluated} candidates")]
    AllocationTimeout { evaluated: u64 },
}

/// Limits on the combinatorial fallback. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum candidates to score.
    pub max_candidates: Option<u64>,
    /// Maximum wall-clock time for the search, in milliseconds.
    pub max_duration_ms: Option<u64>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self {
            max_candidates: None,
            max_duration_ms: None,
        }
    }

    pub fn with_max_candidates(mut self, max: u64) -> Self {
        self.max_candidates = Some(max);
        self
    }

    pub fn with_max_duration(mut self, duration: Duration) -> Self {
        self.max_duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
            max_duration_ms: None,
        }
    }
}

/// Which pass produced an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Greedy pass found a floor with enough free rooms.
    SingleFloor { floor: u32 },
    /// Fallback search scored `evaluated` candidates.
    Combinatorial { evaluated: u64 },
}

/// A chosen set of rooms with its travel metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Selected rooms, ascending.
    pub rooms: Vec<RoomId>,
    pub metrics: TravelMetrics,
    pub strategy: Strategy,
}

/// Free rooms grouped by floor, as seen at one instant.
///
/// `floors[0]` is floor 1. Each floor's list is ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeRooms {
    floors: Vec<Vec<RoomId>>,
}

impl FreeRooms {
    /// Build from per-floor lists, floor 1 first.
    pub fn from_floors(floors: Vec<Vec<RoomId>>) -> Self {
        Self { floors }
    }

    /// Group an ascending list of free room ids by floor.
    pub fn from_sorted_ids(ids: impl IntoIterator<Item = RoomId>) -> Self {
        let mut floors = vec![Vec::new(); FLOOR_COUNT as usize];
        for id in ids {
            let floor = crate::layout::floor_of(id);
            if let Some(list) = floors.get_mut(floor.saturating_sub(1) as usize) {
                list.push(id);
            }
        }
        Self { floors }
    }

    /// Free rooms on `floor` (1-based), ascending.
    pub fn on_floor(&self, floor: u32) -> &[RoomId] {
        floor
            .checked_sub(1)
            .and_then(|i| self.floors.get(i as usize))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every free room, ascending.
    pub fn all(&self) -> Vec<RoomId> {
        self.floors.iter().flatten().copied().collect()
    }

    /// Total number of free rooms.
    pub fn count(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }
}

/// Select `count` rooms from `free`.
///
/// `count` is expected to be validated by the caller; a `count` of zero
/// yields an empty single-floor allocation on floor 1.
pub fn allocate(
    free: &FreeRooms,
    count: usize,
    budget: &SearchBudget,
) -> Result<Allocation, AllocationError> {
    if let Some(allocation) = single_floor_pass(free, count) {
        return Ok(allocation);
    }

    let available = free.count();
    if available < count {
        return Err(AllocationError::InsufficientRooms {
            requested: count,
            available,
        });
    }

    combinatorial_pass(&free.all(), count, budget)
}

/// First floor (bottom-up) with at least `count` free rooms.
pub fn single_floor_pass(free: &FreeRooms, count: usize) -> Option<Allocation> {
    (1..=FLOOR_COUNT).find_map(|floor| {
        let rooms = free.on_floor(floor);
        (rooms.len() >= count).then(|| {
            let rooms = rooms[..count].to_vec();
            Allocation {
                metrics: TravelMetrics::of(&rooms),
                rooms,
                strategy: Strategy::SingleFloor { floor },
            }
        })
    })
}

/// Score every `count`-combination of `rooms` and keep the best.
pub fn combinatorial_pass(
    rooms: &[RoomId],
    count: usize,
    budget: &SearchBudget,
) -> Result<Allocation, AllocationError> {
    if rooms.len() < count {
        return Err(AllocationError::InsufficientRooms {
            requested: count,
            available: rooms.len(),
        });
    }

    log::debug!(
        "combinatorial search: {} free rooms, k={}, {} candidates",
        rooms.len(),
        count,
        binomial(rooms.len() as u64, count as u64)
    );

    let started = Instant::now();
    let deadline = budget.max_duration_ms.map(Duration::from_millis);
    let mut best: Option<(TravelMetrics, Vec<RoomId>)> = None;
    let mut evaluated: u64 = 0;

    for candidate in Combinations::new(rooms, count) {
        if budget.max_candidates.is_some_and(|max| evaluated >= max) {
            return Err(AllocationError::AllocationTimeout { evaluated });
        }
        if let Some(limit) = deadline {
            if evaluated % CLOCK_CHECK_INTERVAL == 0 && started.elapsed() >= limit {
                return Err(AllocationError::AllocationTimeout { evaluated });
            }
        }
        evaluated += 1;

        let metrics = TravelMetrics::of(&candidate);
        // Strictly better only: ties keep the earlier candidate.
        if best.as_ref().map_or(true, |(m, _)| metrics < *m) {
            best = Some((metrics, candidate));
        }
    }

    log::debug!(
        "combinatorial search done: {} evaluated in {:?}",
        evaluated,
        started.elapsed()
    );

    match best {
        Some((metrics, rooms)) => Ok(Allocation {
            rooms,
            metrics,
            strategy: Strategy::Combinatorial { evaluated },
        }),
        None => Err(AllocationError::InsufficientRooms {
            requested: count,
            available: rooms.len(),
        }),
    }
}
