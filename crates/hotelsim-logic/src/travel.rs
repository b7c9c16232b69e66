//! Travel-time model.
//!
//! All movement between floors goes through the elevator at horizontal
//! position 0. Walking one room along a corridor costs 1; riding the elevator
//! costs [`ELEVATOR_COST_PER_FLOOR`] per floor.
//!
//! ```
//! use hotelsim_logic::travel::{pairwise_travel, sequential_travel};
//!
//! assert_eq!(pairwise_travel(101, 105), 4);
//! assert_eq!(pairwise_travel(105, 304), 13);
//! assert_eq!(sequential_travel(&[101, 102, 201]), 7);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::ELEVATOR_COST_PER_FLOOR;
use crate::layout::{floor_of, horizontal_of};
use crate::RoomId;

/// Travel cost between two rooms.
///
/// Same floor: corridor distance. Different floors: walk to the elevator,
/// ride, walk out to the other room.
pub fn pairwise_travel(a: RoomId, b: RoomId) -> u32 {
    let (floor_a, floor_b) = (floor_of(a), floor_of(b));
    if floor_a == floor_b {
        horizontal_of(a).abs_diff(horizontal_of(b))
    } else {
        horizontal_of(a) + ELEVATOR_COST_PER_FLOOR * floor_a.abs_diff(floor_b) + horizontal_of(b)
    }
}

/// Cost of visiting `rooms` in the given order.
///
/// When the walk touches two or more floors, one extra trip from the last
/// room back to the elevator is charged, wherever the walk ends.
pub fn sequential_travel(rooms: &[RoomId]) -> u32 {
    let Some((&first, _)) = rooms.split_first() else {
        return 0;
    };

    let mut total = 0;
    let mut current_floor = floor_of(first);
    let mut floors_visited = BTreeSet::from([current_floor]);

    for pair in rooms.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let floor = floor_of(cur);
        if floor != current_floor {
            total += horizontal_of(prev)
                + ELEVATOR_COST_PER_FLOOR * floor.abs_diff(current_floor)
                + horizontal_of(cur);
            current_floor = floor;
            floors_visited.insert(floor);
        } else {
            total += horizontal_of(cur).abs_diff(horizontal_of(prev));
        }
    }

    if floors_visited.len() > 1 {
        if let Some(&last) = rooms.last() {
            total += horizontal_of(last);
        }
    }

    total
}

/// Travel metrics for one candidate selection.
///
/// Ordering is the allocator's ranking key: smaller edge travel wins, then
/// smaller total travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TravelMetrics {
    /// Pairwise travel between the first and last room.
    pub edge_travel: u32,
    /// Sequential travel across every room in order.
    pub total_travel: u32,
}

impl TravelMetrics {
    /// Compute metrics for an ordered selection. Empty selections score zero.
    pub fn of(rooms: &[RoomId]) -> Self {
        let edge_travel = match (rooms.first(), rooms.last()) {
            (Some(&first), Some(&last)) => pairwise_travel(first, last),
            _ => 0,
        };
        Self {
            edge_travel,
            total_travel: sequential_travel(rooms),
        }
    }
}

impl PartialOrd for TravelMetrics {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TravelMetrics {
    fn cmp(&self, other: &Self) -> Ordering {
        self.edge_travel
            .cmp(&other.edge_travel)
            .then(self.total_travel.cmp(&other.total_travel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::all_room_ids;

    #[test]
    fn test_same_floor_is_horizontal_distance() {
        assert_eq!(pairwise_travel(101, 105), 4);
        assert_eq!(pairwise_travel(1007, 1001), 6);
    }

    #[test]
    fn test_cross_floor_goes_through_elevator() {
        // 5 to the elevator, 2 floors at 2 each, 4 out
        assert_eq!(pairwise_travel(105, 304), 13);
        assert_eq!(pairwise_travel(910, 1001), 10 + 2 + 1);
    }

    #[test]
    fn test_pairwise_symmetric_and_zero_diagonal() {
        let ids: Vec<_> = all_room_ids().collect();
        for &a in &ids {
            assert_eq!(pairwise_travel(a, a), 0);
            for &b in &ids {
                assert_eq!(pairwise_travel(a, b), pairwise_travel(b, a));
            }
        }
    }

    #[test]
    fn test_sequential_short_inputs() {
        assert_eq!(sequential_travel(&[]), 0);
        assert_eq!(sequential_travel(&[305]), 0);
    }

    #[test]
    fn test_sequential_single_floor() {
        assert_eq!(sequential_travel(&[101, 102, 105]), 4);
        assert_eq!(sequential_travel(&[201, 210]), 9);
    }

    #[test]
    fn test_sequential_trailing_elevator_trip() {
        // 101→102 = 1, 102→201 = 2 + 2 + 1 = 5, then 1 back from 201
        assert_eq!(sequential_travel(&[101, 102, 201]), 7);
    }

    #[test]
    fn test_sequential_charges_return_trip_even_when_ending_far() {
        // 110→301 = 10 + 4 + 1, 301→305 = 4, then 5 back from 305
        assert_eq!(sequential_travel(&[110, 301, 305]), 15 + 4 + 5);
    }

    #[test]
    fn test_metrics_ordering() {
        let a = TravelMetrics {
            edge_travel: 3,
            total_travel: 10,
        };
        let b = TravelMetrics {
            edge_travel: 3,
            total_travel: 12,
        };
        let c = TravelMetrics {
            edge_travel: 2,
            total_travel: 50,
        };
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn test_metrics_of_selection() {
        let m = TravelMetrics::of(&[101, 102, 201]);
        assert_eq!(m.edge_travel, 1 + 2 + 1);
        assert_eq!(m.total_travel, 7);
        assert_eq!(TravelMetrics::of(&[]), TravelMetrics::default());
    }
}
