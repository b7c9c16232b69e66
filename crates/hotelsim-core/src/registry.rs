//! Room registry: the fixed set of rooms and their booking status.
//!
//! `Hotel` is a value. Commands never edit it in place; they call
//! [`Hotel::with_statuses`] to build the next state and swap it in only when
//! the whole command has succeeded.

use std::collections::BTreeMap;

use hotelsim_logic::constants::FLOOR_COUNT;
use hotelsim_logic::layout::{all_room_ids, floor_of, floor_room_ids, horizontal_of};
use hotelsim_logic::RoomId;
use serde::{Deserialize, Serialize};

/// Booking status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    Empty,
    /// Offered to a guest, waiting for confirmation
    Highlighted,
    Booked,
}

/// A single hotel room. Floor and position always follow from `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub floor: u32,
    /// Distance from the elevator along the corridor
    pub position: u32,
    pub status: RoomStatus,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            floor: floor_of(id),
            position: horizontal_of(id),
            status: RoomStatus::Empty,
        }
    }

    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status == RoomStatus::Empty
    }
}

/// Room counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub empty: usize,
    pub highlighted: usize,
    pub booked: usize,
    pub total: usize,
}

/// One floor of the hotel, rooms in corridor order (for grid rendering)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRow {
    pub floor: u32,
    pub rooms: Vec<(RoomId, RoomStatus)>,
}

/// Every room in the hotel, iterated in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    rooms: BTreeMap<RoomId, Room>,
}

impl Hotel {
    /// A fresh hotel with all 97 rooms Empty.
    pub fn new() -> Self {
        Self {
            rooms: all_room_ids().map(|id| (id, Room::new(id))).collect(),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn status(&self, id: RoomId) -> Option<RoomStatus> {
        self.rooms.get(&id).map(|r| r.status)
    }

    /// Rooms in ascending id order (floor-major, then position).
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Ids of rooms with the given status, ascending.
    pub fn ids_with_status(&self, status: RoomStatus) -> Vec<RoomId> {
        self.rooms()
            .filter(|r| r.status == status)
            .map(|r| r.id)
            .collect()
    }

    /// Next hotel state with each listed room set to its new status.
    ///
    /// Ids that don't name a room are ignored; callers validate first.
    pub fn with_statuses(
        &self,
        changes: impl IntoIterator<Item = (RoomId, RoomStatus)>,
    ) -> Self {
        let mut next = self.clone();
        for (id, status) in changes {
            if let Some(room) = next.rooms.get_mut(&id) {
                room.status = status;
            }
        }
        next
    }

    pub fn occupancy(&self) -> OccupancySummary {
        let mut summary = OccupancySummary {
            total: self.rooms.len(),
            ..Default::default()
        };
        for room in self.rooms() {
            match room.status {
                RoomStatus::Empty => summary.empty += 1,
                RoomStatus::Highlighted => summary.highlighted += 1,
                RoomStatus::Booked => summary.booked += 1,
            }
        }
        summary
    }

    /// One row per floor, floor 1 first.
    pub fn floor_rows(&self) -> Vec<FloorRow> {
        (1..=FLOOR_COUNT)
            .map(|floor| FloorRow {
                floor,
                rooms: floor_room_ids(floor)
                    .filter_map(|id| self.status(id).map(|s| (id, s)))
                    .collect(),
            })
            .collect()
    }
}

impl Default for Hotel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelsim_logic::constants::TOTAL_ROOMS;

    #[test]
    fn test_new_hotel_all_empty() {
        let hotel = Hotel::new();
        assert_eq!(hotel.len(), TOTAL_ROOMS);
        assert!(hotel.rooms().all(Room::is_empty));
        assert_eq!(
            hotel.occupancy(),
            OccupancySummary {
                empty: 97,
                highlighted: 0,
                booked: 0,
                total: 97
            }
        );
    }

    #[test]
    fn test_room_fields_follow_id() {
        let hotel = Hotel::new();
        let room = hotel.room(1004).unwrap();
        assert_eq!(room.floor, 10);
        assert_eq!(room.position, 4);
        assert!(hotel.room(1008).is_none());
        assert!(hotel.room(111).is_none());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let hotel = Hotel::new();
        let ids: Vec<_> = hotel.rooms().map(|r| r.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_with_statuses_leaves_original_untouched() {
        let hotel = Hotel::new();
        let next = hotel.with_statuses([(101, RoomStatus::Booked), (999, RoomStatus::Booked)]);
        assert_eq!(hotel.status(101), Some(RoomStatus::Empty));
        assert_eq!(next.status(101), Some(RoomStatus::Booked));
        assert_eq!(next.len(), hotel.len());
        assert_eq!(next.ids_with_status(RoomStatus::Booked), vec![101]);
    }

    #[test]
    fn test_floor_rows_shape() {
        let rows = Hotel::new().floor_rows();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].rooms.len(), 10);
        assert_eq!(rows[9].floor, 10);
        assert_eq!(rows[9].rooms.len(), 7);
        assert_eq!(rows[9].rooms[0], (1001, RoomStatus::Empty));
    }

    #[test]
    fn test_snapshot_serializes() {
        let hotel = Hotel::new().with_statuses([(305, RoomStatus::Highlighted)]);
        let json = serde_json::to_string(&hotel.occupancy()).unwrap();
        assert!(json.contains("\"highlighted\":1"));
        let row = serde_json::to_value(&hotel.floor_rows()[2]).unwrap();
        assert_eq!(row["floor"], 3);
    }
}
