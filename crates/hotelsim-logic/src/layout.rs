//! Room id encoding.
//!
//! A room id is `floor * 100 + position`. Floors 1–9 hold positions 1–10,
//! floor 10 holds positions 1–7 (ids 1001–1007). The elevator sits at
//! horizontal position 0 on every floor, so a room's position is also its
//! walking distance to the elevator.

use crate::constants::{FLOOR_COUNT, FLOOR_ID_STRIDE, ROOMS_PER_FLOOR, TOP_FLOOR_ROOMS};
use crate::RoomId;

/// Floor a room is on (1-based).
pub fn floor_of(id: RoomId) -> u32 {
    id / FLOOR_ID_STRIDE
}

/// Horizontal position of a room, i.e. its distance from the elevator.
pub fn horizontal_of(id: RoomId) -> u32 {
    id % FLOOR_ID_STRIDE
}

/// Number of rooms on a floor, or 0 for a floor that doesn't exist.
pub fn rooms_on_floor(floor: u32) -> u32 {
    match floor {
        f if f == FLOOR_COUNT => TOP_FLOOR_ROOMS,
        1..=9 => ROOMS_PER_FLOOR,
        _ => 0,
    }
}

/// Build a room id, returning `None` when the floor or position is out of range.
pub fn room_id(floor: u32, position: u32) -> Option<RoomId> {
    if position == 0 || position > rooms_on_floor(floor) {
        return None;
    }
    Some(floor * FLOOR_ID_STRIDE + position)
}

/// Whether `id` names one of the hotel's rooms.
pub fn is_valid_room(id: RoomId) -> bool {
    room_id(floor_of(id), horizontal_of(id)) == Some(id)
}

/// Ids of every room on `floor`, ascending.
pub fn floor_room_ids(floor: u32) -> impl Iterator<Item = RoomId> {
    (1..=rooms_on_floor(floor)).map(move |pos| floor * FLOOR_ID_STRIDE + pos)
}

/// Every room id in the hotel, floor-major then position (ascending id).
pub fn all_room_ids() -> impl Iterator<Item = RoomId> {
    (1..=FLOOR_COUNT).flat_map(floor_room_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_ROOMS;

    #[test]
    fn test_floor_and_position_decode() {
        assert_eq!(floor_of(101), 1);
        assert_eq!(horizontal_of(101), 1);
        assert_eq!(floor_of(910), 9);
        assert_eq!(horizontal_of(910), 10);
        assert_eq!(floor_of(1007), 10);
        assert_eq!(horizontal_of(1007), 7);
    }

    #[test]
    fn test_room_id_bounds() {
        assert_eq!(room_id(3, 4), Some(304));
        assert_eq!(room_id(10, 7), Some(1007));
        assert_eq!(room_id(10, 8), None);
        assert_eq!(room_id(0, 1), None);
        assert_eq!(room_id(11, 1), None);
        assert_eq!(room_id(5, 0), None);
    }

    #[test]
    fn test_valid_rooms() {
        assert!(is_valid_room(110));
        assert!(is_valid_room(1001));
        assert!(!is_valid_room(111));
        assert!(!is_valid_room(1008));
        assert!(!is_valid_room(100));
    }

    #[test]
    fn test_all_room_ids_ascending() {
        let ids: Vec<_> = all_room_ids().collect();
        assert_eq!(ids.len(), TOTAL_ROOMS);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.first(), Some(&101));
        assert_eq!(ids.last(), Some(&1007));
    }

    #[test]
    fn test_decode_roundtrips_every_room() {
        for id in all_room_ids() {
            assert_eq!(room_id(floor_of(id), horizontal_of(id)), Some(id));
        }
    }
}
