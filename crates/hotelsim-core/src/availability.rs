//! Free-room views over a `Hotel`.
//!
//! Computed fresh from the registry on every call; nothing here is cached
//! across commands.

use hotelsim_logic::allocator::FreeRooms;
use hotelsim_logic::constants::FLOOR_COUNT;
use hotelsim_logic::layout::floor_room_ids;
use hotelsim_logic::RoomId;

use crate::registry::{Hotel, RoomStatus};

/// Empty rooms on `floor`, ascending.
pub fn free_rooms_on_floor(hotel: &Hotel, floor: u32) -> Vec<RoomId> {
    floor_room_ids(floor)
        .filter(|&id| hotel.status(id) == Some(RoomStatus::Empty))
        .collect()
}

/// Every Empty room, floor 1 through 10, i.e. ascending id.
pub fn all_free_rooms(hotel: &Hotel) -> Vec<RoomId> {
    (1..=FLOOR_COUNT)
        .flat_map(|floor| free_rooms_on_floor(hotel, floor))
        .collect()
}

pub fn free_count(hotel: &Hotel) -> usize {
    hotel.rooms().filter(|r| r.is_empty()).count()
}

/// Per-floor snapshot for the allocator.
pub fn snapshot(hotel: &Hotel) -> FreeRooms {
    FreeRooms::from_floors(
        (1..=FLOOR_COUNT)
            .map(|floor| free_rooms_on_floor(hotel, floor))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_hotel_everything_free() {
        let hotel = Hotel::new();
        assert_eq!(free_rooms_on_floor(&hotel, 1), (101..=110).collect::<Vec<_>>());
        assert_eq!(free_rooms_on_floor(&hotel, 10), (1001..=1007).collect::<Vec<_>>());
        assert_eq!(all_free_rooms(&hotel).len(), 97);
        assert_eq!(free_count(&hotel), 97);
    }

    #[test]
    fn test_non_empty_rooms_excluded() {
        let hotel = Hotel::new().with_statuses([
            (102, RoomStatus::Highlighted),
            (103, RoomStatus::Booked),
            (1007, RoomStatus::Booked),
        ]);
        let floor1 = free_rooms_on_floor(&hotel, 1);
        assert!(!floor1.contains(&102));
        assert!(!floor1.contains(&103));
        assert_eq!(floor1.len(), 8);
        assert_eq!(free_count(&hotel), 94);
        assert!(!all_free_rooms(&hotel).contains(&1007));
    }

    #[test]
    fn test_all_free_is_concatenation_of_floors() {
        let hotel = Hotel::new().with_statuses([(205, RoomStatus::Booked), (901, RoomStatus::Booked)]);
        let concat: Vec<RoomId> = (1..=FLOOR_COUNT)
            .flat_map(|f| free_rooms_on_floor(&hotel, f))
            .collect();
        assert_eq!(all_free_rooms(&hotel), concat);
        assert!(concat.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_snapshot_matches_views() {
        let hotel = Hotel::new().with_statuses([(301, RoomStatus::Booked)]);
        let free = snapshot(&hotel);
        assert_eq!(free.on_floor(3), free_rooms_on_floor(&hotel, 3).as_slice());
        assert_eq!(free.all(), all_free_rooms(&hotel));
        assert_eq!(free.count(), 96);
    }

    #[test]
    fn test_unknown_floor_is_empty() {
        assert!(free_rooms_on_floor(&Hotel::new(), 11).is_empty());
        assert!(free_rooms_on_floor(&Hotel::new(), 0).is_empty());
    }
}
