//! Sampling without replacement over free-room lists.

use rand::seq::index;
use rand::Rng;

use crate::RoomId;

/// Pick `min(amount, free.len())` distinct rooms from `free`.
///
/// The result is returned in ascending id order so callers that log or
/// render it get a stable layout; which rooms are picked depends only on
/// `rng`.
pub fn sample_rooms<R: Rng>(free: &[RoomId], amount: usize, rng: &mut R) -> Vec<RoomId> {
    let amount = amount.min(free.len());
    let mut picked: Vec<RoomId> = index::sample(rng, free.len(), amount)
        .into_iter()
        .map(|i| free[i])
        .collect();
    picked.sort_unstable();
    picked
}

/// Draw a count uniformly from `min..=max`.
pub fn draw_count<R: Rng>(min: u32, max: u32, rng: &mut R) -> u32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
