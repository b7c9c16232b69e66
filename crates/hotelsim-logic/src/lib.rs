//! Pure room-allocation logic for HotelSim.
//!
//! This crate contains everything about booking that is independent of
//! mutable hotel state. Functions take plain room ids and free-room lists and
//! return results, so the allocator can be unit-tested and benchmarked
//! without an engine, a clock or a renderer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocator`] | Greedy single-floor pass + budgeted combinatorial fallback |
//! | [`combinations`] | Lazy, restartable k-combination producer |
//! | [`config`] | Engine configuration (delays, fill range, search budget) and validation |
//! | [`constants`] | Hotel dimensions and travel cost constants |
//! | [`layout`] | Room id encoding: floor / horizontal position / enumeration |
//! | [`sampling`] | Sampling without replacement over a free-room list |
//! | [`travel`] | Pairwise and sequential travel-time model |

pub mod allocator;
pub mod combinations;
pub mod config;
pub mod constants;
pub mod layout;
pub mod sampling;
pub mod travel;

/// Numeric room identifier (`floor * 100 + position`).
pub type RoomId = u32;
