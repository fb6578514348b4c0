//! RNG seed derivation utilities for deterministic dealing.
//!
//! Every deal in a room is reproducible from the room seed, the round
//! number and the deal number within the round (redeals bump the latter).

/// Derive the seed for one deal.
pub fn derive_dealing_seed(room_seed: u64, round_no: u16, deal_no: u16) -> u64 {
    room_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add((deal_no as u64).wrapping_mul(1_000))
        .wrapping_add(2)
}

/// Derive a seed for a bot seated at `seat`, so seeded bots in one room
/// don't mirror each other.
pub fn derive_bot_seed(base_seed: u64, seat: u8) -> u64 {
    base_seed
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1)
}
