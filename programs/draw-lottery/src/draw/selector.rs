//! Winner selection over the flattened ticket index space.
//!
//! Entry `i` owns the half-open range `[sum(tickets[..i]), sum(tickets[..=i]))`.
//! The winning index is the full 256-bit random value reduced modulo the
//! total ticket count. The reduction carries the usual modulo bias, which is
//! negligible for a 256-bit value and is kept so results stay replayable.

use anchor_lang::prelude::*;

use crate::draw::ledger::Entry;
use crate::error::LotteryError;

/// Reads `random_value` as a little-endian unsigned integer and returns it
/// modulo `modulus`. `modulus` must be non-zero.
pub fn reduce(random_value: &[u8; 32], modulus: u64) -> u64 {
    let modulus = modulus as u128;
    random_value
        .iter()
        .rev()
        .fold(0u128, |acc, &byte| ((acc << 8) | byte as u128) % modulus) as u64
}

/// Returns the winner and the winning index. Pure: the same inputs always
/// give the same answer, so a settled draw can be replayed offline.
pub fn select(
    entries: &[Entry],
    total_tickets: u64,
    random_value: &[u8; 32],
) -> Result<(Pubkey, u64)> {
    require!(total_tickets > 0, LotteryError::NoParticipants);

    let winning_index = reduce(random_value, total_tickets);
    let mut upper = 0u64;
    for entry in entries {
        upper = upper
            .checked_add(entry.tickets)
            .ok_or(LotteryError::MathOverflow)?;
        if upper > winning_index {
            return Ok((entry.participant, winning_index));
        }
    }

    // total_tickets disagrees with the entries
    err!(LotteryError::NoParticipants)
}
