use anchor_lang::prelude::*;

use crate::draw::{ParticipantLedger, PrizeEscrow, RandomnessCoordinator};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum DrawState {
    /// Tickets on sale until the window elapses.
    #[default]
    Open,
    /// Closed and waiting for the oracle callback.
    AwaitingRandomness,
    /// Winner paid. Terminal.
    Settled,
    /// Abandoned after the oracle timed out; participants reclaim payments.
    Cancelled,
}

/// One draw. Lives at `[LOTTERY_SEED, authority, draw_id]`, holds the pooled
/// lamports and stays on-chain after settlement as the audit record.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    pub draw_id: u64,

    /// Operator allowed to close, retry and cancel the draw.
    pub authority: Pubkey,

    /// The only account allowed to deliver randomness.
    pub oracle: Pubkey,

    /// The price (in lamports) of a single ticket.
    pub price: u64,

    /// The UNIX timestamp at which ticket sales opened.
    pub lottery_start: i64,

    /// Length of the ticket window in seconds.
    pub duration: i64,

    /// Seconds a randomness request may stay unanswered before the operator
    /// can retry or cancel.
    pub request_timeout: i64,

    pub state: DrawState,

    pub ledger: ParticipantLedger,

    pub coordinator: RandomnessCoordinator,

    /// The random value that settled the draw.
    pub randomness: Option<[u8; 32]>,

    pub winner: Option<Pubkey>,

    pub winning_index: Option<u64>,

    pub escrow: PrizeEscrow,
}

/// Operator-supplied configuration for a new draw.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawParams {
    pub ticket_price: u64,
    pub duration: i64,
    pub request_timeout: Option<i64>,
    pub oracle: Pubkey,
}

/// Read-only view returned by the `draw_summary` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawSummary {
    pub state: DrawState,
    pub ticket_price: u64,
    pub window_end: i64,
    pub participants: u32,
    pub total_tickets: u64,
    pub pooled: u64,
    pub pending_request: Option<u64>,
    pub winner: Option<Pubkey>,
    pub winning_index: Option<u64>,
}
