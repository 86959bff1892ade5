use anchor_lang::prelude::*;

#[event]
pub struct TicketsPurchased {
    pub draw: Pubkey,
    pub participant: Pubkey,
    /// Lamports paid in this purchase.
    pub amount: u64,
    /// Participant's ticket count after the purchase.
    pub tickets: u64,
    pub total_tickets: u64,
}

#[event]
pub struct RandomnessRequested {
    pub draw: Pubkey,
    pub request_id: u64,
    pub requested_at: i64,
}

/// Emitted when an operator replaces a timed-out request.
#[event]
pub struct RandomnessReissued {
    pub draw: Pubkey,
    pub stale_request_id: u64,
    pub request_id: u64,
    pub requested_at: i64,
}

#[event]
pub struct WinnerSelected {
    pub draw: Pubkey,
    pub winner: Pubkey,
    pub winning_index: u64,
}

#[event]
pub struct PrizeTransferred {
    pub draw: Pubkey,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DrawCancelled {
    pub draw: Pubkey,
    pub cancelled_at: i64,
    /// Lamports left in escrow for refunds.
    pub pooled: u64,
}

#[event]
pub struct RefundIssued {
    pub draw: Pubkey,
    pub participant: Pubkey,
    pub amount: u64,
}
