use anchor_lang::prelude::*;

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::draw::{
    selector, ParticipantLedger, PrizeEscrow, PrizeTransfer, RandomnessCoordinator,
    RandomnessOracle, RequestId,
};
use crate::error::LotteryError;
use crate::state::{DrawParams, DrawState, DrawSummary, Lottery};

/// Result of a successful ticket purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub tickets: u64,
    pub total_tickets: u64,
    pub pooled: u64,
}

/// Result of the oracle callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub winner: Pubkey,
    pub winning_index: u64,
    pub amount: u64,
}

impl Lottery {
    pub fn new(
        bump: u8,
        draw_id: u64,
        authority: Pubkey,
        params: DrawParams,
        now: i64,
    ) -> Result<Self> {
        let request_timeout = params
            .request_timeout
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS);
        require!(params.ticket_price > 0, LotteryError::InvalidConfig);
        require!(params.duration > 0, LotteryError::InvalidConfig);
        require!(request_timeout > 0, LotteryError::InvalidConfig);
        require!(params.oracle != Pubkey::default(), LotteryError::InvalidConfig);

        Ok(Self {
            bump,
            draw_id,
            authority,
            oracle: params.oracle,
            price: params.ticket_price,
            lottery_start: now,
            duration: params.duration,
            request_timeout,
            state: DrawState::Open,
            ledger: ParticipantLedger::default(),
            coordinator: RandomnessCoordinator::default(),
            randomness: None,
            winner: None,
            winning_index: None,
            escrow: PrizeEscrow::default(),
        })
    }

    pub fn window_end(&self) -> i64 {
        self.lottery_start.saturating_add(self.duration)
    }

    pub fn is_window_closed(&self, now: i64) -> bool {
        now >= self.window_end()
    }

    pub fn ticket_count_of(&self, participant: &Pubkey) -> u64 {
        self.ledger.ticket_count_of(participant)
    }

    pub fn total_tickets(&self) -> u64 {
        self.ledger.total_tickets()
    }

    pub fn pooled(&self) -> u64 {
        self.escrow.balance
    }

    pub fn summary(&self) -> DrawSummary {
        DrawSummary {
            state: self.state,
            ticket_price: self.price,
            window_end: self.window_end(),
            participants: self.ledger.entries.len() as u32,
            total_tickets: self.total_tickets(),
            pooled: self.pooled(),
            pending_request: self.coordinator.pending,
            winner: self.winner,
            winning_index: self.winning_index,
        }
    }

    pub fn buy_tickets(
        &mut self,
        participant: Pubkey,
        amount_paid: u64,
        now: i64,
    ) -> Result<Purchase> {
        match self.state {
            DrawState::Open => {}
            DrawState::AwaitingRandomness => return err!(LotteryError::SalesClosed),
            DrawState::Settled => return err!(LotteryError::DrawAlreadySettled),
            DrawState::Cancelled => return err!(LotteryError::DrawCancelled),
        }
        require!(now >= self.lottery_start, LotteryError::SalesNotStarted);
        require!(!self.is_window_closed(now), LotteryError::SalesClosed);
        // checked up front so a ledger write is never followed by a failure
        self.escrow
            .balance
            .checked_add(amount_paid)
            .ok_or(LotteryError::MathOverflow)?;

        let tickets = self
            .ledger
            .record_purchase(participant, amount_paid, self.price)?;
        let pooled = self.escrow.pool(amount_paid)?;

        Ok(Purchase {
            tickets,
            total_tickets: self.ledger.total_tickets(),
            pooled,
        })
    }

    /// Ends ticket sales and issues the draw's randomness request.
    pub fn close<O: RandomnessOracle>(
        &mut self,
        caller: Pubkey,
        now: i64,
        oracle: &mut O,
    ) -> Result<RequestId> {
        require_keys_eq!(caller, self.authority, LotteryError::NotAuthorized);
        match self.state {
            DrawState::Open => {}
            DrawState::AwaitingRandomness => return err!(LotteryError::RequestAlreadyPending),
            DrawState::Settled => return err!(LotteryError::DrawAlreadySettled),
            DrawState::Cancelled => return err!(LotteryError::DrawCancelled),
        }
        require!(self.is_window_closed(now), LotteryError::WindowStillOpen);

        let request_id =
            self.coordinator
                .request_randomness(oracle, self.is_window_closed(now), now)?;
        self.state = DrawState::AwaitingRandomness;
        Ok(request_id)
    }

    /// Fails with the terminal state's error once the draw is settled or
    /// cancelled. Callback handlers run this before reading the oracle.
    pub fn ensure_accepts_randomness(&self) -> Result<()> {
        match self.state {
            DrawState::Open | DrawState::AwaitingRandomness => Ok(()),
            DrawState::Settled => err!(LotteryError::DrawAlreadySettled),
            DrawState::Cancelled => err!(LotteryError::DrawCancelled),
        }
    }

    /// Oracle callback: resolves the pending request, selects the winner and
    /// pays out. All checks and the transfer run before anything is written.
    pub fn deliver_randomness<T: PrizeTransfer>(
        &mut self,
        caller: Pubkey,
        request_id: RequestId,
        random_value: [u8; 32],
        transfer: &mut T,
    ) -> Result<Settlement> {
        self.ensure_accepts_randomness()?;
        require_keys_eq!(caller, self.oracle, LotteryError::UnauthorizedCallback);

        let mut coordinator = self.coordinator;
        let random_value = coordinator.resolve(request_id, random_value)?;
        let (winner, winning_index) = selector::select(
            &self.ledger.entries,
            self.ledger.total_tickets,
            &random_value,
        )?;
        let mut escrow = self.escrow;
        let amount = escrow.payout(self.state, &winner, transfer)?;

        self.coordinator = coordinator;
        self.escrow = escrow;
        self.randomness = Some(random_value);
        self.winner = Some(winner);
        self.winning_index = Some(winning_index);
        self.state = DrawState::Settled;

        Ok(Settlement {
            winner,
            winning_index,
            amount,
        })
    }

    /// Replaces a timed-out request. Returns `(stale, fresh)` request ids.
    pub fn retry_randomness<O: RandomnessOracle>(
        &mut self,
        caller: Pubkey,
        now: i64,
        oracle: &mut O,
    ) -> Result<(RequestId, RequestId)> {
        self.require_timed_out_request(caller, now)?;
        self.coordinator.reissue(oracle, now)
    }

    /// Abandons a timed-out draw so participants can reclaim their payments.
    /// Returns the lamports left in escrow.
    pub fn cancel(&mut self, caller: Pubkey, now: i64) -> Result<u64> {
        self.require_timed_out_request(caller, now)?;
        self.coordinator.abandon();
        self.state = DrawState::Cancelled;
        Ok(self.escrow.balance)
    }

    pub fn claim_refund<T: PrizeTransfer>(
        &mut self,
        participant: Pubkey,
        transfer: &mut T,
    ) -> Result<u64> {
        require!(
            self.state == DrawState::Cancelled,
            LotteryError::RefundNotAllowed
        );
        let entry = self
            .ledger
            .entry(&participant)
            .filter(|e| !e.refunded)
            .ok_or(LotteryError::NothingToRefund)?;
        let amount = entry
            .tickets
            .checked_mul(self.price)
            .ok_or(LotteryError::MathOverflow)?;

        self.escrow.refund(&participant, amount, transfer)?;
        if let Some(entry) = self.ledger.entry_mut(&participant) {
            entry.refunded = true;
        }
        Ok(amount)
    }

    fn require_timed_out_request(&self, caller: Pubkey, now: i64) -> Result<()> {
        require_keys_eq!(caller, self.authority, LotteryError::NotAuthorized);
        match self.state {
            DrawState::AwaitingRandomness => {}
            DrawState::Open => return err!(LotteryError::NotAwaitingRandomness),
            DrawState::Settled => return err!(LotteryError::DrawAlreadySettled),
            DrawState::Cancelled => return err!(LotteryError::DrawCancelled),
        }
        require!(
            self.coordinator.is_timed_out(now, self.request_timeout),
            LotteryError::RequestNotTimedOut
        );
        Ok(())
    }
}
