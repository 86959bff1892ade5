use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::state::DrawState;

/// Moves escrowed lamports to a recipient. On-chain this debits the draw
/// account; tests record the calls instead.
pub trait PrizeTransfer {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<()>;
}

/// Bookkeeping for the lamports pooled in the draw account. The lamports
/// themselves sit on the account; `balance` excludes its rent reserve.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct PrizeEscrow {
    pub balance: u64,
    /// Lamports that left escrow, as prize or refunds.
    pub disbursed: u64,
}

impl PrizeEscrow {
    pub fn pool(&mut self, amount: u64) -> Result<u64> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(self.balance)
    }

    /// Sends the whole balance to `winner`. The state guard is the only
    /// protection against a second payout, so callers pass the live state.
    pub fn payout<T: PrizeTransfer>(
        &mut self,
        state: DrawState,
        winner: &Pubkey,
        transfer: &mut T,
    ) -> Result<u64> {
        require!(state != DrawState::Settled, LotteryError::AlreadySettled);
        require!(self.balance > 0, LotteryError::EscrowEmpty);

        let amount = self.balance;
        self.release(winner, amount, transfer)?;
        Ok(amount)
    }

    /// Returns `amount` to a participant of a cancelled draw.
    pub fn refund<T: PrizeTransfer>(
        &mut self,
        participant: &Pubkey,
        amount: u64,
        transfer: &mut T,
    ) -> Result<()> {
        require!(amount > 0, LotteryError::NothingToRefund);
        require!(self.balance >= amount, LotteryError::EscrowEmpty);
        self.release(participant, amount, transfer)
    }

    fn release<T: PrizeTransfer>(
        &mut self,
        recipient: &Pubkey,
        amount: u64,
        transfer: &mut T,
    ) -> Result<()> {
        let disbursed = self
            .disbursed
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;

        transfer.transfer(recipient, amount).map_err(|e| {
            msg!("Transfer of {} lamports to {} failed: {}", amount, recipient, e);
            error!(LotteryError::PayoutFailed)
        })?;

        self.balance -= amount;
        self.disbursed = disbursed;
        Ok(())
    }
}
