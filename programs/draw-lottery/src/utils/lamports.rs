use anchor_lang::prelude::*;

use crate::draw::PrizeTransfer;
use crate::error::LotteryError;

/// Pays out of the program-owned draw account by moving lamports directly,
/// never dipping into the first `reserve` lamports (the rent-exempt minimum).
pub struct LamportTransfer<'info> {
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    reserve: u64,
}

impl<'info> LamportTransfer<'info> {
    pub fn new(from: AccountInfo<'info>, to: AccountInfo<'info>, reserve: u64) -> Self {
        Self { from, to, reserve }
    }
}

impl PrizeTransfer for LamportTransfer<'_> {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        if self.to.key != recipient {
            msg!("Expected recipient {}, got {}", recipient, self.to.key);
            return err!(LotteryError::PayoutFailed);
        }
        require!(
            self.to.is_writable && !self.to.executable,
            LotteryError::PayoutFailed
        );

        let available = self.from.lamports().saturating_sub(self.reserve);
        require!(available >= amount, LotteryError::PayoutFailed);

        **self.from.try_borrow_mut_lamports()? -= amount;
        **self.to.try_borrow_mut_lamports()? += amount;
        Ok(())
    }
}
