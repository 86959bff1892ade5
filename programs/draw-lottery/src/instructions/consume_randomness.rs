use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::error::LotteryError;
use crate::events::{PrizeTransferred, WinnerSelected};
use crate::state::Lottery;
use crate::utils::{revealed_value, LamportTransfer};

/// Accounts for the oracle callback that settles a draw.
///
/// This ensures that:
/// 1. The randomness comes from the oracle account configured for the draw.
/// 2. The revealed commit is the one the draw is waiting for.
/// 3. The prize goes to the account the selection rule picks.
#[derive(Accounts)]
pub struct ConsumeRandomness<'info> {
    /// Account submitting the callback and paying fees.
    pub payer: Signer<'info>,

    /// The draw record; the prize is paid out of its lamports.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: Compared against the draw's oracle, data parsed within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// Winner account receiving the pooled lamports. The selection is
    /// deterministic, so clients compute it from the revealed value.
    /// CHECK: Must equal the selected winner, enforced by the payout.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Delivers revealed randomness for `request_id`, picks the winner and
/// transfers the whole pot to them.
pub fn process_consume_randomness(
    ctx: Context<ConsumeRandomness>,
    request_id: u64,
) -> Result<()> {
    ctx.accounts.lottery.ensure_accepts_randomness()?;

    let clock = Clock::get()?;
    let draw = ctx.accounts.lottery.key();
    let oracle = ctx.accounts.randomness_account_data.key();
    require_keys_eq!(
        oracle,
        ctx.accounts.lottery.oracle,
        LotteryError::UnauthorizedCallback
    );

    let (revealed_id, revealed_random_value) =
        revealed_value(&ctx.accounts.randomness_account_data, &clock)?;
    require!(revealed_id == request_id, LotteryError::UnknownRequest);

    let lottery_info = ctx.accounts.lottery.to_account_info();
    let reserve = Rent::get()?.minimum_balance(lottery_info.data_len());
    let mut transfer =
        LamportTransfer::new(lottery_info, ctx.accounts.winner.to_account_info(), reserve);
    let lottery = &mut ctx.accounts.lottery;
    let settlement =
        lottery.deliver_randomness(oracle, request_id, revealed_random_value, &mut transfer)?;

    msg!("Randomness result: {}", to_hex(&revealed_random_value));
    msg!("Ticket num: {}", lottery.total_tickets());
    msg!("Winner: {} (index {})", settlement.winner, settlement.winning_index);
    emit!(WinnerSelected {
        draw,
        winner: settlement.winner,
        winning_index: settlement.winning_index,
    });
    emit!(PrizeTransferred {
        draw,
        winner: settlement.winner,
        amount: settlement.amount,
    });

    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
