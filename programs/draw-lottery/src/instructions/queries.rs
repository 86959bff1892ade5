use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::state::{DrawSummary, Lottery};

/// Read-only access to a draw. Meant to be simulated; nothing is written.
#[derive(Accounts)]
pub struct ReadDraw<'info> {
    #[account(
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

pub fn process_draw_summary(ctx: Context<ReadDraw>) -> Result<DrawSummary> {
    Ok(ctx.accounts.lottery.summary())
}

pub fn process_ticket_count(ctx: Context<ReadDraw>, participant: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.lottery.ticket_count_of(&participant))
}
