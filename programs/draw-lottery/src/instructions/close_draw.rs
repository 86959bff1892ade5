use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::RandomnessRequested;
use crate::state::Lottery;
use crate::utils::SwitchboardOracle;

/// Accounts required to close ticket sales and request randomness.
///
/// Ensures:
/// 1. Only the operator of the draw can close it.
/// 2. The randomness account is the configured one and was committed in
///    the previous slot.
#[derive(Accounts)]
pub struct CloseDraw<'info> {
    /// The draw operator.
    pub authority: Signer<'info>,

    /// The draw record.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's key and data are validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_close_draw(ctx: Context<CloseDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let draw = ctx.accounts.lottery.key();
    let mut oracle = SwitchboardOracle::new(
        ctx.accounts.randomness_account_data.to_account_info(),
        ctx.accounts.lottery.oracle,
        &clock,
    );

    let lottery = &mut ctx.accounts.lottery;
    let request_id = Lottery::close(lottery, ctx.accounts.authority.key(), clock.unix_timestamp, &mut oracle)?;

    msg!("Ticket num: {}", lottery.total_tickets());
    msg!("Randomness requested: {}", request_id);
    emit!(RandomnessRequested {
        draw,
        request_id,
        requested_at: clock.unix_timestamp,
    });

    Ok(())
}
