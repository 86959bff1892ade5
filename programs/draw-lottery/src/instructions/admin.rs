use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::{DrawCancelled, RandomnessReissued};
use crate::state::{DrawParams, Lottery};
use crate::utils::SwitchboardOracle;

/// Accounts required to open a new draw.
/// The signer becomes the draw operator.
#[derive(Accounts)]
#[instruction(draw_id: u64)]
pub struct InitializeDraw<'info> {
    /// The operator, paying for account creation.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The draw record, which also holds the pooled lamports.
    #[account(
        init,
        payer = authority,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED, authority.key().as_ref(), &draw_id.to_le_bytes()],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts for the operator recovery paths of a draw stuck awaiting
/// randomness.
#[derive(Accounts)]
pub struct RetryRandomness<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Freshly committed Switchboard randomness account.
    /// CHECK: The account's key and data are validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct CancelDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Creates the draw record. Ticket sales open at the current cluster time
/// and run for `params.duration` seconds.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeDraw accounts
/// * `draw_id` - Operator-chosen id, part of the account address
/// * `params` - Ticket price, window, request timeout and oracle account
pub fn process_initialize_draw(
    ctx: Context<InitializeDraw>,
    draw_id: u64,
    params: DrawParams,
) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = Lottery::new(
        ctx.bumps.lottery,
        draw_id,
        ctx.accounts.authority.key(),
        params,
        clock.unix_timestamp,
    )?;

    msg!(
        "Draw {} opened: price={} window_end={} oracle={}",
        draw_id,
        lottery.price,
        lottery.window_end(),
        lottery.oracle
    );
    ctx.accounts.lottery.set_inner(lottery);

    Ok(())
}

/// Replaces a randomness request that outlived the draw's request timeout.
/// The replaced request id is dead from here on.
pub fn process_retry_randomness(ctx: Context<RetryRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let draw = ctx.accounts.lottery.key();
    let mut oracle = SwitchboardOracle::new(
        ctx.accounts.randomness_account_data.to_account_info(),
        ctx.accounts.lottery.oracle,
        &clock,
    );

    let lottery = &mut ctx.accounts.lottery;
    let (stale_request_id, request_id) =
        lottery.retry_randomness(ctx.accounts.authority.key(), clock.unix_timestamp, &mut oracle)?;

    msg!("Randomness re-requested: {} replaces {}", request_id, stale_request_id);
    emit!(RandomnessReissued {
        draw,
        stale_request_id,
        request_id,
        requested_at: clock.unix_timestamp,
    });

    Ok(())
}

/// Abandons a draw whose randomness never arrived. Participants then
/// reclaim their payments with `claim_refund`.
pub fn process_cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let draw = ctx.accounts.lottery.key();
    let lottery = &mut ctx.accounts.lottery;
    let pooled = lottery.cancel(ctx.accounts.authority.key(), clock.unix_timestamp)?;

    msg!("Draw {} cancelled with {} lamports in escrow", lottery.draw_id, pooled);
    emit!(DrawCancelled {
        draw,
        cancelled_at: clock.unix_timestamp,
        pooled,
    });

    Ok(())
}
