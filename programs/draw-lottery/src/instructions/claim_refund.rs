use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::RefundIssued;
use crate::state::Lottery;
use crate::utils::LamportTransfer;

/// Accounts for reclaiming a ticket payment from a cancelled draw.
#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    /// The participant; receives the refund.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The cancelled draw.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Returns `tickets * price` to the caller. Each participant can do this
/// once, and only after the operator cancelled the draw.
pub fn process_claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
    let draw = ctx.accounts.lottery.key();
    let participant = ctx.accounts.payer.key();
    let lottery_info = ctx.accounts.lottery.to_account_info();
    let reserve = Rent::get()?.minimum_balance(lottery_info.data_len());
    let mut transfer =
        LamportTransfer::new(lottery_info, ctx.accounts.payer.to_account_info(), reserve);

    let amount = ctx.accounts.lottery.claim_refund(participant, &mut transfer)?;

    msg!("Refunded {} lamports to {}", amount, participant);
    emit!(RefundIssued {
        draw,
        participant,
        amount,
    });

    Ok(())
}
