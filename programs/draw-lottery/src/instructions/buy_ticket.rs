use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::LOTTERY_SEED;
use crate::events::TicketsPurchased;
use crate::state::Lottery;

/// Accounts required to buy lottery tickets.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The participant paying for the tickets.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Draw record tracking the current lottery; receives the payment.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref(), &lottery.draw_id.to_le_bytes()],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Buys `amount / price` tickets for the caller.
///
/// Steps performed:
/// 1. Check the draw is open and the payment is a multiple of the price.
/// 2. Record the tickets and pool the payment.
/// 3. Transfer SOL from payer to the draw account.
///
/// # Arguments
/// * `ctx` - Context containing BuyTicket accounts
/// * `amount` - Lamports paid
pub fn process_buy_tickets(ctx: Context<BuyTicket>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let draw = ctx.accounts.lottery.key();
    let participant = ctx.accounts.payer.key();

    let purchase = ctx
        .accounts
        .lottery
        .buy_tickets(participant, amount, clock.unix_timestamp)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.lottery.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!(
        "{} now holds {} tickets ({} in draw, {} lamports pooled)",
        participant,
        purchase.tickets,
        purchase.total_tickets,
        purchase.pooled
    );
    emit!(TicketsPurchased {
        draw,
        participant,
        amount,
        tickets: purchase.tickets,
        total_tickets: purchase.total_tickets,
    });

    Ok(())
}
