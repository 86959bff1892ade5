use anchor_lang::prelude::*;

pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::*;

declare_id!("2RTh2Y4e2N421EbSnUYTKdGqDHJH7etxZb3VrWDMpNMY");

#[program]
pub mod draw_lottery {
    use super::*;

    pub fn initialize_draw(
        ctx: Context<InitializeDraw>,
        draw_id: u64,
        params: DrawParams,
    ) -> Result<()> {
        process_initialize_draw(ctx, draw_id, params)
    }

    pub fn buy_tickets(ctx: Context<BuyTicket>, amount: u64) -> Result<()> {
        process_buy_tickets(ctx, amount)
    }

    /// Operator only. Ends ticket sales and commits to Switchboard randomness.
    pub fn close_draw(ctx: Context<CloseDraw>) -> Result<()> {
        process_close_draw(ctx)
    }

    /// Oracle callback: settles the draw with revealed randomness.
    pub fn consume_randomness(ctx: Context<ConsumeRandomness>, request_id: u64) -> Result<()> {
        process_consume_randomness(ctx, request_id)
    }

    pub fn retry_randomness(ctx: Context<RetryRandomness>) -> Result<()> {
        process_retry_randomness(ctx)
    }

    pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
        process_cancel_draw(ctx)
    }

    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        process_claim_refund(ctx)
    }

    pub fn get_draw_summary(ctx: Context<ReadDraw>) -> Result<DrawSummary> {
        process_draw_summary(ctx)
    }

    pub fn get_ticket_count(ctx: Context<ReadDraw>, participant: Pubkey) -> Result<u64> {
        process_ticket_count(ctx, participant)
    }
}
