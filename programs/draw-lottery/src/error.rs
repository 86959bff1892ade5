use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Payment must be a positive multiple of the ticket price")]
    InvalidPayment,
    #[msg("A randomness request is already pending")]
    RequestAlreadyPending,
    #[msg("Randomness can only be requested once ticket sales are closed")]
    WindowNotClosed,
    #[msg("Request id does not match the pending randomness request")]
    UnknownRequest,
    #[msg("Can't choose a winner when there is no ticket")]
    NoParticipants,
    #[msg("The prize has already been paid out")]
    AlreadySettled,
    #[msg("The escrow holds no funds")]
    EscrowEmpty,
    #[msg("Prize transfer to the winner failed")]
    PayoutFailed,
    #[msg("The ticket window has not elapsed yet")]
    WindowStillOpen,
    #[msg("Ticket sales are closed")]
    SalesClosed,
    #[msg("Ticket sales have not started")]
    SalesNotStarted,
    #[msg("The draw is already settled")]
    DrawAlreadySettled,
    #[msg("The draw was cancelled")]
    DrawCancelled,
    #[msg("Randomness was not delivered by the configured oracle")]
    UnauthorizedCallback,
    #[msg("Only the draw operator can do this")]
    NotAuthorized,
    #[msg("Participant list is full")]
    LedgerFull,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Invalid draw configuration")]
    InvalidConfig,
    #[msg("The draw is not awaiting randomness")]
    NotAwaitingRandomness,
    #[msg("The pending randomness request has not timed out")]
    RequestNotTimedOut,
    #[msg("Refunds are only available for cancelled draws")]
    RefundNotAllowed,
    #[msg("Nothing to refund for this participant")]
    NothingToRefund,
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
}
