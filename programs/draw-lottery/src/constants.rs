use anchor_lang::prelude::*;

/// Seed prefix of every draw account: `[LOTTERY_SEED, operator, draw_id]`.
#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Upper bound on distinct ticket holders in one draw; sizes the draw account.
pub const MAX_PARTICIPANTS: usize = 128;

/// Used when `DrawParams::request_timeout` is not supplied (one hour).
#[constant]
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: i64 = 60 * 60;
