pub mod admin;
pub mod buy_ticket;
pub mod claim_refund;
pub mod close_draw;
pub mod consume_randomness;
pub mod queries;

pub use admin::*;
pub use buy_ticket::*;
pub use claim_refund::*;
pub use close_draw::*;
pub use consume_randomness::*;
pub use queries::*;
