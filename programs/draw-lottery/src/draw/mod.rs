//! Draw logic, kept free of account plumbing so it runs in plain unit tests.

pub mod coordinator;
pub mod escrow;
pub mod ledger;
pub mod machine;
pub mod selector;

pub use coordinator::{RandomnessCoordinator, RandomnessOracle, RequestId};
pub use escrow::{PrizeEscrow, PrizeTransfer};
pub use ledger::{Entry, ParticipantLedger};
pub use machine::{Purchase, Settlement};
