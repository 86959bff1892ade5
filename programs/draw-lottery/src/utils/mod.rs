pub mod lamports;
pub mod switchboard;

pub use lamports::LamportTransfer;
pub use switchboard::{revealed_value, SwitchboardOracle};
