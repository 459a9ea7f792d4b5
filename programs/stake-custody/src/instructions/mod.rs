//! Instruction handlers for the stake custody program

pub mod admin;
pub mod claim_tokens;
pub mod delivery;
pub mod deposit;
pub mod execute_system_withdrawals;
pub mod initialize;
pub mod process_failed_withdrawal;
pub mod process_failed_withdrawals_from_pointer;
pub mod set_claim_operator;
pub mod swap;
pub mod unwrap;

pub use admin::*;
pub use claim_tokens::*;
pub use deposit::*;
pub use execute_system_withdrawals::*;
pub use initialize::*;
pub use process_failed_withdrawal::*;
pub use process_failed_withdrawals_from_pointer::*;
pub use set_claim_operator::*;
pub use swap::*;
pub use unwrap::*;
