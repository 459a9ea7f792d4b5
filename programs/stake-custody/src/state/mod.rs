//! State account definitions for the stake custody program

pub mod asset_config;
pub mod claim_operator;
pub mod custody_config;
pub mod deposit_tree;
pub mod withdrawal_queue;

pub use asset_config::{AssetConfig, AssetStatus};
pub use claim_operator::ClaimOperator;
pub use custody_config::CustodyConfig;
pub use deposit_tree::DepositTree;
pub use withdrawal_queue::{FailedWithdrawal, SettledWithdrawal, WithdrawalQueue};
