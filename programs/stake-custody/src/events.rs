//! Events for the stake custody program

use anchor_lang::prelude::*;

#[event]
pub struct CustodyInitialized {
    pub custody: Pubkey,
    pub authority: Pubkey,
    pub withdrawal_authority: Pubkey,
    pub stake_mint: Pubkey,
    pub wrapped_mint: Pubkey,
    pub queue_capacity: u32,
    pub timestamp: i64,
}

#[event]
pub struct DepositRecorded {
    pub custody: Pubkey,
    /// Pre-increment deposit count, i.e. the record's index.
    pub index: u64,
    pub pubkey: [u8; 48],
    pub withdrawal_credentials: [u8; 32],
    pub amount: u64,
    pub deposit_root: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct WithdrawalExecuted {
    pub custody: Pubkey,
    pub receiver: Pubkey,
    /// Payout in wrapped base units, as submitted by the authority.
    pub amount: u64,
    /// Stake asset actually delivered after conversion.
    pub asset_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct WithdrawalFailed {
    pub custody: Pubkey,
    pub index: u64,
    pub receiver: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct FailedWithdrawalProcessed {
    pub custody: Pubkey,
    pub index: u64,
    pub receiver: Pubkey,
    /// Settled portion, in wrapped base units.
    pub amount: u64,
    pub remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokenSwapped {
    pub custody: Pubkey,
    pub token: Pubkey,
    pub caller: Pubkey,
    pub amount_in: u64,
    pub wrapped_out: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokenUnwrapped {
    pub custody: Pubkey,
    pub token: Pubkey,
    pub caller: Pubkey,
    pub wrapped_in: u64,
    pub amount_out: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokenEnabled {
    pub custody: Pubkey,
    pub token: Pubkey,
    pub rate: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokenPaused {
    pub custody: Pubkey,
    pub token: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CustodyPausedEvent {
    pub custody: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CustodyUnpausedEvent {
    pub custody: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityUpdated {
    pub custody: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct WithdrawalAuthorityUpdated {
    pub custody: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ClaimOperatorUpdated {
    pub custody: Pubkey,
    pub owner: Pubkey,
    pub operator: Pubkey,
    pub approved: bool,
    pub timestamp: i64,
}

#[event]
pub struct TokensClaimed {
    pub custody: Pubkey,
    pub token: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
