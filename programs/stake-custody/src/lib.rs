//! Stake Custody Program
//!
//! Value-custody ledger for a staking system: an append-only Merkle
//! accumulator over validator deposit records, a failure-tolerant
//! withdrawal distributor with a retry queue, and a conversion vault
//! between the native staking asset and a wrapped accounting unit.

use anchor_lang::prelude::*;

pub mod crypto;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod tests;

use instructions::*;

declare_id!("EsfttawjDyaCdNGfaRMACTHsdqQs2WoP5GX4b11maVn7");

#[program]
pub mod stake_custody {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, queue_capacity: u32) -> Result<()> {
        instructions::initialize::handler(ctx, queue_capacity)
    }

    pub fn deposit(
        ctx: Context<Deposit>,
        pubkey: [u8; 48],
        withdrawal_credentials: [u8; 32],
        signature: [u8; 96],
        deposit_data_root: [u8; 32],
        amount: u64,
    ) -> Result<()> {
        instructions::deposit::handler(
            ctx,
            pubkey,
            withdrawal_credentials,
            signature,
            deposit_data_root,
            amount,
        )
    }

    pub fn batch_deposit(
        ctx: Context<Deposit>,
        pubkeys: Vec<u8>,
        withdrawal_credentials: [u8; 32],
        signatures: Vec<u8>,
        deposit_data_roots: Vec<[u8; 32]>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::deposit::batch_handler(
            ctx,
            pubkeys,
            withdrawal_credentials,
            signatures,
            deposit_data_roots,
            amounts,
        )
    }

    pub fn execute_system_withdrawals<'info>(
        ctx: Context<'_, '_, '_, 'info, ExecuteSystemWithdrawals<'info>>,
        max_retries: u64,
        amounts: Vec<u64>,
        receivers: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::execute_system_withdrawals::handler(ctx, max_retries, amounts, receivers)
    }

    pub fn process_failed_withdrawal(
        ctx: Context<ProcessFailedWithdrawal>,
        index: u64,
        amount: u64,
    ) -> Result<()> {
        instructions::process_failed_withdrawal::handler(ctx, index, amount)
    }

    pub fn process_failed_withdrawals_from_pointer<'info>(
        ctx: Context<'_, '_, '_, 'info, ProcessFailedWithdrawalsFromPointer<'info>>,
        max_to_process: u64,
    ) -> Result<()> {
        instructions::process_failed_withdrawals_from_pointer::handler(ctx, max_to_process)
    }

    pub fn swap(ctx: Context<Swap>, amount: u64, authorization: Vec<u8>) -> Result<()> {
        instructions::swap::handler(ctx, amount, authorization)
    }

    pub fn unwrap(ctx: Context<Unwrap>, amount: u64) -> Result<()> {
        instructions::unwrap::handler(ctx, amount)
    }

    pub fn enable_token(ctx: Context<EnableToken>, rate: u64) -> Result<()> {
        instructions::admin::enable_token::handler(ctx, rate)
    }

    pub fn pause_token(ctx: Context<PauseToken>) -> Result<()> {
        instructions::admin::pause_token::handler(ctx)
    }

    pub fn set_claim_operator(ctx: Context<SetClaimOperator>, approved: bool) -> Result<()> {
        instructions::set_claim_operator::handler(ctx, approved)
    }

    pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<()> {
        instructions::claim_tokens::handler(ctx)
    }

    pub fn pause(ctx: Context<PauseCustody>) -> Result<()> {
        instructions::admin::pause::handler(ctx)
    }

    pub fn unpause(ctx: Context<UnpauseCustody>) -> Result<()> {
        instructions::admin::unpause::handler(ctx)
    }

    pub fn update_authority(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::update_authority::update_authority_handler(ctx, new_authority)
    }

    pub fn set_withdrawal_authority(
        ctx: Context<UpdateAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::admin::update_authority::set_withdrawal_authority_handler(ctx, new_authority)
    }
}
