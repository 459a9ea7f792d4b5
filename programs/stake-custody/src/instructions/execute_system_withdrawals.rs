//! Execute System Withdrawals Instruction
//!
//! Periodic payout batch, restricted to the withdrawal authority. Runs two
//! phases:
//!
//! 1. Drain: retry up to `max_retries` queued entries from the pointer.
//!    Entries that still cannot be delivered keep their index and owed
//!    amount; the pointer only crosses the contiguous settled prefix.
//! 2. Fresh deliveries: one attempt per (amount, receiver) pair. A zero
//!    amount is a silent no-op reserved for "no withdrawal this slot"; the
//!    default pubkey drops the value irrecoverably (an unclaimable
//!    validator); any other delivery failure is recorded in the queue. The
//!    call itself only rejects on malformed input or a wrong caller.
//!
//! Amounts are wrapped base units; delivery converts to the stake asset at
//! the vault rate and pays from the custody vault. Queue bookkeeping for
//! each entry is committed before its token transfer is made.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::CustodyError;
use crate::events::{FailedWithdrawalProcessed, WithdrawalExecuted, WithdrawalFailed};
use crate::instructions::delivery::{find_receiver_token_account, transfer_from_custody};
use crate::state::{AssetConfig, CustodyConfig, WithdrawalQueue};

#[derive(Accounts)]
pub struct ExecuteSystemWithdrawals<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = withdrawal_authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        mut,
        seeds = [b"withdrawal_queue", custody_config.key().as_ref()],
        bump,
        constraint = withdrawal_queue.custody == custody_config.key() @ CustodyError::Unauthorized,
    )]
    pub withdrawal_queue: Account<'info, WithdrawalQueue>,

    #[account(
        mut,
        seeds = [b"stake_vault", custody_config.key().as_ref()],
        bump,
        constraint = stake_vault.mint == custody_config.stake_mint @ CustodyError::InvalidMint,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Conversion config of the stake asset; its rate maps wrapped payout
    /// amounts onto custody units.
    #[account(
        seeds = [b"asset_config", custody_config.key().as_ref(), custody_config.stake_mint.as_ref()],
        bump = stake_asset_config.bump,
    )]
    pub stake_asset_config: Account<'info, AssetConfig>,

    pub withdrawal_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // remaining accounts: candidate receiver token accounts for the stake mint
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ExecuteSystemWithdrawals<'info>>,
    max_retries: u64,
    amounts: Vec<u64>,
    receivers: Vec<Pubkey>,
) -> Result<()> {
    require!(amounts.len() == receivers.len(), CustodyError::LengthMismatch);

    let custody_key = ctx.accounts.custody_config.key();
    let stake_mint = ctx.accounts.custody_config.stake_mint;
    let asset_config = &ctx.accounts.stake_asset_config;
    let timestamp = Clock::get()?.unix_timestamp;

    let mut available = ctx.accounts.stake_vault.amount;

    // ===== Phase 1: drain queued retries =====

    let queue = &mut ctx.accounts.withdrawal_queue;
    let mut pending = Vec::new();
    let settled = queue.drain(max_retries, false, |_, entry| {
        let Ok(asset_amount) = asset_config.wrapped_to_asset(entry.amount_owed) else {
            return false;
        };
        if asset_amount > available {
            return false;
        }
        let Some(to) =
            find_receiver_token_account(ctx.remaining_accounts, &entry.receiver, &stake_mint)
        else {
            return false;
        };
        available -= asset_amount;
        pending.push((to, asset_amount));
        true
    })?;

    for (settlement, (to, asset_amount)) in settled.iter().zip(pending) {
        transfer_from_custody(
            &ctx.accounts.custody_config,
            &ctx.accounts.stake_vault,
            to,
            &ctx.accounts.token_program,
            asset_amount,
        )?;
        emit!(FailedWithdrawalProcessed {
            custody: custody_key,
            index: settlement.index,
            receiver: settlement.receiver,
            amount: settlement.amount,
            remaining: 0,
            timestamp,
        });
    }

    // ===== Phase 2: fresh deliveries =====

    let mut failures = 0u64;
    for (&amount, &receiver) in amounts.iter().zip(receivers.iter()) {
        if amount == 0 {
            // Authority signaling "no withdrawal this slot" for the index.
            continue;
        }
        if receiver == Pubkey::default() {
            // Unreachable destination; the value is dropped, not queued.
            msg!("Dropping withdrawal of {} to the zero address", amount);
            continue;
        }

        let asset_amount = asset_config.wrapped_to_asset(amount)?;
        let target = if asset_amount <= available {
            find_receiver_token_account(ctx.remaining_accounts, &receiver, &stake_mint)
        } else {
            None
        };

        match target {
            Some(to) => {
                available -= asset_amount;
                transfer_from_custody(
                    &ctx.accounts.custody_config,
                    &ctx.accounts.stake_vault,
                    to,
                    &ctx.accounts.token_program,
                    asset_amount,
                )?;
                emit!(WithdrawalExecuted {
                    custody: custody_key,
                    receiver,
                    amount,
                    asset_amount,
                    timestamp,
                });
            }
            None => {
                let index = ctx
                    .accounts
                    .withdrawal_queue
                    .record_failure(receiver, amount)?;
                failures += 1;
                emit!(WithdrawalFailed {
                    custody: custody_key,
                    index,
                    receiver,
                    amount,
                    timestamp,
                });
            }
        }
    }

    msg!(
        "System withdrawals executed: {} fresh, {} queued",
        amounts.len(),
        failures
    );
    Ok(())
}
