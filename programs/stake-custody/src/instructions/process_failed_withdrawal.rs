//! Process Failed Withdrawal Instruction
//!
//! Settles one queue entry, fully or partially. Callable by the withdrawal
//! authority, the entry's receiver, or an operator the receiver approved.
//! `amount == 0` requests the full remaining owed amount. The owed reduction
//! and pointer advancement are committed before the token transfer.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::CustodyError;
use crate::events::FailedWithdrawalProcessed;
use crate::instructions::delivery::transfer_from_custody;
use crate::state::{AssetConfig, ClaimOperator, CustodyConfig, WithdrawalQueue};

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct ProcessFailedWithdrawal<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
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

    #[account(
        seeds = [b"asset_config", custody_config.key().as_ref(), custody_config.stake_mint.as_ref()],
        bump = stake_asset_config.bump,
    )]
    pub stake_asset_config: Account<'info, AssetConfig>,

    /// Destination; must belong to the entry's receiver (checked in the
    /// handler against the queue entry).
    #[account(
        mut,
        constraint = receiver_token_account.mint == custody_config.stake_mint @ CustodyError::InvalidMint,
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

    pub caller: Signer<'info>,

    /// Operator approval for (receiver, caller); only consulted when the
    /// caller is neither the withdrawal authority nor the receiver.
    #[account(
        constraint = claim_operator.custody == custody_config.key() @ CustodyError::Unauthorized,
    )]
    pub claim_operator: Option<Account<'info, ClaimOperator>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ProcessFailedWithdrawal>, index: u64, amount: u64) -> Result<()> {
    let queue = &mut ctx.accounts.withdrawal_queue;
    let entry = queue.entry(index)?;
    let receiver = entry.receiver;
    let owed = entry.amount_owed;
    require!(owed > 0, CustodyError::WithdrawalAlreadySettled);

    // Capability check: authority, the receiver itself, or an approved
    // operator of the receiver.
    let caller = ctx.accounts.caller.key();
    let authorized = caller == ctx.accounts.custody_config.withdrawal_authority
        || caller == receiver
        || ctx
            .accounts
            .claim_operator
            .as_ref()
            .map(|op| op.permits(&receiver, &caller))
            .unwrap_or(false);
    require!(authorized, CustodyError::Unauthorized);

    require!(
        ctx.accounts.receiver_token_account.owner == receiver,
        CustodyError::InvalidReceiverAccount
    );

    let pay = if amount == 0 { owed } else { amount };
    require!(pay <= owed, CustodyError::AmountExceedsOwed);

    let asset_amount = ctx.accounts.stake_asset_config.wrapped_to_asset(pay)?;
    require!(
        asset_amount <= ctx.accounts.stake_vault.amount,
        CustodyError::InsufficientBacking
    );

    // Effects before the external transfer.
    let remaining = queue.settle(index, pay)?;

    transfer_from_custody(
        &ctx.accounts.custody_config,
        &ctx.accounts.stake_vault,
        ctx.accounts.receiver_token_account.to_account_info(),
        &ctx.accounts.token_program,
        asset_amount,
    )?;

    emit!(FailedWithdrawalProcessed {
        custody: ctx.accounts.custody_config.key(),
        index,
        receiver,
        amount: pay,
        remaining,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Failed withdrawal {} processed: {} paid, {} remaining",
        index,
        pay,
        remaining
    );
    Ok(())
}
