//! Process Failed Withdrawals From Pointer Instruction
//!
//! Permissionless queue drain: attempts full settlement of up to
//! `max_to_process` entries in index order starting at the pointer, and
//! stops without error at the first entry it cannot fully settle. The
//! pointer therefore always bounds a contiguous settled prefix.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::CustodyError;
use crate::events::FailedWithdrawalProcessed;
use crate::instructions::delivery::{find_receiver_token_account, transfer_from_custody};
use crate::state::{AssetConfig, CustodyConfig, WithdrawalQueue};

#[derive(Accounts)]
pub struct ProcessFailedWithdrawalsFromPointer<'info> {
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

    pub token_program: Program<'info, Token>,
    // remaining accounts: receiver token accounts for the entries in range
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ProcessFailedWithdrawalsFromPointer<'info>>,
    max_to_process: u64,
) -> Result<()> {
    let custody_key = ctx.accounts.custody_config.key();
    let stake_mint = ctx.accounts.custody_config.stake_mint;
    let asset_config = &ctx.accounts.stake_asset_config;
    let timestamp = Clock::get()?.unix_timestamp;

    let mut available = ctx.accounts.stake_vault.amount;

    let queue = &mut ctx.accounts.withdrawal_queue;
    let mut pending = Vec::new();
    let settled = queue.drain(max_to_process, true, |_, entry| {
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

    msg!("Processed {} failed withdrawals from pointer", settled.len());
    Ok(())
}
