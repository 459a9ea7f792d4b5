//! Initialize Custody Instruction
//!
//! Creates the custody config, the deposit accumulator, the failed
//! withdrawal queue, the stake custody vault and the wrapped mint in one
//! transaction. The wrapped mint's authority is the config PDA, so wrapped
//! supply can only move through swap/unwrap.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::events::CustodyInitialized;
use crate::state::{CustodyConfig, DepositTree, WithdrawalQueue};

#[derive(Accounts)]
#[instruction(queue_capacity: u32)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = CustodyConfig::LEN,
        seeds = [b"custody", stake_mint.key().as_ref()],
        bump
    )]
    pub custody_config: Box<Account<'info, CustodyConfig>>,

    #[account(
        init,
        payer = authority,
        space = DepositTree::LEN,
        seeds = [b"deposit_tree", custody_config.key().as_ref()],
        bump
    )]
    pub deposit_tree: Box<Account<'info, DepositTree>>,

    #[account(
        init,
        payer = authority,
        space = WithdrawalQueue::space(queue_capacity),
        seeds = [b"withdrawal_queue", custody_config.key().as_ref()],
        bump
    )]
    pub withdrawal_queue: Box<Account<'info, WithdrawalQueue>>,

    #[account(
        init,
        payer = authority,
        token::mint = stake_mint,
        token::authority = custody_config,
        seeds = [b"stake_vault", custody_config.key().as_ref()],
        bump
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        mint::decimals = stake_mint.decimals,
        mint::authority = custody_config,
        seeds = [b"wrapped_mint", custody_config.key().as_ref()],
        bump
    )]
    pub wrapped_mint: Box<Account<'info, Mint>>,

    pub stake_mint: Box<Account<'info, Mint>>,

    /// CHECK: identity designated to submit payout batches; stored, not read.
    pub withdrawal_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Initialize>, queue_capacity: u32) -> Result<()> {
    let custody_config = &mut ctx.accounts.custody_config;
    let deposit_tree = &mut ctx.accounts.deposit_tree;
    let withdrawal_queue = &mut ctx.accounts.withdrawal_queue;

    custody_config.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.withdrawal_authority.key(),
        ctx.accounts.stake_mint.key(),
        ctx.accounts.wrapped_mint.key(),
        ctx.accounts.stake_vault.key(),
        deposit_tree.key(),
        withdrawal_queue.key(),
        ctx.bumps.custody_config,
    );

    deposit_tree.initialize(custody_config.key());
    withdrawal_queue.initialize(custody_config.key(), queue_capacity);

    emit!(CustodyInitialized {
        custody: custody_config.key(),
        authority: ctx.accounts.authority.key(),
        withdrawal_authority: ctx.accounts.withdrawal_authority.key(),
        stake_mint: ctx.accounts.stake_mint.key(),
        wrapped_mint: ctx.accounts.wrapped_mint.key(),
        queue_capacity,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Stake custody initialized");
    Ok(())
}
