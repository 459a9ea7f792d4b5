//! Swap Instruction
//!
//! Pulls an enabled asset from the caller and mints the wrapped accounting
//! unit at the configured rate. An optional authorization payload is
//! forwarded, byte-for-byte, to a caller-supplied permit program before the
//! pull; the custody never interprets it (gasless-approval collaborator).

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::error::CustodyError;
use crate::events::TokenSwapped;
use crate::state::{AssetConfig, CustodyConfig};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        mut,
        seeds = [b"asset_config", custody_config.key().as_ref(), asset_mint.key().as_ref()],
        bump = asset_config.bump,
    )]
    pub asset_config: Account<'info, AssetConfig>,

    pub asset_mint: Account<'info, Mint>,

    /// Vault holding the backing for this asset.
    #[account(
        mut,
        seeds = [b"asset_vault", custody_config.key().as_ref(), asset_mint.key().as_ref()],
        bump,
        constraint = asset_vault.mint == asset_mint.key() @ CustodyError::InvalidMint,
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = custody_config.wrapped_mint @ CustodyError::InvalidMint,
    )]
    pub wrapped_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == asset_mint.key() @ CustodyError::InvalidMint,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_wrapped_account.mint == custody_config.wrapped_mint @ CustodyError::InvalidMint,
    )]
    pub user_wrapped_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: gasless-approval verifier; only invoked with the raw
    /// authorization payload, never read.
    pub permit_program: Option<UncheckedAccount<'info>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Swap>, amount: u64, authorization: Vec<u8>) -> Result<()> {
    ctx.accounts.custody_config.require_not_paused()?;
    ctx.accounts.asset_config.require_swappable()?;
    require!(amount > 0, CustodyError::InvalidDepositAmount);

    let wrapped_out = ctx.accounts.asset_config.asset_to_wrapped(amount)?;

    // Forward the signed authorization to the permit program before the
    // pull; a one-time allowance is expected to exist afterwards.
    if !authorization.is_empty() {
        let permit_program = ctx
            .accounts
            .permit_program
            .as_ref()
            .ok_or(error!(CustodyError::MissingPermitProgram))?;
        let ix = Instruction {
            program_id: permit_program.key(),
            accounts: vec![
                AccountMeta::new_readonly(ctx.accounts.user.key(), true),
                AccountMeta::new(ctx.accounts.user_token_account.key(), false),
            ],
            data: authorization,
        };
        invoke(
            &ix,
            &[
                ctx.accounts.user.to_account_info(),
                ctx.accounts.user_token_account.to_account_info(),
            ],
        )?;
    }

    // Pull the asset into the vault.
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.asset_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    // Mint the wrapped unit to the caller.
    let custody_config = &ctx.accounts.custody_config;
    let seeds = &[
        b"custody".as_ref(),
        custody_config.stake_mint.as_ref(),
        &[custody_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];
    let cpi_accounts = MintTo {
        mint: ctx.accounts.wrapped_mint.to_account_info(),
        to: ctx.accounts.user_wrapped_account.to_account_info(),
        authority: custody_config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::mint_to(cpi_ctx, wrapped_out)?;

    ctx.accounts.asset_config.note_minted(wrapped_out)?;

    emit!(TokenSwapped {
        custody: ctx.accounts.custody_config.key(),
        token: ctx.accounts.asset_mint.key(),
        caller: ctx.accounts.user.key(),
        amount_in: amount,
        wrapped_out,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Swapped {} for {} wrapped units", amount, wrapped_out);
    Ok(())
}
