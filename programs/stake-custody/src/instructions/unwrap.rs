//! Unwrap Instruction
//!
//! Burns wrapped units from the caller and releases the backing asset at
//! the configured rate. Stays open while the asset (or the whole custody)
//! is paused so holders always keep an exit; only a never-configured asset
//! rejects. Releases are bounded by actual vault custody, which is the
//! surplus >= 0 gate when wrapped value was credited ahead of backing.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount};

use crate::error::CustodyError;
use crate::events::TokenUnwrapped;
use crate::state::{AssetConfig, CustodyConfig};

#[derive(Accounts)]
pub struct Unwrap<'info> {
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

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Unwrap>, amount: u64) -> Result<()> {
    ctx.accounts.asset_config.require_unwrappable()?;
    require!(amount > 0, CustodyError::InvalidDepositAmount);

    let asset_out = ctx.accounts.asset_config.wrapped_to_asset(amount)?;
    require!(
        asset_out <= ctx.accounts.asset_vault.amount,
        CustodyError::InsufficientBacking
    );

    // Burn first, release after.
    let cpi_accounts = Burn {
        mint: ctx.accounts.wrapped_mint.to_account_info(),
        from: ctx.accounts.user_wrapped_account.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::burn(cpi_ctx, amount)?;

    ctx.accounts.asset_config.note_burned(amount);

    let custody_config = &ctx.accounts.custody_config;
    let seeds = &[
        b"custody".as_ref(),
        custody_config.stake_mint.as_ref(),
        &[custody_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];
    let cpi_accounts = token::Transfer {
        from: ctx.accounts.asset_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: custody_config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, asset_out)?;

    emit!(TokenUnwrapped {
        custody: ctx.accounts.custody_config.key(),
        token: ctx.accounts.asset_mint.key(),
        caller: ctx.accounts.user.key(),
        wrapped_in: amount,
        amount_out: asset_out,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Unwrapped {} into {} asset units", amount, asset_out);
    Ok(())
}
