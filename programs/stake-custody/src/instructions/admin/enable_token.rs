//! Enable Token Instruction
//!
//! Admin operation configuring an asset for swapping. The first enable
//! creates the asset config and its vault; re-enabling a paused (or already
//! enabled) asset installs a new rate. This is the only place a rate can
//! change.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::CustodyError;
use crate::events::TokenEnabled;
use crate::state::{AssetConfig, CustodyConfig};

#[derive(Accounts)]
pub struct EnableToken<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = AssetConfig::LEN,
        seeds = [b"asset_config", custody_config.key().as_ref(), asset_mint.key().as_ref()],
        bump
    )]
    pub asset_config: Account<'info, AssetConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        token::mint = asset_mint,
        token::authority = custody_config,
        seeds = [b"asset_vault", custody_config.key().as_ref(), asset_mint.key().as_ref()],
        bump
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    pub asset_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EnableToken>, rate: u64) -> Result<()> {
    let asset_config = &mut ctx.accounts.asset_config;

    if asset_config.mint == Pubkey::default() {
        asset_config.initialize(
            ctx.accounts.custody_config.key(),
            ctx.accounts.asset_mint.key(),
            ctx.bumps.asset_config,
        );
    }
    asset_config.enable(rate)?;

    emit!(TokenEnabled {
        custody: ctx.accounts.custody_config.key(),
        token: ctx.accounts.asset_mint.key(),
        rate,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Token enabled at rate {}", rate);
    Ok(())
}
