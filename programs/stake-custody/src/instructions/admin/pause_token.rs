//! Pause Token Instruction
//!
//! Admin operation turning an enabled asset exit-only: swap rejects, unwrap
//! keeps working.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::error::CustodyError;
use crate::events::TokenPaused;
use crate::state::{AssetConfig, CustodyConfig};

#[derive(Accounts)]
pub struct PauseToken<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        mut,
        seeds = [b"asset_config", custody_config.key().as_ref(), asset_mint.key().as_ref()],
        bump = asset_config.bump,
    )]
    pub asset_config: Account<'info, AssetConfig>,

    pub asset_mint: Account<'info, Mint>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<PauseToken>) -> Result<()> {
    ctx.accounts.asset_config.pause()?;

    emit!(TokenPaused {
        custody: ctx.accounts.custody_config.key(),
        token: ctx.accounts.asset_mint.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Token paused (exit-only)");
    Ok(())
}
