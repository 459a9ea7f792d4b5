//! Claim Tokens Instruction
//!
//! Admin recovery of unrelated tokens stranded in a custody-owned account.
//! The stake asset and the wrapped unit can never be claimed this way.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::CustodyError;
use crate::events::TokensClaimed;
use crate::state::CustodyConfig;

#[derive(Accounts)]
pub struct ClaimTokens<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        constraint = claimed_mint.key() != custody_config.stake_mint @ CustodyError::InvalidTokenClaim,
        constraint = claimed_mint.key() != custody_config.wrapped_mint @ CustodyError::InvalidTokenClaim,
    )]
    pub claimed_mint: Account<'info, Mint>,

    /// Stranded account; must be custody-owned and of the claimed mint.
    #[account(
        mut,
        constraint = source.owner == custody_config.key() @ CustodyError::Unauthorized,
        constraint = source.mint == claimed_mint.key() @ CustodyError::InvalidMint,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = receiver_token_account.mint == claimed_mint.key() @ CustodyError::InvalidMint,
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimTokens>) -> Result<()> {
    let amount = ctx.accounts.source.amount;

    let custody_config = &ctx.accounts.custody_config;
    let seeds = &[
        b"custody".as_ref(),
        custody_config.stake_mint.as_ref(),
        &[custody_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.source.to_account_info(),
        to: ctx.accounts.receiver_token_account.to_account_info(),
        authority: custody_config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)?;

    emit!(TokensClaimed {
        custody: custody_config.key(),
        token: ctx.accounts.claimed_mint.key(),
        receiver: ctx.accounts.receiver_token_account.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Claimed {} stranded tokens", amount);
    Ok(())
}
