//! Authority Rotation Instructions
//!
//! Role-to-identity updates: the admin authority and the withdrawal
//! authority are plain pubkeys consulted at the top of each privileged
//! operation; rotating one is a single stored-field write.

use anchor_lang::prelude::*;

use crate::error::CustodyError;
use crate::events::{AuthorityUpdated, WithdrawalAuthorityUpdated};
use crate::state::CustodyConfig;

#[derive(Accounts)]
pub struct UpdateAuthority<'info> {
    #[account(
        mut,
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    pub authority: Signer<'info>,
}

pub fn update_authority_handler(
    ctx: Context<UpdateAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let custody_config = &mut ctx.accounts.custody_config;
    let old_authority = custody_config.authority;

    custody_config.transfer_authority(new_authority);

    emit!(AuthorityUpdated {
        custody: custody_config.key(),
        old_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Custody authority rotated");
    Ok(())
}

pub fn set_withdrawal_authority_handler(
    ctx: Context<UpdateAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let custody_config = &mut ctx.accounts.custody_config;
    let old_authority = custody_config.withdrawal_authority;

    custody_config.set_withdrawal_authority(new_authority);

    emit!(WithdrawalAuthorityUpdated {
        custody: custody_config.key(),
        old_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Withdrawal authority rotated");
    Ok(())
}
