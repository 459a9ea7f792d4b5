//! Unpause Custody Instruction

use anchor_lang::prelude::*;

use crate::error::CustodyError;
use crate::events::CustodyUnpausedEvent;
use crate::state::CustodyConfig;

#[derive(Accounts)]
pub struct UnpauseCustody<'info> {
    #[account(
        mut,
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UnpauseCustody>) -> Result<()> {
    let custody_config = &mut ctx.accounts.custody_config;
    require!(custody_config.paused(), CustodyError::CustodyNotPaused);

    custody_config.set_paused(false);

    emit!(CustodyUnpausedEvent {
        custody: custody_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Custody unpaused by authority");
    Ok(())
}
