//! Pause Custody Instruction
//!
//! Emergency stop - disables deposits and swaps. Unwinds and failed
//! withdrawal settlement stay open. Only callable by the custody authority.

use anchor_lang::prelude::*;

use crate::error::CustodyError;
use crate::events::CustodyPausedEvent;
use crate::state::CustodyConfig;

#[derive(Accounts)]
pub struct PauseCustody<'info> {
    #[account(
        mut,
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
        has_one = authority @ CustodyError::Unauthorized,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<PauseCustody>) -> Result<()> {
    let custody_config = &mut ctx.accounts.custody_config;
    require!(!custody_config.paused(), CustodyError::CustodyPaused);

    custody_config.set_paused(true);

    emit!(CustodyPausedEvent {
        custody: custody_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Custody paused by authority");
    Ok(())
}
