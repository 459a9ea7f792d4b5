//! Set Claim Operator Instruction
//!
//! Lets an identity authorize (or revoke) another identity to settle failed
//! withdrawals owed to it.

use anchor_lang::prelude::*;

use crate::events::ClaimOperatorUpdated;
use crate::state::{ClaimOperator, CustodyConfig};

#[derive(Accounts)]
pub struct SetClaimOperator<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ClaimOperator::LEN,
        seeds = [
            b"claim_operator",
            custody_config.key().as_ref(),
            owner.key().as_ref(),
            operator.key().as_ref(),
        ],
        bump
    )]
    pub claim_operator: Account<'info, ClaimOperator>,

    /// CHECK: identity being granted the claim right; stored, not read.
    pub operator: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SetClaimOperator>, approved: bool) -> Result<()> {
    let claim_operator = &mut ctx.accounts.claim_operator;

    if claim_operator.owner == Pubkey::default() {
        claim_operator.initialize(
            ctx.accounts.custody_config.key(),
            ctx.accounts.owner.key(),
            ctx.accounts.operator.key(),
            ctx.bumps.claim_operator,
        );
    }
    claim_operator.approved = approved;

    emit!(ClaimOperatorUpdated {
        custody: ctx.accounts.custody_config.key(),
        owner: ctx.accounts.owner.key(),
        operator: ctx.accounts.operator.key(),
        approved,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Claim operator approval set to {}", approved);
    Ok(())
}
