//! Operator approvals for claiming failed withdrawals
//!
//! One account per (owner, operator) pair; the owner can authorize another
//! identity to settle queue entries owed to it.

use anchor_lang::prelude::*;

/// Operator approval account.
///
/// PDA Seeds: `[b"claim_operator", custody_config.key().as_ref(), owner.key().as_ref(), operator.key().as_ref()]`
#[account]
pub struct ClaimOperator {
    /// Reference to parent custody config
    pub custody: Pubkey,

    /// Identity whose withdrawals may be claimed
    pub owner: Pubkey,

    /// Identity granted (or stripped of) the claim right
    pub operator: Pubkey,

    pub approved: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl ClaimOperator {
    pub const LEN: usize = 8 // discriminator
        + 32 // custody
        + 32 // owner
        + 32 // operator
        + 1  // approved
        + 1; // bump

    pub fn initialize(&mut self, custody: Pubkey, owner: Pubkey, operator: Pubkey, bump: u8) {
        self.custody = custody;
        self.owner = owner;
        self.operator = operator;
        self.approved = false;
        self.bump = bump;
    }

    /// True when this account authorizes `caller` to claim for `receiver`.
    pub fn permits(&self, receiver: &Pubkey, caller: &Pubkey) -> bool {
        self.approved && self.owner == *receiver && self.operator == *caller
    }
}
