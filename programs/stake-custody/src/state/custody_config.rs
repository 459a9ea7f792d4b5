//! Top-level custody configuration account
//!
//! Holds the role-to-identity mapping (admin authority, withdrawal
//! authority), the mints and vault this custody operates on, and the global
//! pause flag.

use anchor_lang::prelude::*;

use crate::error::CustodyError;

/// Main custody configuration account.
///
/// PDA Seeds: `[b"custody", stake_mint.key().as_ref()]`
#[account]
pub struct CustodyConfig {
    /// Admin - can pause, enable/pause tokens, rotate authorities
    pub authority: Pubkey,

    /// Privileged caller allowed to submit payout batches
    pub withdrawal_authority: Pubkey,

    /// Native staking asset mint
    pub stake_mint: Pubkey,

    /// Wrapped accounting unit mint (mint authority = this config PDA)
    pub wrapped_mint: Pubkey,

    /// Stake custody vault PDA (cached for convenience)
    pub stake_vault: Pubkey,

    /// Deposit accumulator account address (cached for convenience)
    pub deposit_tree: Pubkey,

    /// Withdrawal queue account address (cached for convenience)
    pub withdrawal_queue: Pubkey,

    /// Blocks deposits and swaps when true; exits stay open
    pub is_paused: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 64],
}

impl CustodyConfig {
    pub const LEN: usize = 8 // discriminator
        + 32 // authority
        + 32 // withdrawal_authority
        + 32 // stake_mint
        + 32 // wrapped_mint
        + 32 // stake_vault
        + 32 // deposit_tree
        + 32 // withdrawal_queue
        + 1  // is_paused
        + 1  // bump
        + 64; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        withdrawal_authority: Pubkey,
        stake_mint: Pubkey,
        wrapped_mint: Pubkey,
        stake_vault: Pubkey,
        deposit_tree: Pubkey,
        withdrawal_queue: Pubkey,
        bump: u8,
    ) {
        self.authority = authority;
        self.withdrawal_authority = withdrawal_authority;
        self.stake_mint = stake_mint;
        self.wrapped_mint = wrapped_mint;
        self.stake_vault = stake_vault;
        self.deposit_tree = deposit_tree;
        self.withdrawal_queue = withdrawal_queue;
        self.is_paused = false;
        self.bump = bump;
        self._reserved = [0u8; 64];
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, CustodyError::CustodyPaused);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn paused(&self) -> bool {
        self.is_paused
    }

    pub fn transfer_authority(&mut self, new_authority: Pubkey) {
        self.authority = new_authority;
    }

    pub fn set_withdrawal_authority(&mut self, new_authority: Pubkey) {
        self.withdrawal_authority = new_authority;
    }
}
