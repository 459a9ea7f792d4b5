//! Per-asset conversion configuration
//!
//! Each swappable token gets one config account holding its status, the
//! wrapped-per-asset conversion rate and the circulating wrapped supply
//! ascribed to it. Rates are fixed-point with [`RATE_UNIT`] scaling:
//! `wrapped = asset * rate / RATE_UNIT`.

use anchor_lang::prelude::*;

use crate::error::CustodyError;

/// Fixed-point scale of `AssetConfig::rate`.
pub const RATE_UNIT: u64 = 1_000_000_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    /// Never enabled; the config account should not exist in this state
    Disabled,
    /// Swap and unwrap both allowed
    Enabled,
    /// Exit-only: unwrap allowed, swap rejected
    Paused,
}

/// Conversion config for one asset mint.
///
/// PDA Seeds: `[b"asset_config", custody_config.key().as_ref(), mint.key().as_ref()]`
#[account]
pub struct AssetConfig {
    /// Reference to parent custody config
    pub custody: Pubkey,

    /// Asset mint this config describes
    pub mint: Pubkey,

    pub status: AssetStatus,

    /// Wrapped base units minted per asset base unit, scaled by RATE_UNIT.
    /// Replaceable only through enable_token.
    pub rate: u64,

    /// Wrapped supply minted against this asset and not yet burned
    pub wrapped_minted: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl AssetConfig {
    pub const LEN: usize = 8 // discriminator
        + 32 // custody
        + 32 // mint
        + 1  // status
        + 8  // rate
        + 8  // wrapped_minted
        + 1; // bump

    /// Initialize a fresh config (first enable_token for this mint).
    pub fn initialize(&mut self, custody: Pubkey, mint: Pubkey, bump: u8) {
        self.custody = custody;
        self.mint = mint;
        self.status = AssetStatus::Disabled;
        self.rate = 0;
        self.wrapped_minted = 0;
        self.bump = bump;
    }

    /// Enable (or re-enable) the asset at the given rate.
    ///
    /// The rate is only replaceable here; swap/unwrap never touch it.
    pub fn enable(&mut self, rate: u64) -> Result<()> {
        require!(rate > 0, CustodyError::InvalidRate);
        self.status = AssetStatus::Enabled;
        self.rate = rate;
        Ok(())
    }

    /// Pause entry; unwind stays open so holders keep an exit.
    pub fn pause(&mut self) -> Result<()> {
        require!(
            self.status == AssetStatus::Enabled,
            CustodyError::TokenNotEnabled
        );
        self.status = AssetStatus::Paused;
        Ok(())
    }

    pub fn require_swappable(&self) -> Result<()> {
        require!(
            self.status == AssetStatus::Enabled,
            CustodyError::TokenNotEnabled
        );
        Ok(())
    }

    pub fn require_unwrappable(&self) -> Result<()> {
        require!(
            self.status != AssetStatus::Disabled,
            CustodyError::TokenNotConfigured
        );
        Ok(())
    }

    /// Wrapped value credited for depositing `asset_amount`.
    pub fn asset_to_wrapped(&self, asset_amount: u64) -> Result<u64> {
        let out = (asset_amount as u128)
            .checked_mul(self.rate as u128)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?
            / RATE_UNIT as u128;
        u64::try_from(out).map_err(|_| error!(CustodyError::ArithmeticOverflow))
    }

    /// Asset released for burning `wrapped_amount`; truncates.
    pub fn wrapped_to_asset(&self, wrapped_amount: u64) -> Result<u64> {
        require!(self.rate > 0, CustodyError::InvalidRate);
        let out = (wrapped_amount as u128)
            .checked_mul(RATE_UNIT as u128)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?
            / self.rate as u128;
        u64::try_from(out).map_err(|_| error!(CustodyError::ArithmeticOverflow))
    }

    pub fn note_minted(&mut self, wrapped_amount: u64) -> Result<()> {
        self.wrapped_minted = self
            .wrapped_minted
            .checked_add(wrapped_amount)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?;
        Ok(())
    }

    /// Saturating: wrapped supply minted against one asset may be unwound
    /// against another, so the ascribed figure can reach zero first.
    pub fn note_burned(&mut self, wrapped_amount: u64) {
        self.wrapped_minted = self.wrapped_minted.saturating_sub(wrapped_amount);
    }

    /// Custody minus circulating wrapped supply, in wrapped terms.
    ///
    /// May go negative when wrapped value was credited ahead of matching
    /// backing; unwinds are bounded by actual custody until it recovers.
    pub fn surplus(&self, custody_balance: u64) -> Result<i128> {
        let custody_wrapped = (custody_balance as u128)
            .checked_mul(self.rate as u128)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?
            / RATE_UNIT as u128;
        Ok(custody_wrapped as i128 - self.wrapped_minted as i128)
    }
}
