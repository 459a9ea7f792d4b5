//! Payout delivery helpers shared by the withdrawal instructions
//!
//! A delivery target is an SPL token account for (receiver, stake mint)
//! supplied through remaining accounts. Anything that does not resolve to a
//! valid, initialized account of the right mint and owner counts as a
//! delivery failure and is routed to the queue by the caller.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::state::CustodyConfig;

/// Scan `accounts` for an initialized token account owned by `owner` with
/// mint `mint`. Returns a clone of the matching account info.
pub fn find_receiver_token_account<'info>(
    accounts: &[AccountInfo<'info>],
    owner: &Pubkey,
    mint: &Pubkey,
) -> Option<AccountInfo<'info>> {
    for account in accounts {
        if account.owner != &token::ID {
            continue;
        }
        let Ok(data) = account.try_borrow_data() else {
            continue;
        };
        let parsed = TokenAccount::try_deserialize(&mut &data[..]).ok();
        drop(data);
        if let Some(token_account) = parsed {
            if token_account.owner == *owner && token_account.mint == *mint {
                return Some(account.clone());
            }
        }
    }
    None
}

/// Transfer `amount` of the stake asset out of the custody vault, signed by
/// the config PDA.
pub fn transfer_from_custody<'info>(
    custody_config: &Account<'info, CustodyConfig>,
    stake_vault: &Account<'info, TokenAccount>,
    to: AccountInfo<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let seeds = &[
        b"custody".as_ref(),
        custody_config.stake_mint.as_ref(),
        &[custody_config.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: stake_vault.to_account_info(),
        to,
        authority: custody_config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}
