//! Deposit Instructions
//!
//! Accepts validator deposit records, pulls the backing stake into custody
//! and appends the record's commitment to the accumulator. The commitment
//! root is recomputed on-chain from the submitted fields and compared with
//! the caller-supplied root, so records mangled off-chain never enter the
//! tree.
//!
//! `batch_deposit` takes the original concatenated wire form: one shared
//! withdrawal credential, `48 * n` bytes of pubkeys, `96 * n` bytes of
//! signatures and per-record roots/amounts. Validation is all-or-nothing;
//! the summed stake is pulled in a single transfer.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::crypto::compute_deposit_data_root;
use crate::error::CustodyError;
use crate::events::DepositRecorded;
use crate::state::deposit_tree::DEPOSIT_AMOUNT_UNIT;
use crate::state::{CustodyConfig, DepositTree};

pub const PUBKEY_LENGTH: usize = 48;
pub const SIGNATURE_LENGTH: usize = 96;

/// Accounts shared by the single and batched deposit instructions.
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        seeds = [b"custody", custody_config.stake_mint.as_ref()],
        bump = custody_config.bump,
    )]
    pub custody_config: Account<'info, CustodyConfig>,

    #[account(
        mut,
        seeds = [b"deposit_tree", custody_config.key().as_ref()],
        bump,
        constraint = deposit_tree.custody == custody_config.key() @ CustodyError::Unauthorized,
    )]
    pub deposit_tree: Account<'info, DepositTree>,

    /// Stake custody vault (receives the pulled stake).
    #[account(
        mut,
        seeds = [b"stake_vault", custody_config.key().as_ref()],
        bump,
        constraint = stake_vault.mint == custody_config.stake_mint @ CustodyError::InvalidMint,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Depositor's source token account.
    #[account(
        mut,
        constraint = depositor_token_account.mint == custody_config.stake_mint @ CustodyError::InvalidMint,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<Deposit>,
    pubkey: [u8; 48],
    withdrawal_credentials: [u8; 32],
    signature: [u8; 96],
    deposit_data_root: [u8; 32],
    amount: u64,
) -> Result<()> {
    ctx.accounts.custody_config.require_not_paused()?;

    let record = DepositRecord {
        pubkey,
        withdrawal_credentials,
        signature,
        deposit_data_root,
        amount,
    };
    record.verify()?;

    pull_stake(&ctx, amount)?;

    let deposit_tree = &mut ctx.accounts.deposit_tree;
    let index = deposit_tree.append(record.deposit_data_root)?;
    let root = deposit_tree.get_deposit_root();

    emit!(DepositRecorded {
        custody: ctx.accounts.custody_config.key(),
        index,
        pubkey,
        withdrawal_credentials,
        amount,
        deposit_root: root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Deposit recorded at index {}", index);
    Ok(())
}

pub fn batch_handler(
    ctx: Context<Deposit>,
    pubkeys: Vec<u8>,
    withdrawal_credentials: [u8; 32],
    signatures: Vec<u8>,
    deposit_data_roots: Vec<[u8; 32]>,
    amounts: Vec<u64>,
) -> Result<()> {
    ctx.accounts.custody_config.require_not_paused()?;

    let count = deposit_data_roots.len();
    require!(count > 0, CustodyError::InvalidBatchLength);
    require!(
        pubkeys.len() == count * PUBKEY_LENGTH,
        CustodyError::InvalidBatchLength
    );
    require!(
        signatures.len() == count * SIGNATURE_LENGTH,
        CustodyError::InvalidBatchLength
    );
    require!(amounts.len() == count, CustodyError::InvalidBatchLength);

    // Validate every record before any state is touched.
    let mut records = Vec::with_capacity(count);
    let mut total: u64 = 0;
    for i in 0..count {
        let mut pubkey = [0u8; PUBKEY_LENGTH];
        pubkey.copy_from_slice(&pubkeys[i * PUBKEY_LENGTH..(i + 1) * PUBKEY_LENGTH]);
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&signatures[i * SIGNATURE_LENGTH..(i + 1) * SIGNATURE_LENGTH]);

        let record = DepositRecord {
            pubkey,
            withdrawal_credentials,
            signature,
            deposit_data_root: deposit_data_roots[i],
            amount: amounts[i],
        };
        record.verify()?;
        total = total
            .checked_add(record.amount)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?;
        records.push(record);
    }

    pull_stake(&ctx, total)?;

    let deposit_tree = &mut ctx.accounts.deposit_tree;
    let timestamp = Clock::get()?.unix_timestamp;
    for record in records {
        let index = deposit_tree.append(record.deposit_data_root)?;
        let root = deposit_tree.get_deposit_root();
        emit!(DepositRecorded {
            custody: ctx.accounts.custody_config.key(),
            index,
            pubkey: record.pubkey,
            withdrawal_credentials: record.withdrawal_credentials,
            amount: record.amount,
            deposit_root: root,
            timestamp,
        });
    }

    msg!("Batch of {} deposits recorded", count);
    Ok(())
}

/// One fully-specified deposit record, pre-insertion.
struct DepositRecord {
    pubkey: [u8; 48],
    withdrawal_credentials: [u8; 32],
    signature: [u8; 96],
    deposit_data_root: [u8; 32],
    amount: u64,
}

impl DepositRecord {
    /// Check the amount shape and recompute the commitment root.
    fn verify(&self) -> Result<()> {
        require!(
            self.amount > 0 && self.amount % DEPOSIT_AMOUNT_UNIT == 0,
            CustodyError::InvalidDepositAmount
        );
        let packed_amount = self.amount / DEPOSIT_AMOUNT_UNIT;
        let node = compute_deposit_data_root(
            &self.pubkey,
            &self.withdrawal_credentials,
            &self.signature,
            packed_amount,
        );
        require!(
            node == self.deposit_data_root,
            CustodyError::DepositDataRootMismatch
        );
        Ok(())
    }
}

fn pull_stake(ctx: &Context<Deposit>, amount: u64) -> Result<()> {
    let cpi_accounts = Transfer {
        from: ctx.accounts.depositor_token_account.to_account_info(),
        to: ctx.accounts.stake_vault.to_account_info(),
        authority: ctx.accounts.depositor.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}
