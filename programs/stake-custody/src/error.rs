//! Unified error types for the stake custody program
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum CustodyError {
    // ========== Deposit Errors (6000-6003) ==========

    /// Recomputed deposit data root does not match the claimed root
    #[msg("Reconstructed deposit data does not match supplied deposit data root")]
    DepositDataRootMismatch,

    /// Amount is zero, or not a multiple of the deposit unit
    #[msg("Deposit amount must be a positive multiple of the deposit unit")]
    InvalidDepositAmount,

    /// Deposit tree has reached maximum capacity
    #[msg("Deposit tree is full")]
    DepositTreeFull,

    /// Batch deposit byte arrays have inconsistent lengths
    #[msg("Batch deposit data length mismatch")]
    InvalidBatchLength,

    // ========== Withdrawal Errors (6004-6009) ==========

    /// amounts[] and receivers[] differ in length
    #[msg("Amounts and receivers arrays must have the same length")]
    LengthMismatch,

    /// Failed withdrawal index is past the end of the queue
    #[msg("Failed withdrawal index out of range")]
    WithdrawalIndexOutOfRange,

    /// Entry already has zero owed amount
    #[msg("Failed withdrawal already fully settled")]
    WithdrawalAlreadySettled,

    /// Requested settlement exceeds the remaining owed amount
    #[msg("Amount exceeds remaining owed amount")]
    AmountExceedsOwed,

    /// Custody vault does not hold enough backing for the delivery
    #[msg("Insufficient backing in custody vault")]
    InsufficientBacking,

    /// Fixed-capacity queue account cannot take another entry
    #[msg("Failed withdrawal queue is full")]
    QueueFull,

    // ========== Vault / Token Errors (6010-6015) ==========

    /// Swap against a token that is not currently enabled
    #[msg("Token is not enabled for swapping")]
    TokenNotEnabled,

    /// Unwrap against a token that was never configured
    #[msg("Token is not configured in the vault")]
    TokenNotConfigured,

    /// Enable requires a positive conversion rate
    #[msg("Conversion rate must be greater than zero")]
    InvalidRate,

    /// Token mint mismatch
    #[msg("Token mint does not match custody configuration")]
    InvalidMint,

    /// Swap authorization payload supplied without a permit program
    #[msg("Authorization payload requires a permit program account")]
    MissingPermitProgram,

    /// Attempt to claim a token managed by the custody
    #[msg("Cannot claim a configured custody token")]
    InvalidTokenClaim,

    // ========== Authorization Errors (6016-6019) ==========

    /// Operation not authorized for caller
    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    /// Program is paused
    #[msg("Custody is paused")]
    CustodyPaused,

    /// Receiver token account missing or malformed
    #[msg("Receiver token account is invalid")]
    InvalidReceiverAccount,

    /// Unpause requested while not paused
    #[msg("Custody is not paused")]
    CustodyNotPaused,

    // ========== Computation Errors (6020) ==========

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
