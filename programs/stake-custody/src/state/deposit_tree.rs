//! Incremental Merkle accumulator over deposit records
//!
//! Append-only tree of fixed depth 32, optimized for on-chain storage: the
//! only mutable state is a 32-entry branch cache of pending left siblings
//! plus a monotonic leaf counter. Appending propagates a carry exactly like
//! incrementing a binary counter, and the root folds from the branch cache
//! and the precomputed zero-subtree hashes in O(depth).

use anchor_lang::prelude::*;

use crate::crypto::{hash_nodes, mix_in_deposit_count, zero_hashes};
use crate::error::CustodyError;

/// Fixed tree depth; capacity is bounded by [`MAX_DEPOSIT_COUNT`], not 2^32.
pub const DEPOSIT_TREE_DEPTH: usize = 32;

/// Maximum number of records the accumulator accepts.
pub const MAX_DEPOSIT_COUNT: u64 = (1 << DEPOSIT_TREE_DEPTH) - 1;

/// Base units per packed deposit unit. Record amounts must be positive
/// multiples of this; the 8-byte field in the commitment carries the quotient.
pub const DEPOSIT_AMOUNT_UNIT: u64 = 1_000_000_000;

/// Deposit accumulator state account.
///
/// PDA Seeds: `[b"deposit_tree", custody_config.key().as_ref()]`
#[account]
pub struct DepositTree {
    /// Reference to parent custody config
    pub custody: Pubkey,

    /// Total records accepted; never decreases
    pub deposit_count: u64,

    /// Pending left sibling hash per level
    /// Length = DEPOSIT_TREE_DEPTH
    pub branch: Vec<[u8; 32]>,

    /// Precomputed empty-subtree hashes per level (constant after init)
    /// Length = DEPOSIT_TREE_DEPTH
    pub zero_hashes: Vec<[u8; 32]>,
}

impl DepositTree {
    /// Account space: discriminator + custody + count + two 32-entry tables.
    pub const LEN: usize = 8
        + 32
        + 8
        + 4 + (32 * DEPOSIT_TREE_DEPTH)
        + 4 + (32 * DEPOSIT_TREE_DEPTH);

    /// Initialize the accumulator with empty state.
    pub fn initialize(&mut self, custody: Pubkey) {
        self.custody = custody;
        self.deposit_count = 0;
        self.zero_hashes = zero_hashes();
        self.branch = vec![[0u8; 32]; DEPOSIT_TREE_DEPTH];
    }

    /// Append a leaf, returning its index (the pre-increment count).
    ///
    /// Carry propagation: starting at level 0, a level whose bit in the
    /// post-increment count is set absorbs the node into the branch cache;
    /// lower set bits combine with their cached left sibling on the way up.
    pub fn append(&mut self, node: [u8; 32]) -> Result<u64> {
        require!(
            self.deposit_count < MAX_DEPOSIT_COUNT,
            CustodyError::DepositTreeFull
        );

        let index = self.deposit_count;
        self.deposit_count += 1;

        let mut node = node;
        let mut size = self.deposit_count;
        for height in 0..DEPOSIT_TREE_DEPTH {
            if size & 1 == 1 {
                self.branch[height] = node;
                return Ok(index);
            }
            node = hash_nodes(&self.branch[height], &node);
            size >>= 1;
        }

        // Unreachable: the capacity check guarantees an unset bit exists.
        err!(CustodyError::DepositTreeFull)
    }

    /// Current accumulator root. Pure; folds branch cache against zero
    /// hashes level by level, then binds the leaf count into the result.
    pub fn get_deposit_root(&self) -> [u8; 32] {
        let mut node = [0u8; 32];
        let mut size = self.deposit_count;
        for height in 0..DEPOSIT_TREE_DEPTH {
            if size & 1 == 1 {
                node = hash_nodes(&self.branch[height], &node);
            } else {
                node = hash_nodes(&node, &self.zero_hashes[height]);
            }
            size >>= 1;
        }
        mix_in_deposit_count(&node, self.deposit_count)
    }

    pub fn get_deposit_count(&self) -> u64 {
        self.deposit_count
    }

    /// Little-endian 8-byte count, the external wire form.
    pub fn get_deposit_count_le(&self) -> [u8; 8] {
        self.deposit_count.to_le_bytes()
    }

    pub fn is_full(&self) -> bool {
        self.deposit_count >= MAX_DEPOSIT_COUNT
    }
}
