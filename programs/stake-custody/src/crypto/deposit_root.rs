//! SHA-256 commitment scheme for deposit records
//!
//! A deposit record (48-byte pubkey, 32-byte withdrawal credentials, 96-byte
//! signature, u64 amount) is compressed into a single 32-byte leaf by a fixed
//! two-level scheme: the pubkey is padded to 64 bytes and hashed, the
//! signature is split 64/32 and hashed pair-wise, the amount is packed as
//! 8 little-endian bytes next to the credentials, and the three sub-roots are
//! combined. The same scheme runs off-chain when deposit data is prepared, so
//! the on-chain recomputation rejects any record that was mangled in transit.

use anchor_lang::solana_program::hash::hashv;

use crate::state::deposit_tree::DEPOSIT_TREE_DEPTH;

/// SHA-256 of two 32-byte nodes, left-to-right.
pub fn hash_nodes(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    hashv(&[left, right]).to_bytes()
}

/// Precomputed per-level hashes of all-empty subtrees.
///
/// `zero_hashes[0]` is the empty leaf; `zero_hashes[h]` is the root of an
/// empty subtree of height `h`.
pub fn zero_hashes() -> Vec<[u8; 32]> {
    let mut zeros = Vec::with_capacity(DEPOSIT_TREE_DEPTH);
    zeros.push([0u8; 32]);
    for height in 1..DEPOSIT_TREE_DEPTH {
        let prev = zeros[height - 1];
        zeros.push(hash_nodes(&prev, &prev));
    }
    zeros
}

/// Bind the leaf count into a folded root, defeating extension ambiguity
/// between trees of different sizes with identical branch state.
pub fn mix_in_deposit_count(node: &[u8; 32], deposit_count: u64) -> [u8; 32] {
    hashv(&[node, &deposit_count.to_le_bytes(), &[0u8; 24]]).to_bytes()
}

/// Recompute the commitment root of a single deposit record.
///
/// `amount` is already packed in deposit units (base units divided by
/// [`crate::state::deposit_tree::DEPOSIT_AMOUNT_UNIT`]).
pub fn compute_deposit_data_root(
    pubkey: &[u8; 48],
    withdrawal_credentials: &[u8; 32],
    signature: &[u8; 96],
    amount: u64,
) -> [u8; 32] {
    let pubkey_root = hashv(&[pubkey, &[0u8; 16]]).to_bytes();

    let sig_head = hashv(&[&signature[..64]]).to_bytes();
    let sig_tail = hashv(&[&signature[64..], &[0u8; 32]]).to_bytes();
    let signature_root = hashv(&[&sig_head, &sig_tail]).to_bytes();

    let record_root = hashv(&[&pubkey_root, withdrawal_credentials]).to_bytes();
    let amount_root = hashv(&[&amount.to_le_bytes(), &[0u8; 24], &signature_root]).to_bytes();

    hashv(&[&record_root, &amount_root]).to_bytes()
}
