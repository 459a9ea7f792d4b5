//! Hashing primitives for the deposit accumulator

pub mod deposit_root;

pub use deposit_root::{
    compute_deposit_data_root, hash_nodes, mix_in_deposit_count, zero_hashes,
};
