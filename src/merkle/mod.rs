/// Merkle-tree codec for allow-list commitments
pub mod tree;

pub use tree::{leaf_hash, StandardMerkleTree, TreeDump, TreeDumpValue, TREE_FORMAT};
