/// Merkle-tree commitment over allow-list entries
///
/// Implements the `standard-v1` tree layout the minting stack expects: a
/// leaf is `keccak256(keccak256(abi.encode(address, uint256)))`, sibling
/// pairs hash commutatively (sorted before hashing), and the whole tree
/// is stored as a flat array with the root at index 0 and the children of
/// node `i` at `2i+1` and `2i+2`. The JSON dump of that layout is the
/// document persisted to storage and decoded on the inspection path.
use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::allowlist::types::{parse_units, AllowlistEntry};
use crate::error::Error;

/// Dump format identifier
pub const TREE_FORMAT: &str = "standard-v1";

const LEAF_ENCODING: [&str; 2] = ["address", "uint256"];

/// Hash of one entry in `standard-v1` leaf encoding
///
/// Fails when the address does not parse; build a tree only from
/// validated entries.
pub fn leaf_hash(entry: &AllowlistEntry) -> Result<B256, Error> {
    let address = Address::from_str(&entry.address).map_err(|e| {
        Error::MalformedAllowList(format!("Invalid address '{}': {}", entry.address, e))
    })?;

    // abi.encode(address, uint256): two 32-byte words
    let mut encoded = [0u8; 64];
    encoded[12..32].copy_from_slice(address.as_slice());
    encoded[32..64].copy_from_slice(&entry.units.to_be_bytes::<32>());

    Ok(keccak256(keccak256(encoded)))
}

fn hash_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

/// Serialized form of a [`StandardMerkleTree`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDump {
    pub format: String,
    pub tree: Vec<B256>,
    pub values: Vec<TreeDumpValue>,
    pub leaf_encoding: Vec<String>,
}

/// One committed value and the flat-array position of its leaf
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDumpValue {
    /// `(address, units)` with units as a decimal string
    pub value: (String, String),
    pub tree_index: usize,
}

struct LeafValue {
    entry: AllowlistEntry,
    tree_index: usize,
}

/// In-memory `standard-v1` Merkle tree over allow-list entries
pub struct StandardMerkleTree {
    tree: Vec<B256>,
    values: Vec<LeafValue>,
}

impl StandardMerkleTree {
    /// Build a tree committing to `entries`, preserving their order as
    /// value indices
    pub fn of(entries: &[AllowlistEntry]) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::EmptyAllowList);
        }

        let mut hashed: Vec<(B256, usize)> = entries
            .iter()
            .enumerate()
            .map(|(value_index, entry)| Ok((leaf_hash(entry)?, value_index)))
            .collect::<Result<_, Error>>()?;
        hashed.sort_by(|a, b| a.0.cmp(&b.0));

        let leaf_count = hashed.len();
        let tree_len = 2 * leaf_count - 1;
        let mut tree = vec![B256::ZERO; tree_len];
        let mut values: Vec<LeafValue> = entries
            .iter()
            .map(|entry| LeafValue {
                entry: entry.clone(),
                tree_index: 0,
            })
            .collect();

        for (sorted_pos, (leaf, value_index)) in hashed.iter().enumerate() {
            let tree_index = tree_len - 1 - sorted_pos;
            tree[tree_index] = *leaf;
            values[*value_index].tree_index = tree_index;
        }
        // Internal nodes occupy 0..leaf_count-1; fill bottom-up.
        for i in (0..leaf_count.saturating_sub(1)).rev() {
            tree[i] = hash_pair(tree[2 * i + 1], tree[2 * i + 2]);
        }

        Ok(Self { tree, values })
    }

    /// Root commitment
    pub fn root(&self) -> B256 {
        self.tree[0]
    }

    /// Number of committed values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Committed entries in original value order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &AllowlistEntry)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (i, &v.entry))
    }

    /// Merkle proof for the value at `value_index`, or `None` when the
    /// index is out of range
    pub fn get_proof(&self, value_index: usize) -> Option<Vec<B256>> {
        let mut i = self.values.get(value_index)?.tree_index;
        let mut proof = Vec::new();
        while i > 0 {
            let sibling = if i % 2 == 1 { i + 1 } else { i - 1 };
            proof.push(self.tree[sibling]);
            i = (i - 1) / 2;
        }
        Some(proof)
    }

    /// Verify `proof` links `entry` to `root`
    pub fn verify_proof(root: B256, entry: &AllowlistEntry, proof: &[B256]) -> Result<bool, Error> {
        let mut node = leaf_hash(entry)?;
        for sibling in proof {
            node = hash_pair(node, *sibling);
        }
        Ok(node == root)
    }

    /// Serialize to the `standard-v1` dump
    pub fn dump(&self) -> TreeDump {
        TreeDump {
            format: TREE_FORMAT.to_string(),
            tree: self.tree.clone(),
            values: self
                .values
                .iter()
                .map(|v| TreeDumpValue {
                    value: (v.entry.address.clone(), v.entry.units.to_string()),
                    tree_index: v.tree_index,
                })
                .collect(),
            leaf_encoding: LEAF_ENCODING.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reconstruct a tree from an untrusted dump, re-deriving every leaf
    /// and internal node
    ///
    /// Any structural defect, hash mismatch, or unparseable value is
    /// [`Error::MalformedAllowList`]; a bad document is reported once,
    /// never retried.
    pub fn load(dump: &TreeDump) -> Result<Self, Error> {
        if dump.format != TREE_FORMAT {
            return Err(Error::MalformedAllowList(format!(
                "Unknown tree format '{}'",
                dump.format
            )));
        }
        if dump.leaf_encoding != LEAF_ENCODING {
            return Err(Error::MalformedAllowList(format!(
                "Unsupported leaf encoding {:?}",
                dump.leaf_encoding
            )));
        }
        if dump.values.is_empty() || dump.tree.len() != 2 * dump.values.len() - 1 {
            return Err(Error::MalformedAllowList(format!(
                "Tree of {} nodes cannot commit to {} values",
                dump.tree.len(),
                dump.values.len()
            )));
        }

        let leaf_count = dump.values.len();
        let mut values = Vec::with_capacity(leaf_count);
        for (value_index, value) in dump.values.iter().enumerate() {
            let (address, units_raw) = &value.value;
            let units = parse_units(units_raw).map_err(|e| {
                Error::MalformedAllowList(format!("Entry {} has invalid units: {}", value_index, e))
            })?;
            let entry = AllowlistEntry::new(address.clone(), units);

            if value.tree_index < leaf_count - 1 || value.tree_index >= dump.tree.len() {
                return Err(Error::MalformedAllowList(format!(
                    "Entry {} points at non-leaf node {}",
                    value_index, value.tree_index
                )));
            }
            if leaf_hash(&entry)? != dump.tree[value.tree_index] {
                return Err(Error::MalformedAllowList(format!(
                    "Entry {} does not match its committed leaf",
                    value_index
                )));
            }

            values.push(LeafValue {
                entry,
                tree_index: value.tree_index,
            });
        }

        for i in 0..leaf_count.saturating_sub(1) {
            if dump.tree[i] != hash_pair(dump.tree[2 * i + 1], dump.tree[2 * i + 2]) {
                return Err(Error::MalformedAllowList(format!(
                    "Inconsistent tree node at index {}",
                    i
                )));
            }
        }

        Ok(Self {
            tree: dump.tree.clone(),
            values,
        })
    }

    /// Decode a fetched JSON document into a tree
    ///
    /// Accepts the dump object directly, or a JSON string containing it;
    /// some producers double-encode the envelope.
    pub fn from_document(document: serde_json::Value) -> Result<Self, Error> {
        let document = match document {
            serde_json::Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
                Error::MalformedAllowList(format!("Document is not valid JSON: {}", e))
            })?,
            other => other,
        };
        let dump: TreeDump = serde_json::from_value(document)
            .map_err(|e| Error::MalformedAllowList(format!("Not a {} dump: {}", TREE_FORMAT, e)))?;
        Self::load(&dump)
    }
}
