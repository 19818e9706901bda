/// Unit tests for the standard-v1 Merkle codec

use allowlist_sdk::merkle::{leaf_hash, StandardMerkleTree, TREE_FORMAT};
use allowlist_sdk::{AllowlistEntry, Error, U256};

const ADDR_A: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
const ADDR_B: &str = "0x1111111111111111111111111111111111111111";
const ADDR_C: &str = "0x2222222222222222222222222222222222222222";
const ADDR_D: &str = "0x3333333333333333333333333333333333333333";

fn sample_entries() -> Vec<AllowlistEntry> {
    vec![
        AllowlistEntry::new(ADDR_A, U256::from(600u64)),
        AllowlistEntry::new(ADDR_B, U256::from(250u64)),
        AllowlistEntry::new(ADDR_C, U256::from(100u64)),
        AllowlistEntry::new(ADDR_D, U256::from(50u64)),
    ]
}

#[test]
fn test_single_entry_tree_root_is_the_leaf() {
    let entries = vec![AllowlistEntry::new(ADDR_A, U256::from(1u64))];
    let tree = StandardMerkleTree::of(&entries).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root(), leaf_hash(&entries[0]).unwrap());
    assert_eq!(tree.get_proof(0), Some(vec![]));
    assert!(StandardMerkleTree::verify_proof(tree.root(), &entries[0], &[]).unwrap());
}

#[test]
fn test_tree_rejects_empty_and_bad_addresses() {
    assert!(matches!(
        StandardMerkleTree::of(&[]),
        Err(Error::EmptyAllowList)
    ));

    let entries = vec![AllowlistEntry::new("nope", U256::from(1u64))];
    assert!(matches!(
        StandardMerkleTree::of(&entries),
        Err(Error::MalformedAllowList(_))
    ));
}

#[test]
fn test_entries_preserve_value_order() {
    let entries = sample_entries();
    let tree = StandardMerkleTree::of(&entries).unwrap();

    let decoded: Vec<AllowlistEntry> = tree.entries().map(|(_, e)| e.clone()).collect();
    assert_eq!(decoded, entries);
}

#[test]
fn test_every_proof_verifies_against_the_root() {
    let entries = sample_entries();
    let tree = StandardMerkleTree::of(&entries).unwrap();
    let root = tree.root();

    for (index, entry) in entries.iter().enumerate() {
        let proof = tree.get_proof(index).unwrap();
        assert!(
            StandardMerkleTree::verify_proof(root, entry, &proof).unwrap(),
            "proof for entry {} failed",
            index
        );

        // The same proof must not verify a different entry.
        let other = &entries[(index + 1) % entries.len()];
        assert!(!StandardMerkleTree::verify_proof(root, other, &proof).unwrap());
    }

    assert_eq!(tree.get_proof(entries.len()), None);
}

#[test]
fn test_root_commits_to_units() {
    let entries = sample_entries();
    let mut changed = sample_entries();
    changed[2].units = U256::from(101u64);

    let root_a = StandardMerkleTree::of(&entries).unwrap().root();
    let root_b = StandardMerkleTree::of(&changed).unwrap().root();
    assert_ne!(root_a, root_b);
}

#[test]
fn test_dump_shape_matches_standard_v1() {
    let tree = StandardMerkleTree::of(&sample_entries()).unwrap();
    let json = serde_json::to_value(tree.dump()).unwrap();

    assert_eq!(json["format"], TREE_FORMAT);
    assert_eq!(
        json["leafEncoding"],
        serde_json::json!(["address", "uint256"])
    );
    assert_eq!(json["tree"].as_array().unwrap().len(), 2 * 4 - 1);
    assert!(json["tree"][0].as_str().unwrap().starts_with("0x"));
    assert_eq!(json["values"][0]["value"][0], ADDR_A);
    assert_eq!(json["values"][0]["value"][1], "600");
    assert!(json["values"][0]["treeIndex"].is_u64());
}

#[test]
fn test_dump_load_round_trip() {
    let entries = sample_entries();
    let tree = StandardMerkleTree::of(&entries).unwrap();

    let loaded = StandardMerkleTree::load(&tree.dump()).unwrap();

    assert_eq!(loaded.root(), tree.root());
    let decoded: Vec<AllowlistEntry> = loaded.entries().map(|(_, e)| e.clone()).collect();
    assert_eq!(decoded, entries);
}

#[test]
fn test_from_document_accepts_double_encoded_body() {
    let tree = StandardMerkleTree::of(&sample_entries()).unwrap();
    let dump_text = serde_json::to_string(&tree.dump()).unwrap();

    // Some producers persist the envelope as a JSON string.
    let document = serde_json::Value::String(dump_text);
    let loaded = StandardMerkleTree::from_document(document).unwrap();
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn test_load_rejects_unknown_format() {
    let mut dump = StandardMerkleTree::of(&sample_entries()).unwrap().dump();
    dump.format = "standard-v2".to_string();

    assert!(matches!(
        StandardMerkleTree::load(&dump),
        Err(Error::MalformedAllowList(_))
    ));
}

#[test]
fn test_load_rejects_tampered_value() {
    let mut dump = StandardMerkleTree::of(&sample_entries()).unwrap().dump();
    dump.values[1].value.1 = "9999".to_string();

    assert!(matches!(
        StandardMerkleTree::load(&dump),
        Err(Error::MalformedAllowList(_))
    ));
}

#[test]
fn test_load_rejects_tampered_node() {
    let mut dump = StandardMerkleTree::of(&sample_entries()).unwrap().dump();
    // Swap two internal nodes so leaf checks pass but the tree is inconsistent.
    dump.tree.swap(1, 2);

    assert!(matches!(
        StandardMerkleTree::load(&dump),
        Err(Error::MalformedAllowList(_))
    ));
}

#[test]
fn test_load_rejects_truncated_tree() {
    let mut dump = StandardMerkleTree::of(&sample_entries()).unwrap().dump();
    dump.tree.pop();

    assert!(matches!(
        StandardMerkleTree::load(&dump),
        Err(Error::MalformedAllowList(_))
    ));
}

#[test]
fn test_from_document_rejects_non_tree_json() {
    let document = serde_json::json!({"hello": "world"});
    assert!(matches!(
        StandardMerkleTree::from_document(document),
        Err(Error::MalformedAllowList(_))
    ));
}
