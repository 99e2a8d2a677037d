use tree_hash::TreeHash;
use types::primitives::H256;

pub fn hash_tree_root<T: TreeHash>(value: &T) -> H256 {
    H256::from_slice(&value.tree_hash_root())
}
