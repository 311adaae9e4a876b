//! Leaf enumeration and the outgroup filter.
//!
//! The outgroup filter answers one question for a set of leaves: is any of
//! them an outgroup sequence? It is asked once for the whole tree (trees with
//! no outgroup at all are not scored) and once per ingroup pair for the
//! subtree below the pair's common ancestor.

use crate::error::Result;
use crate::matcher::LeafClassifier;
use phylotree::tree::Tree as PhyloTree;

/// A named leaf of a family tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Node id inside the tree it was read from
    pub id: usize,
    pub name: String,
}

/// All named leaves of the tree, in `get_leaves` order.
///
/// Unnamed leaves carry no species information and are left out.
pub fn tree_leaves(tree: &PhyloTree) -> Result<Vec<Leaf>> {
    let mut leaves = Vec::new();
    for id in tree.get_leaves() {
        if let Some(name) = tree.get(&id)?.name.clone() {
            leaves.push(Leaf { id, name });
        }
    }
    Ok(leaves)
}

/// Names of the leaves in the subtree rooted at `node_id`.
///
/// Walks children depth first; a leaf node yields its own name.
pub fn subtree_leaf_names(tree: &PhyloTree, node_id: usize) -> Result<Vec<&str>> {
    let mut names = Vec::new();
    let mut stack = vec![node_id];

    while let Some(id) = stack.pop() {
        let node = tree.get(&id)?;
        if node.children.is_empty() {
            if let Some(name) = node.name.as_deref() {
                names.push(name);
            }
        } else {
            // reversed so that the leftmost child is visited first
            stack.extend(node.children.iter().rev());
        }
    }

    Ok(names)
}

/// `true` when none of the names is an outgroup sequence.
pub fn is_outgroup_free<'a, I>(leaf_names: I, classifier: &LeafClassifier) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !leaf_names.into_iter().any(|name| classifier.is_outgroup(name))
}

/// Whole-tree outgroup check.
pub fn tree_is_outgroup_free(leaves: &[Leaf], classifier: &LeafClassifier) -> bool {
    is_outgroup_free(leaves.iter().map(|l| l.name.as_str()), classifier)
}

/// Leaves matching the ingroup pattern, preserving tree order.
pub fn ingroup_leaves(leaves: &[Leaf], classifier: &LeafClassifier) -> Vec<Leaf> {
    leaves
        .iter()
        .filter(|leaf| classifier.is_ingroup(&leaf.name))
        .cloned()
        .collect()
}
