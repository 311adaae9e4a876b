//! Ingroup pair enumeration and true/false positive classification.
//!
//! # Classification rule
//! For a pair of ingroup leaves, take their most recent common ancestor and
//! look at every leaf below it:
//! ```text
//!            root
//!           /    \
//!        n1        n2
//!       /  \      /  \
//!    hsa_1 ptr_1 mmu_1 dme_1
//! ```
//! - (hsa_1, ptr_1): MRCA is n1, no outgroup below it => true positive
//! - (hsa_1, mmu_1): MRCA is root, dme_1 below it => false positive

use crate::error::{Error, Result};
use crate::leaves::{Leaf, is_outgroup_free, subtree_leaf_names};
use crate::matcher::LeafClassifier;
use crate::precision::PairCounts;
use itertools::Itertools;
use phylotree::tree::Tree as PhyloTree;

/// An unordered pair of distinct ingroup leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngroupPair<'a> {
    pub first: &'a Leaf,
    pub second: &'a Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    TruePositive,
    FalsePositive,
}

/// All `n(n-1)/2` pairs `(i, j)` with `i < j`, in index order.
pub fn ingroup_pairs(ingroup: &[Leaf]) -> Vec<IngroupPair<'_>> {
    ingroup
        .iter()
        .tuple_combinations()
        .map(|(first, second)| IngroupPair { first, second })
        .collect()
}

/// Classify one pair by the leaves under its common ancestor.
pub fn classify_pair(
    tree: &PhyloTree,
    pair: &IngroupPair<'_>,
    classifier: &LeafClassifier,
) -> Result<PairClass> {
    let mrca = tree
        .get_common_ancestor(&pair.first.id, &pair.second.id)
        .map_err(|source| Error::Lookup {
            first: pair.first.name.clone(),
            second: pair.second.name.clone(),
            source,
        })?;

    let below = subtree_leaf_names(tree, mrca)?;
    if is_outgroup_free(below, classifier) {
        Ok(PairClass::TruePositive)
    } else {
        Ok(PairClass::FalsePositive)
    }
}

/// Count true and false positives over all pairs.
pub fn classify_pairs(
    tree: &PhyloTree,
    pairs: &[IngroupPair<'_>],
    classifier: &LeafClassifier,
) -> Result<PairCounts> {
    let mut counts = PairCounts::default();
    for pair in pairs {
        match classify_pair(tree, pair, classifier)? {
            PairClass::TruePositive => counts.true_positives += 1,
            PairClass::FalsePositive => counts.false_positives += 1,
        }
    }
    Ok(counts)
}
