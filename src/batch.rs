//! Score every tree file of a directory.
//!
//! Per tree: load it, check whether it has any outgroup leaf, enumerate and
//! classify ingroup pairs, and resolve the outcome to a reported precision
//! according to the [`ScoringConfig`] policies.

use crate::config::{NoPairsPolicy, OutgroupFreePolicy, ScoringConfig};
use crate::error::Result;
use crate::io::{family_name, list_tree_files, load_family_tree};
use crate::leaves::{ingroup_leaves, tree_is_outgroup_free, tree_leaves};
use crate::matcher::LeafClassifier;
use crate::pairs::{classify_pairs, ingroup_pairs};
use crate::precision::PairCounts;
use log::{debug, warn};
use phylotree::tree::Tree as PhyloTree;
use std::path::Path;

/// What scoring a single tree produced, before any policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    /// At least one ingroup pair was classified.
    Scored(PairCounts),
    /// The tree has no outgroup leaf anywhere.
    OutgroupFree,
    /// Fewer than two ingroup leaves, so no pair exists.
    NoPairs,
}

/// A reported precision for one family.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyScore {
    pub family: String,
    pub outcome: TreeOutcome,
    pub precision: f64,
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub scored: usize,
    pub outgroup_free: usize,
    pub without_pairs: usize,
    /// Trees dropped from the output by a `Skip` policy
    pub skipped: usize,
    /// Files that failed under `keep_going`
    pub failed: usize,
}

/// Score one loaded tree.
pub fn score_tree(tree: &PhyloTree, classifier: &LeafClassifier) -> Result<TreeOutcome> {
    let leaves = tree_leaves(tree)?;

    if tree_is_outgroup_free(&leaves, classifier) {
        return Ok(TreeOutcome::OutgroupFree);
    }

    let ingroup = ingroup_leaves(&leaves, classifier);
    let pairs = ingroup_pairs(&ingroup);
    debug!(
        "{} leaves, {} ingroup, {} pairs",
        leaves.len(),
        ingroup.len(),
        pairs.len()
    );
    if pairs.is_empty() {
        return Ok(TreeOutcome::NoPairs);
    }

    let counts = classify_pairs(tree, &pairs, classifier)?;
    Ok(TreeOutcome::Scored(counts))
}

/// Apply the configured policies. `None` means the tree is left out.
pub fn report_value(outcome: TreeOutcome, config: &ScoringConfig) -> Option<f64> {
    match outcome {
        TreeOutcome::Scored(counts) => counts.precision(),
        TreeOutcome::OutgroupFree => match config.outgroup_free {
            OutgroupFreePolicy::Zero => Some(0.0),
            OutgroupFreePolicy::Skip => None,
        },
        TreeOutcome::NoPairs => match config.no_pairs {
            NoPairsPolicy::Nan => Some(f64::NAN),
            NoPairsPolicy::Zero => Some(0.0),
            NoPairsPolicy::Skip => None,
        },
    }
}

/// Load and score one tree file.
pub fn score_tree_file(path: &Path, classifier: &LeafClassifier) -> Result<TreeOutcome> {
    let tree = load_family_tree(path)?;
    score_tree(&tree, classifier)
}

/// Score every regular file of `tree_dir` in file-name order.
///
/// Each reported score is handed to `emit` as soon as it is computed, so
/// earlier lines survive a later failure. Without `keep_going` the first
/// failing file ends the run with its error.
pub fn score_directory<F>(
    tree_dir: &Path,
    classifier: &LeafClassifier,
    config: &ScoringConfig,
    mut emit: F,
) -> Result<BatchSummary>
where
    F: FnMut(&FamilyScore) -> Result<()>,
{
    let mut summary = BatchSummary::default();

    for path in list_tree_files(tree_dir)? {
        summary.files += 1;
        let family = family_name(&path);

        let outcome = match score_tree_file(&path, classifier) {
            Ok(outcome) => outcome,
            Err(e) if config.keep_going => {
                warn!("Skipping {}: {e}", path.display());
                summary.failed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        match outcome {
            TreeOutcome::Scored(counts) => {
                summary.scored += 1;
                debug!(
                    "{family}: {} true / {} false positive pairs",
                    counts.true_positives, counts.false_positives
                );
            }
            TreeOutcome::OutgroupFree => {
                summary.outgroup_free += 1;
                warn!("{family}: tree has no outgroup sequence");
            }
            TreeOutcome::NoPairs => {
                summary.without_pairs += 1;
                warn!("{family}: fewer than two ingroup sequences, precision undefined");
            }
        }

        match report_value(outcome, config) {
            Some(precision) => emit(&FamilyScore { family, outcome, precision })?,
            None => summary.skipped += 1,
        }
    }

    Ok(summary)
}
