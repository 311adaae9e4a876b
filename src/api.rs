//! Python binding layer for family precision scoring.
//!
//! Provides Python functions for scoring a directory of gene-family trees
//! against a species profile.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::batch::{FamilyScore, score_directory};
use crate::config::{MatchMode, NoPairsPolicy, OutgroupFreePolicy, ScoringConfig};
use crate::matcher::LeafClassifier;
use crate::profile::SpeciesProfile;

/// Score every tree file in a directory.
///
/// Args:
///     tree_dir: Directory of Newick tree files, one family per file
///     profile: Path to the species profile (`<species_id> <count>` per line)
///     outgroup_free: "zero" or "skip" for trees without outgroups (default: "zero")
///     no_pairs: "nan", "zero" or "skip" for trees without ingroup pairs (default: "nan")
///     match_mode: "substring" or "prefix" (default: "substring")
///     delimiter: Species id separator for "prefix" matching (default: "_")
///     keep_going: Skip unreadable tree files instead of failing (default: False)
///
/// Returns:
///     A list of (family, precision) tuples in file-name order.
///
/// Raises:
///     ValueError: On unknown options, unreadable input, or malformed trees
#[pyfunction]
#[pyo3(signature = (
    tree_dir,
    profile,
    outgroup_free="zero",
    no_pairs="nan",
    match_mode="substring",
    delimiter='_',
    keep_going=false
))]
fn score_families(
    tree_dir: String,
    profile: String,
    outgroup_free: &str,
    no_pairs: &str,
    match_mode: &str,
    delimiter: char,
    keep_going: bool,
) -> PyResult<Vec<(String, f64)>> {
    let config = ScoringConfig {
        match_mode: MatchMode::from_name(match_mode, delimiter).map_err(to_py_err)?,
        outgroup_free: outgroup_free.parse::<OutgroupFreePolicy>().map_err(to_py_err)?,
        no_pairs: no_pairs.parse::<NoPairsPolicy>().map_err(to_py_err)?,
        keep_going,
    };

    let profile = SpeciesProfile::from_path(&profile).map_err(to_py_err)?;
    let classifier = LeafClassifier::new(&profile, config.match_mode).map_err(to_py_err)?;

    let mut scores = Vec::new();
    score_directory(&PathBuf::from(tree_dir), &classifier, &config, |score: &FamilyScore| {
        scores.push((score.family.clone(), score.precision));
        Ok(())
    })
    .map_err(to_py_err)?;

    Ok(scores)
}

fn to_py_err<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python module definition
#[pymodule]
fn family_precision(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(score_families, m)?)?;
    Ok(())
}
