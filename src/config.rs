//! Scoring policies shared by the CLI and the Python bindings.

use std::fmt;
use std::str::FromStr;

/// How a leaf name is matched against species ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Species id may occur anywhere in the leaf name (regex search).
    #[default]
    Substring,
    /// Leaf names are `<species_id><delimiter><rest>`; the species part is
    /// looked up exactly.
    Prefix { delimiter: char },
}

/// What to report for a tree that has no outgroup leaf at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutgroupFreePolicy {
    /// Report precision 0.
    #[default]
    Zero,
    /// Leave the tree out of the output.
    Skip,
}

/// What to report for a tree with fewer than two ingroup leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoPairsPolicy {
    /// Report `NaN`.
    #[default]
    Nan,
    /// Report precision 0.
    Zero,
    /// Leave the tree out of the output.
    Skip,
}

/// Settings for one batch run.
///
/// `Default` reproduces the reference behavior: substring matching,
/// outgroup-free trees score 0, trees without pairs score NaN, and the first
/// failing file aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringConfig {
    pub match_mode: MatchMode,
    pub outgroup_free: OutgroupFreePolicy,
    pub no_pairs: NoPairsPolicy,
    /// Log failing tree files and continue instead of aborting.
    pub keep_going: bool,
}

/// Error for policy names that are not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown policy '{}'", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for OutgroupFreePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "skip" => Ok(Self::Skip),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl FromStr for NoPairsPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nan" => Ok(Self::Nan),
            "zero" => Ok(Self::Zero),
            "skip" => Ok(Self::Skip),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl MatchMode {
    /// Parse a mode name (`substring` or `prefix`) with the delimiter used by `prefix`.
    pub fn from_name(name: &str, delimiter: char) -> Result<Self, UnknownPolicy> {
        match name.to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "prefix" => Ok(Self::Prefix { delimiter }),
            _ => Err(UnknownPolicy(name.to_string())),
        }
    }
}
