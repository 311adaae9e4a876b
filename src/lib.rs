//! Crate root: lightweight module orchestration and public re-exports.
//!
//! Modules:
//! - `profile`: species profile table (outgroup / ingroup species).
//! - `matcher`: classify leaf names against the profile.
//! - `leaves`: leaf enumeration and the outgroup filter.
//! - `pairs`: ingroup pair enumeration and true/false positive classification.
//! - `precision`: precision from pair counts.
//! - `batch`: score every tree file of a directory.
//! - `io`: reading Newick tree files and writing the score table.
//! - `config`: scoring policies.
//! - `error`: crate error type.
//! - `logger`: stderr logger used by the binary.
//! - `api`: Python bindings via `pyo3` (gated behind "python" feature).

pub mod batch;
pub mod config;
pub mod error;
pub mod io;
pub mod leaves;
pub mod logger;
pub mod matcher;
pub mod pairs;
pub mod precision;
pub mod profile;

#[cfg(feature = "python")]
pub mod api;

// Re-export frequently used types & functions
pub use batch::{BatchSummary, FamilyScore, TreeOutcome, score_directory, score_tree};
pub use config::{MatchMode, NoPairsPolicy, OutgroupFreePolicy, ScoringConfig};
pub use error::{Error, Result};
pub use matcher::LeafClassifier;
pub use profile::SpeciesProfile;
