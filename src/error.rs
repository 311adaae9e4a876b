//! Error types for profile parsing, tree loading and pair scoring.
//!
//! Every fallible operation in the crate returns [`Result`]. The binary wraps
//! these with `anyhow` context; the library keeps a plain enum.

use phylotree::tree::TreeError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while scoring family trees.
#[derive(Debug)]
pub enum Error {
    /// File or directory could not be read.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Malformed species profile line.
    Profile {
        /// 1-based line number in the profile.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
    /// Tree file is not a readable Newick tree.
    Newick {
        path: PathBuf,
        message: String,
    },
    /// A leaf of an ingroup pair could not be found in its tree.
    Lookup {
        first: String,
        second: String,
        source: TreeError,
    },
    /// Any other structural error reported by `phylotree`.
    Tree(TreeError),
    /// Species ids did not compile into a valid pattern.
    Pattern(regex::Error),
    /// Score table could not be written.
    Output(io::Error),
}

/// Result type alias for scoring operations.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Profile { line, message } => {
                write!(f, "profile parse error at line {line}: {message}")
            }
            Self::Newick { path, message } => {
                write!(f, "tree parse error in {}: {message}", path.display())
            }
            Self::Lookup { first, second, source } => {
                write!(f, "common ancestor lookup failed for ({first}, {second}): {source}")
            }
            Self::Tree(e) => write!(f, "tree error: {e}"),
            Self::Pattern(e) => write!(f, "invalid species pattern: {e}"),
            Self::Output(e) => write!(f, "failed to write scores: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Lookup { source, .. } => Some(source),
            Self::Tree(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::Profile { .. } | Self::Newick { .. } => None,
        }
    }
}

impl From<TreeError> for Error {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::Pattern(e)
    }
}
