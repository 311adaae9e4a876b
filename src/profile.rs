//! Species profile: which species count as outgroup and which as ingroup.
//!
//! A profile is a whitespace-delimited table with one `<species_id> <count>`
//! record per line. Species with a count of 0 are outgroup species, every
//! other species is an ingroup species.
//!
//! ```text
//! hsa   3
//! ptr   2
//! dme   0
//! ```
//!
//! Here `hsa` and `ptr` are ingroup species and `dme` is an outgroup species.

use crate::error::{Error, Result};
use log::warn;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Parsed species profile.
///
/// Species are kept in the order they first appear in the file so that the
/// derived patterns are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesProfile {
    /// (species id, sequence count), in first-appearance order
    species: Vec<(String, u64)>,
    /// species id -> index into `species`
    index: HashMap<String, usize>,
}

impl SpeciesProfile {
    /// Read a profile from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|e| match e {
            Error::Io { source, .. } => Error::Io { path: path.to_path_buf(), source },
            other => other,
        })
    }

    /// Read a profile from any reader, one record per line.
    ///
    /// Blank lines are skipped and tokens past the second are ignored. A
    /// species listed twice keeps its first position but takes the count of
    /// its last record.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut profile = SpeciesProfile::default();

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| Error::Io { path: "<profile>".into(), source })?;

            let mut tokens = line.split_whitespace();
            let Some(species_id) = tokens.next() else {
                continue;
            };
            let count = tokens.next().ok_or_else(|| Error::Profile {
                line: line_no,
                message: format!("species '{species_id}' has no sequence count"),
            })?;
            let count = count.parse::<u64>().map_err(|e| Error::Profile {
                line: line_no,
                message: format!("sequence count '{count}' for '{species_id}': {e}"),
            })?;

            profile.insert(species_id, count, line_no);
        }

        Ok(profile)
    }

    fn insert(&mut self, species_id: &str, count: u64, line_no: usize) {
        match self.index.get(species_id) {
            Some(&pos) => {
                warn!(
                    "Species '{species_id}' listed again at profile line {line_no}; count {} replaced by {count}",
                    self.species[pos].1
                );
                self.species[pos].1 = count;
            }
            None => {
                self.index.insert(species_id.to_string(), self.species.len());
                self.species.push((species_id.to_string(), count));
            }
        }
    }

    /// Total number of distinct species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species with a zero sequence count, in profile order.
    pub fn outgroup_species(&self) -> impl Iterator<Item = &str> {
        self.species.iter().filter(|(_, c)| *c == 0).map(|(id, _)| id.as_str())
    }

    /// Species with a non-zero sequence count, in profile order.
    pub fn ingroup_species(&self) -> impl Iterator<Item = &str> {
        self.species.iter().filter(|(_, c)| *c > 0).map(|(id, _)| id.as_str())
    }

    /// Sequence count of an ingroup species. Outgroup and unknown species give `None`.
    pub fn sequence_count(&self, species_id: &str) -> Option<u64> {
        let &pos = self.index.get(species_id)?;
        let count = self.species[pos].1;
        (count > 0).then_some(count)
    }

    /// Map of ingroup species id to sequence count.
    pub fn species_counts(&self) -> HashMap<&str, u64> {
        self.species
            .iter()
            .filter(|(_, c)| *c > 0)
            .map(|(id, c)| (id.as_str(), *c))
            .collect()
    }

    /// Sum of all ingroup sequence counts.
    pub fn total_sequences(&self) -> u64 {
        self.species.iter().map(|(_, c)| c).sum()
    }

    /// Alternation of all outgroup species ids, e.g. `dme|cel`.
    ///
    /// Ids are regex-escaped so that they match literally. Empty when the
    /// profile has no outgroup species.
    pub fn outgroup_pattern(&self) -> String {
        join_pattern(self.outgroup_species())
    }

    /// Alternation of all ingroup species ids, e.g. `hsa|ptr`.
    pub fn ingroup_pattern(&self) -> String {
        join_pattern(self.ingroup_species())
    }
}

impl FromStr for SpeciesProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

fn join_pattern<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.map(regex::escape).collect::<Vec<_>>().join("|")
}
