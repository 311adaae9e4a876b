//! Classify leaf names as outgroup or ingroup sequences.
//!
//! Two strategies are available:
//! - **Substring**: the profile's outgroup and ingroup alternations are
//!   compiled to regexes and searched anywhere in the leaf name. A leaf may
//!   therefore match both, one, or neither pattern.
//! - **Prefix**: the species id is the part of the leaf name before the first
//!   delimiter and is looked up in a map built from the profile.

use crate::config::MatchMode;
use crate::error::Result;
use crate::profile::SpeciesProfile;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Outgroup,
    Ingroup,
}

/// Leaf-name classifier built once per run from a [`SpeciesProfile`].
#[derive(Debug, Clone)]
pub enum LeafClassifier {
    Substring {
        /// `None` when the profile has no species of that kind; never matches.
        outgroup: Option<Regex>,
        ingroup: Option<Regex>,
    },
    Prefix {
        delimiter: char,
        categories: HashMap<String, Category>,
    },
}

impl LeafClassifier {
    pub fn new(profile: &SpeciesProfile, mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Substring => Ok(Self::Substring {
                outgroup: compile(&profile.outgroup_pattern())?,
                ingroup: compile(&profile.ingroup_pattern())?,
            }),
            MatchMode::Prefix { delimiter } => {
                let categories = profile
                    .outgroup_species()
                    .map(|id| (id.to_string(), Category::Outgroup))
                    .chain(profile.ingroup_species().map(|id| (id.to_string(), Category::Ingroup)))
                    .collect();
                Ok(Self::Prefix { delimiter, categories })
            }
        }
    }

    pub fn is_outgroup(&self, leaf_name: &str) -> bool {
        match self {
            Self::Substring { outgroup, .. } => {
                outgroup.as_ref().is_some_and(|re| re.is_match(leaf_name))
            }
            Self::Prefix { .. } => self.prefix_category(leaf_name) == Some(Category::Outgroup),
        }
    }

    pub fn is_ingroup(&self, leaf_name: &str) -> bool {
        match self {
            Self::Substring { ingroup, .. } => {
                ingroup.as_ref().is_some_and(|re| re.is_match(leaf_name))
            }
            Self::Prefix { .. } => self.prefix_category(leaf_name) == Some(Category::Ingroup),
        }
    }

    fn prefix_category(&self, leaf_name: &str) -> Option<Category> {
        let Self::Prefix { delimiter, categories } = self else {
            return None;
        };
        let species = leaf_name
            .split_once(*delimiter)
            .map_or(leaf_name, |(species, _)| species);
        categories.get(species).copied()
    }
}

/// An empty alternation would match every string, so it becomes `None`.
fn compile(pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Ok(Some(Regex::new(pattern)?))
}
