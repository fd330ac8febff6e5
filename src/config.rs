//! Feature-dimension configuration.
//!
//! A [`FeaturizerConfig`] is fixed for the lifetime of a batch: every graph remembers the
//! config it was built with, and a batch refuses graphs built with a different one.

use crate::error::ConfigError;
use crate::features::{ATOM_FDIM, BOND_FDIM, REACTION_ATOM_FDIM};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How reactant and product features are combined for a reaction graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionMode {
    /// Reactant features, then product features
    ReacProd,
    /// Reactant features, then the product - reactant difference
    ReacDiff,
    /// Product features, then the product - reactant difference
    ProdDiff,
}
impl ReactionMode {
    pub const ALL: [Self; 3] = [Self::ReacProd, Self::ReacDiff, Self::ProdDiff];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReacProd => "reac_prod",
            Self::ReacDiff => "reac_diff",
            Self::ProdDiff => "prod_diff",
        }
    }
}
impl Display for ReactionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for ReactionMode {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownReactionMode(s.to_string()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeaturizerConfig {
    /// Keep hydrogen atoms written in the input as graph atoms
    pub explicit_h: bool,
    /// Treat inputs as reactant/product pairs
    pub reaction: Option<ReactionMode>,
    /// Width of the caller-supplied per-atom descriptors
    pub extra_atom_fdim: usize,
    /// Width of the caller-supplied per-bond descriptors
    pub extra_bond_fdim: usize,
    /// Replace the default atom features with the extra ones instead of appending them
    pub overwrite_default_atom: bool,
    /// Replace the default bond features with the extra ones instead of appending them
    pub overwrite_default_bond: bool,
}
impl FeaturizerConfig {
    pub const fn new() -> Self {
        Self {
            explicit_h: false,
            reaction: None,
            extra_atom_fdim: 0,
            extra_bond_fdim: 0,
            overwrite_default_atom: false,
            overwrite_default_bond: false,
        }
    }

    pub fn with_explicit_h(mut self, explicit_h: bool) -> Self {
        self.explicit_h = explicit_h;
        self
    }
    pub fn with_reaction(mut self, mode: Option<ReactionMode>) -> Self {
        self.reaction = mode;
        self
    }
    pub fn with_extra_atom_features(mut self, width: usize, overwrite: bool) -> Self {
        self.extra_atom_fdim = width;
        self.overwrite_default_atom = overwrite;
        self
    }
    pub fn with_extra_bond_features(mut self, width: usize, overwrite: bool) -> Self {
        self.extra_bond_fdim = width;
        self.overwrite_default_bond = overwrite;
        self
    }

    pub fn is_reaction(&self) -> bool {
        self.reaction.is_some()
    }

    /// Check that the flags make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_reaction() {
            if self.extra_atom_fdim > 0 {
                return Err(ConfigError::ExtraAtomFeaturesInReaction);
            }
            if self.extra_bond_fdim > 0 {
                return Err(ConfigError::ExtraBondFeaturesInReaction);
            }
        }
        if self.overwrite_default_atom && self.extra_atom_fdim == 0 {
            return Err(ConfigError::OverwriteWithoutExtraAtom);
        }
        if self.overwrite_default_bond && self.extra_bond_fdim == 0 {
            return Err(ConfigError::OverwriteWithoutExtraBond);
        }
        Ok(())
    }

    /// Width of an atom feature row
    pub fn atom_fdim(&self) -> usize {
        let base = if self.overwrite_default_atom {
            0
        } else {
            ATOM_FDIM
        };
        let reaction = if self.is_reaction() {
            REACTION_ATOM_FDIM
        } else {
            0
        };
        base + self.extra_atom_fdim + reaction
    }

    /// Width of a bond feature row.
    ///
    /// Edge rows start with the origin atom's features; with `atom_messages`, only the
    /// trailing bond part is counted.
    pub fn bond_fdim(&self, atom_messages: bool) -> usize {
        let base = if self.overwrite_default_bond {
            0
        } else {
            BOND_FDIM
        };
        let reaction = if self.is_reaction() { BOND_FDIM } else { 0 };
        let atom = if atom_messages { 0 } else { self.atom_fdim() };
        base + self.extra_bond_fdim + reaction + atom
    }
}
