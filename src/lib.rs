#[rustfmt::skip]
pub mod atom_info;
pub mod chem;
pub mod config;
pub mod error;
pub mod features;
pub mod graph;
pub mod molecule;
pub mod parse;
pub mod utils;


pub mod prelude {
    pub use crate::chem::*;
    pub use crate::config::{FeaturizerConfig, ReactionMode};
    pub use crate::error::{ConfigError, DataIntegrityError, FeaturizeError};
    pub use crate::features::{atom_features, bond_features, ATOM_FDIM, BOND_FDIM};
    pub use crate::graph::*;
    pub use crate::molecule::{AtomView, BondView, MoleculeView};
    pub use crate::parse::{parse_reaction, SmilesError, SmilesParser};
    pub use crate::smiles;
}
