use crate::parse::smiles::SmilesError;
use thiserror::Error;

/// The featurizer was asked to do something its configuration doesn't allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("extra atom features are not supported for reactions")]
    ExtraAtomFeaturesInReaction,
    #[error("extra bond features are not supported for reactions")]
    ExtraBondFeaturesInReaction,
    #[error("default atom features can only be overwritten by extra atom features")]
    OverwriteWithoutExtraAtom,
    #[error("default bond features can only be overwritten by extra bond features")]
    OverwriteWithoutExtraBond,
    #[error("reaction graphs need a reaction mode in the configuration")]
    ReactionModeRequired,
    #[error("graph {index} was built with a different feature configuration than the batch")]
    MixedConfig { index: usize },
    #[error("unknown reaction mode {0:?}, expected reac_prod, reac_diff or prod_diff")]
    UnknownReactionMode(String),
}

/// The input data doesn't line up with the molecule it describes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("got extra features for {found} atoms, but the molecule has {expected}")]
    AtomFeatureCount { expected: usize, found: usize },
    #[error("got extra features for {found} bonds, but the molecule has {expected}")]
    BondFeatureCount { expected: usize, found: usize },
    #[error("extra atom features have width {found}, the configuration says {expected}")]
    AtomFeatureWidth { expected: usize, found: usize },
    #[error("extra bond features have width {found}, the configuration says {expected}")]
    BondFeatureWidth { expected: usize, found: usize },
    #[error("the configuration declares {width} extra atom features, but none were given")]
    MissingAtomFeatures { width: usize },
    #[error("the configuration declares {width} extra bond features, but none were given")]
    MissingBondFeatures { width: usize },
    #[error("reactant atom {reactant_atom} maps to product atom {product_atom}, which doesn't exist")]
    UnresolvedProductAtom {
        reactant_atom: usize,
        product_atom: usize,
    },
    #[error("atom map number {0} is used more than once on one side of the reaction")]
    DuplicateMapNumber(u32),
    #[error("got {extras} sets of extra features for {molecules} molecules")]
    SurplusExtraFeatures { extras: usize, molecules: usize },
}

/// Anything that can go wrong while building a graph or a batch
#[derive(Debug, Error)]
pub enum FeaturizeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error(transparent)]
    Smiles(#[from] SmilesError),
    #[error("feature rows don't form a rectangular array: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
