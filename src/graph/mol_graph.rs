//! Directed-edge encoding of a single molecule or reaction.
//!
//! Every bond `a1 - a2` with `a1 < a2` becomes two directed edges, `a1 -> a2` then
//! `a2 -> a1`, stored next to each other. Three index arrays tie them together:
//!
//! - `a2b[a]`: the edges coming into atom `a`, in the order they were added
//! - `b2a[b]`: the atom edge `b` starts from
//! - `b2revb[b]`: the edge going the other way
//!
//! An edge's feature row is its origin atom's row followed by the bond's row.

use crate::config::{FeaturizerConfig, ReactionMode};
use crate::error::{ConfigError, DataIntegrityError, FeaturizeError};
use crate::features::*;
use crate::molecule::MoleculeView;
use crate::parse::reaction::{parse_reaction, AtomMapping};
use crate::parse::smiles::SmilesParser;
use itertools::Itertools;
use ndarray::ArrayView2;
use smallvec::SmallVec;
use tracing::*;

/// Incoming edges of one atom. Almost no atom has more than six neighbors.
pub type IncomingEdges = SmallVec<usize, 6>;

/// Caller-supplied descriptors, one row per atom and one row per undirected bond.
///
/// Bond rows are looked up by the molecule's own bond index.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtraFeatures<'a> {
    pub atoms: Option<ArrayView2<'a, f32>>,
    pub bonds: Option<ArrayView2<'a, f32>>,
}
impl<'a> ExtraFeatures<'a> {
    pub const fn new() -> Self {
        Self {
            atoms: None,
            bonds: None,
        }
    }
    pub fn with_atoms(mut self, atoms: ArrayView2<'a, f32>) -> Self {
        self.atoms = Some(atoms);
        self
    }
    pub fn with_bonds(mut self, bonds: ArrayView2<'a, f32>) -> Self {
        self.bonds = Some(bonds);
        self
    }
    pub fn is_empty(&self) -> bool {
        self.atoms.is_none() && self.bonds.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraKind {
    Atom,
    Bond,
}
impl ExtraKind {
    /// Make sure an extra feature array matches the molecule and the configured width.
    fn check<'a>(
        self,
        extra: Option<ArrayView2<'a, f32>>,
        count: usize,
        width: usize,
    ) -> Result<Option<ArrayView2<'a, f32>>, DataIntegrityError> {
        let Some(arr) = extra else {
            return if width > 0 {
                Err(match self {
                    Self::Atom => DataIntegrityError::MissingAtomFeatures { width },
                    Self::Bond => DataIntegrityError::MissingBondFeatures { width },
                })
            } else {
                Ok(None)
            };
        };
        if arr.nrows() != count {
            let (expected, found) = (count, arr.nrows());
            return Err(match self {
                Self::Atom => DataIntegrityError::AtomFeatureCount { expected, found },
                Self::Bond => DataIntegrityError::BondFeatureCount { expected, found },
            });
        }
        if arr.ncols() != width {
            let (expected, found) = (width, arr.ncols());
            return Err(match self {
                Self::Atom => DataIntegrityError::AtomFeatureWidth { expected, found },
                Self::Bond => DataIntegrityError::BondFeatureWidth { expected, found },
            });
        }
        Ok(Some(arr))
    }
}

/// Combine reactant and product features. The first `skip` columns of the second half are
/// dropped.
fn combine(mode: ReactionMode, reac: Vec<f32>, prod: Vec<f32>, skip: usize) -> Vec<f32> {
    let tail = match mode {
        ReactionMode::ReacProd => prod.iter().skip(skip).copied().collect::<Vec<_>>(),
        ReactionMode::ReacDiff | ReactionMode::ProdDiff => prod
            .iter()
            .zip(&reac)
            .skip(skip)
            .map(|(p, r)| p - r)
            .collect(),
    };
    let mut out = if mode == ReactionMode::ProdDiff {
        prod
    } else {
        reac
    };
    out.extend(tail);
    out
}

/// The graph of a single molecule or reaction
#[derive(Debug, Clone, PartialEq)]
pub struct MolGraph {
    n_atoms: usize,
    n_bonds: usize,
    f_atoms: Vec<Vec<f32>>,
    f_bonds: Vec<Vec<f32>>,
    a2b: Vec<IncomingEdges>,
    b2a: Vec<usize>,
    b2revb: Vec<usize>,
    config: FeaturizerConfig,
}
impl MolGraph {
    fn with_atoms(f_atoms: Vec<Vec<f32>>, config: FeaturizerConfig) -> Self {
        let n_atoms = f_atoms.len();
        Self {
            n_atoms,
            n_bonds: 0,
            f_atoms,
            f_bonds: Vec::new(),
            a2b: vec![SmallVec::new(); n_atoms],
            b2a: Vec::new(),
            b2revb: Vec::new(),
            config,
        }
    }

    /// Add both directed edges for a bond between `a1` and `a2`.
    fn push_bond(&mut self, a1: usize, a2: usize, f_bond: &[f32]) {
        let b1 = self.n_bonds;
        let b2 = b1 + 1;
        for origin in [a1, a2] {
            let mut row = Vec::with_capacity(self.f_atoms[origin].len() + f_bond.len());
            row.extend_from_slice(&self.f_atoms[origin]);
            row.extend_from_slice(f_bond);
            self.f_bonds.push(row);
        }
        self.a2b[a2].push(b1);
        self.b2a.push(a1);
        self.a2b[a1].push(b2);
        self.b2a.push(a2);
        self.b2revb.push(b2);
        self.b2revb.push(b1);
        self.n_bonds += 2;
        trace!(a1, a2, b1, b2, "added bond");
    }

    fn log_degenerate(&self) {
        if self.n_atoms == 0 {
            debug!("molecule has no atoms");
        } else if self.n_bonds == 0 {
            debug!(atoms = self.n_atoms, "molecule has no bonds");
        }
    }

    /// Build the graph of a single molecule.
    ///
    /// With a reaction mode configured, the molecule is used as both reactant and product.
    #[instrument(level = "debug", skip_all, fields(atoms = mol.num_atoms(), bonds = mol.num_bonds()))]
    pub fn from_molecule<M: MoleculeView>(
        mol: &M,
        extra: ExtraFeatures<'_>,
        config: FeaturizerConfig,
    ) -> Result<Self, FeaturizeError> {
        config.validate()?;
        if config.is_reaction() {
            return Self::from_reaction(mol, mol, extra, config);
        }
        let n_atoms = mol.num_atoms();
        let atom_extra = ExtraKind::Atom.check(extra.atoms, n_atoms, config.extra_atom_fdim)?;
        let bond_extra =
            ExtraKind::Bond.check(extra.bonds, mol.num_bonds(), config.extra_bond_fdim)?;

        let f_atoms = (0..n_atoms)
            .map(|idx| {
                let mut row = if config.overwrite_default_atom {
                    Vec::with_capacity(config.extra_atom_fdim)
                } else {
                    atom_features(mol.atom(idx))
                };
                if let Some(extra) = atom_extra {
                    row.extend(extra.row(idx).iter().copied());
                }
                row
            })
            .collect();
        let mut graph = Self::with_atoms(f_atoms, config);

        for (a1, a2) in (0..n_atoms).tuple_combinations() {
            let Some((bond_idx, bond)) = mol.bond_between(a1, a2) else {
                continue;
            };
            let mut f_bond = if config.overwrite_default_bond {
                Vec::with_capacity(config.extra_bond_fdim)
            } else {
                bond_features(Some(bond))
            };
            if let Some(extra) = bond_extra {
                if bond_idx >= extra.nrows() {
                    return Err(DataIntegrityError::BondFeatureCount {
                        expected: bond_idx + 1,
                        found: extra.nrows(),
                    }
                    .into());
                }
                f_bond.extend(extra.row(bond_idx).iter().copied());
            }
            graph.push_bond(a1, a2, &f_bond);
        }
        graph.log_degenerate();
        Ok(graph)
    }

    /// Build the graph of a reaction, aligning atoms through their map numbers.
    ///
    /// Atoms are all reactant atoms in order, then the product atoms that don't appear in
    /// the reactants. Features of a side an atom or bond is missing from are null.
    #[instrument(level = "debug", skip_all, fields(reactant_atoms = reactant.num_atoms(), product_atoms = product.num_atoms()))]
    pub fn from_reaction<R: MoleculeView, P: MoleculeView>(
        reactant: &R,
        product: &P,
        extra: ExtraFeatures<'_>,
        config: FeaturizerConfig,
    ) -> Result<Self, FeaturizeError> {
        config.validate()?;
        let Some(mode) = config.reaction else {
            return Err(ConfigError::ReactionModeRequired.into());
        };
        if extra.atoms.is_some() {
            return Err(ConfigError::ExtraAtomFeaturesInReaction.into());
        }
        if extra.bonds.is_some() {
            return Err(ConfigError::ExtraBondFeaturesInReaction.into());
        }
        let mapping = AtomMapping::new(reactant, product)?;
        let n_reac = reactant.num_atoms();

        let mut f_atoms = Vec::with_capacity(n_reac + mapping.only_prod.len());
        for idx in 0..n_reac {
            let f_prod = match mapping.product_of(idx) {
                Some(prod) => {
                    let atom = product.atom(prod).ok_or(
                        DataIntegrityError::UnresolvedProductAtom {
                            reactant_atom: idx,
                            product_atom: prod,
                        },
                    )?;
                    atom_features(Some(atom))
                }
                None => null_atom_features(),
            };
            let f_reac = atom_features(reactant.atom(idx));
            f_atoms.push(combine(mode, f_reac, f_prod, ATOMIC_NUM_BLOCK));
        }
        for &prod in &mapping.only_prod {
            let f_prod = atom_features(product.atom(prod));
            f_atoms.push(combine(mode, null_atom_features(), f_prod, ATOMIC_NUM_BLOCK));
        }
        let mut graph = Self::with_atoms(f_atoms, config);

        let only_prod = &mapping.only_prod;
        for (a1, a2) in (0..graph.n_atoms).tuple_combinations() {
            let (bond_reac, bond_prod) = if a1 >= n_reac {
                (
                    None,
                    product.bond_between(only_prod[a1 - n_reac], only_prod[a2 - n_reac]),
                )
            } else if a2 >= n_reac {
                // a reactant-only atom never bonds to a product-only one
                let prod = mapping
                    .product_of(a1)
                    .and_then(|p1| product.bond_between(p1, only_prod[a2 - n_reac]));
                (None, prod)
            } else {
                let prod = match (mapping.product_of(a1), mapping.product_of(a2)) {
                    (Some(p1), Some(p2)) => product.bond_between(p1, p2),
                    _ => None,
                };
                (reactant.bond_between(a1, a2), prod)
            };
            if bond_reac.is_none() && bond_prod.is_none() {
                continue;
            }
            let f_bond = combine(
                mode,
                bond_features(bond_reac.map(|(_, bond)| bond)),
                bond_features(bond_prod.map(|(_, bond)| bond)),
                0,
            );
            graph.push_bond(a1, a2, &f_bond);
        }
        graph.log_degenerate();
        Ok(graph)
    }

    /// Parse a SMILES string (or a reaction SMILES, if the config has a reaction mode) and
    /// build its graph.
    pub fn from_smiles(smiles: &str, config: FeaturizerConfig) -> Result<Self, FeaturizeError> {
        Self::from_smiles_with_extras(smiles, ExtraFeatures::new(), config)
    }

    #[instrument(level = "debug", skip_all, fields(smiles = smiles))]
    pub fn from_smiles_with_extras(
        smiles: &str,
        extra: ExtraFeatures<'_>,
        config: FeaturizerConfig,
    ) -> Result<Self, FeaturizeError> {
        if config.is_reaction() {
            let (reactant, product) = parse_reaction(smiles, config.explicit_h)?;
            Self::from_reaction(&reactant, &product, extra, config)
        } else {
            let mol = SmilesParser::new(smiles)
                .with_explicit_h(config.explicit_h)
                .parse()?;
            Self::from_molecule(&mol, extra, config)
        }
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }
    /// Number of directed edges, twice the number of bonds
    pub fn n_bonds(&self) -> usize {
        self.n_bonds
    }
    pub fn f_atoms(&self) -> &[Vec<f32>] {
        &self.f_atoms
    }
    pub fn f_bonds(&self) -> &[Vec<f32>] {
        &self.f_bonds
    }
    pub fn a2b(&self) -> &[IncomingEdges] {
        &self.a2b
    }
    pub fn b2a(&self) -> &[usize] {
        &self.b2a
    }
    pub fn b2revb(&self) -> &[usize] {
        &self.b2revb
    }
    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }
    pub fn atom_fdim(&self) -> usize {
        self.config.atom_fdim()
    }
    pub fn bond_fdim(&self) -> usize {
        self.config.bond_fdim(false)
    }
}
