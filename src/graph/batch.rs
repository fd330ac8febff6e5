//! Collation of many single graphs into one padded batch.
//!
//! Row 0 of every array is a padding sentinel: a zero feature row, no incoming edges, and
//! `b2a[0] == b2revb[0] == 0`. Real atoms and edges start at index 1, so index 0 can be
//! used as padding in `a2b` without pointing at anything real.

use super::mol_graph::{ExtraFeatures, IncomingEdges, MolGraph};
use crate::config::FeaturizerConfig;
use crate::error::{ConfigError, DataIntegrityError, FeaturizeError};
use ndarray::prelude::*;
use once_cell::sync::OnceCell;
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::ops::Range;
use tracing::*;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Where one molecule's rows are in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    pub start: usize,
    pub len: usize,
}
impl Scope {
    pub fn range(self) -> Range<usize> {
        self.start..(self.start + self.len)
    }
    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Borrowed view of everything a model needs from a batch
#[derive(Debug, Clone, Copy)]
pub struct BatchComponents<'a> {
    pub f_atoms: ArrayView2<'a, f32>,
    pub f_bonds: ArrayView2<'a, f32>,
    pub a2b: ArrayView2<'a, usize>,
    pub b2a: ArrayView1<'a, usize>,
    pub b2revb: ArrayView1<'a, usize>,
    pub a_scope: &'a [Scope],
    pub b_scope: &'a [Scope],
}

/// Many molecule graphs packed into shared arrays
#[derive(Debug, Clone)]
pub struct BatchMolGraph {
    config: FeaturizerConfig,
    f_atoms: Array2<f32>,
    f_bonds: Array2<f32>,
    a2b: Array2<usize>,
    b2a: Array1<usize>,
    b2revb: Array1<usize>,
    a_scope: Vec<Scope>,
    b_scope: Vec<Scope>,
    max_num_bonds: usize,
    b2b: OnceCell<Array2<usize>>,
    a2a: OnceCell<Array2<usize>>,
}
impl BatchMolGraph {
    /// Collate `graphs` in order. Every graph has to have been built with `config`.
    #[instrument(level = "debug", skip_all)]
    pub fn new<G: Borrow<MolGraph>>(
        config: FeaturizerConfig,
        graphs: impl IntoIterator<Item = G>,
    ) -> Result<Self, FeaturizeError> {
        let atom_fdim = config.atom_fdim();
        let bond_fdim = config.bond_fdim(false);

        // start with the padding row
        let mut n_atoms = 1;
        let mut n_bonds = 1;
        let mut f_atoms = vec![0.0; atom_fdim];
        let mut f_bonds = vec![0.0; bond_fdim];
        let mut a2b: Vec<IncomingEdges> = vec![SmallVec::new()];
        let mut b2a = vec![0];
        let mut b2revb = vec![0];
        let mut a_scope = Vec::new();
        let mut b_scope = Vec::new();

        for (index, graph) in graphs.into_iter().enumerate() {
            let graph = graph.borrow();
            if *graph.config() != config {
                return Err(ConfigError::MixedConfig { index }.into());
            }
            f_atoms.extend(graph.f_atoms().iter().flatten());
            f_bonds.extend(graph.f_bonds().iter().flatten());
            a2b.extend(
                graph
                    .a2b()
                    .iter()
                    .map(|incoming| incoming.iter().map(|b| b + n_bonds).collect::<IncomingEdges>()),
            );
            for (&origin, &rev) in graph.b2a().iter().zip(graph.b2revb()) {
                b2a.push(origin + n_atoms);
                b2revb.push(rev + n_bonds);
            }
            a_scope.push(Scope {
                start: n_atoms,
                len: graph.n_atoms(),
            });
            b_scope.push(Scope {
                start: n_bonds,
                len: graph.n_bonds(),
            });
            n_atoms += graph.n_atoms();
            n_bonds += graph.n_bonds();
        }

        // some models need at least one column, even for a batch of lone atoms
        let max_num_bonds = a2b.iter().map(|incoming| incoming.len()).max().unwrap_or(0).max(1);
        let mut a2b_arr = Array2::zeros((n_atoms, max_num_bonds));
        for (mut row, incoming) in a2b_arr.rows_mut().into_iter().zip(&a2b) {
            for (slot, &b) in row.iter_mut().zip(incoming) {
                *slot = b;
            }
        }

        debug!(
            molecules = a_scope.len(),
            atoms = n_atoms - 1,
            edges = n_bonds - 1,
            max_num_bonds,
            "collated batch"
        );
        Ok(Self {
            config,
            f_atoms: Array2::from_shape_vec((n_atoms, atom_fdim), f_atoms)?,
            f_bonds: Array2::from_shape_vec((n_bonds, bond_fdim), f_bonds)?,
            a2b: a2b_arr,
            b2a: Array1::from(b2a),
            b2revb: Array1::from(b2revb),
            a_scope,
            b_scope,
            max_num_bonds,
            b2b: OnceCell::new(),
            a2a: OnceCell::new(),
        })
    }

    /// The arrays a model consumes. With `atom_messages`, edge rows only keep their bond
    /// part and drop the origin atom's features.
    pub fn components(&self, atom_messages: bool) -> BatchComponents<'_> {
        let f_bonds = if atom_messages {
            let start = self.f_bonds.ncols() - self.config.bond_fdim(true);
            self.f_bonds.slice(s![.., start..])
        } else {
            self.f_bonds.view()
        };
        BatchComponents {
            f_atoms: self.f_atoms.view(),
            f_bonds,
            a2b: self.a2b.view(),
            b2a: self.b2a.view(),
            b2revb: self.b2revb.view(),
            a_scope: &self.a_scope,
            b_scope: &self.b_scope,
        }
    }

    /// For every edge, the edges coming into its origin atom, except its own reverse.
    ///
    /// Computed on first use.
    pub fn b2b(&self) -> &Array2<usize> {
        self.b2b.get_or_init(|| {
            let mut b2b = Array2::zeros((self.b2a.len(), self.max_num_bonds));
            for (b, mut row) in b2b.rows_mut().into_iter().enumerate() {
                let rev = self.b2revb[b];
                for (slot, &incoming) in row.iter_mut().zip(self.a2b.row(self.b2a[b])) {
                    if incoming != rev {
                        *slot = incoming;
                    }
                }
            }
            trace!(edges = self.b2a.len(), "computed b2b");
            b2b
        })
    }

    /// For every atom, the origins of its incoming edges. Computed on first use.
    pub fn a2a(&self) -> &Array2<usize> {
        self.a2a.get_or_init(|| self.a2b.mapv(|b| self.b2a[b]))
    }

    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }
    /// Number of atom rows, including the padding row
    pub fn n_atoms(&self) -> usize {
        self.f_atoms.nrows()
    }
    /// Number of edge rows, including the padding row
    pub fn n_bonds(&self) -> usize {
        self.f_bonds.nrows()
    }
    pub fn n_mols(&self) -> usize {
        self.a_scope.len()
    }
    pub fn atom_fdim(&self) -> usize {
        self.f_atoms.ncols()
    }
    pub fn bond_fdim(&self) -> usize {
        self.f_bonds.ncols()
    }
    pub fn f_atoms(&self) -> ArrayView2<'_, f32> {
        self.f_atoms.view()
    }
    pub fn f_bonds(&self) -> ArrayView2<'_, f32> {
        self.f_bonds.view()
    }
    pub fn a2b(&self) -> ArrayView2<'_, usize> {
        self.a2b.view()
    }
    pub fn b2a(&self) -> ArrayView1<'_, usize> {
        self.b2a.view()
    }
    pub fn b2revb(&self) -> ArrayView1<'_, usize> {
        self.b2revb.view()
    }
    pub fn a_scope(&self) -> &[Scope] {
        &self.a_scope
    }
    pub fn b_scope(&self) -> &[Scope] {
        &self.b_scope
    }
    pub fn max_num_bonds(&self) -> usize {
        self.max_num_bonds
    }
}

/// Parse and featurize a list of SMILES strings into a batch.
pub fn mol2graph<I, S>(smiles: I, config: FeaturizerConfig) -> Result<BatchMolGraph, FeaturizeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    mol2graph_with_extras(smiles, &[], config)
}

/// Like [`mol2graph`], with extra descriptors paired up with molecules by position.
///
/// Molecules past the end of `extras` get none.
#[instrument(level = "debug", skip_all, fields(extras = extras.len()))]
pub fn mol2graph_with_extras<I, S>(
    smiles: I,
    extras: &[ExtraFeatures<'_>],
    config: FeaturizerConfig,
) -> Result<BatchMolGraph, FeaturizeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let owned = smiles.into_iter().collect::<Vec<_>>();
    let smiles = owned.iter().map(|s| s.as_ref()).collect::<Vec<&str>>();
    if extras.len() > smiles.len() {
        return Err(DataIntegrityError::SurplusExtraFeatures {
            extras: extras.len(),
            molecules: smiles.len(),
        }
        .into());
    }
    let build = |(idx, smiles): (usize, &&str)| {
        let extra = extras.get(idx).copied().unwrap_or_default();
        MolGraph::from_smiles_with_extras(smiles, extra, config)
    };
    #[cfg(feature = "rayon")]
    let graphs = smiles
        .par_iter()
        .enumerate()
        .map(build)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "rayon"))]
    let graphs = smiles
        .iter()
        .enumerate()
        .map(build)
        .collect::<Result<Vec<_>, _>>()?;
    BatchMolGraph::new(config, graphs)
}
