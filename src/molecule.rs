//! Read-only views of a molecule, as the featurizer sees it.
//!
//! Anything that can answer these questions can be featurized. The SMILES parser's
//! [`MoleculeGraph`] is the implementation shipped with this crate.

use crate::chem::*;
use petgraph::graph::NodeIndex;

/// Per-atom properties read by the atom feature encoder
pub trait AtomView {
    fn atomic_num(&self) -> u8;
    /// Number of neighbors, counting attached hydrogens
    fn total_degree(&self) -> u32;
    fn formal_charge(&self) -> i32;
    fn chiral_tag(&self) -> ChiralTag;
    /// Explicit and implicit hydrogens, not counting hydrogen atoms in the graph
    fn total_num_hs(&self) -> u32;
    fn hybridization(&self) -> Hybridization;
    fn is_aromatic(&self) -> bool;
    fn mass(&self) -> f32;
    /// Atom map number used to align reactants with products, 0 for unmapped atoms
    fn map_num(&self) -> u32;
}

/// Per-bond properties read by the bond feature encoder
pub trait BondView {
    fn bond_type(&self) -> BondType;
    fn is_conjugated(&self) -> bool;
    fn is_in_ring(&self) -> bool;
    fn stereo(&self) -> BondStereo;
}

pub trait MoleculeView {
    type Atom: AtomView;
    type Bond: BondView;

    fn num_atoms(&self) -> usize;
    /// Number of undirected bonds
    fn num_bonds(&self) -> usize;
    fn atom(&self, idx: usize) -> Option<&Self::Atom>;
    /// The bond between two atoms and its index in the molecule, if they're bonded
    fn bond_between(&self, a: usize, b: usize) -> Option<(usize, &Self::Bond)>;
}

/// Iterate over a molecule's atoms in index order
pub fn atoms_of<M: MoleculeView>(mol: &M) -> impl Iterator<Item = (usize, &M::Atom)> + '_ {
    (0..mol.num_atoms()).filter_map(|idx| mol.atom(idx).map(|atom| (idx, atom)))
}

impl AtomView for Atom {
    fn atomic_num(&self) -> u8 {
        self.protons
    }
    fn total_degree(&self) -> u32 {
        self.total_degree as u32
    }
    fn formal_charge(&self) -> i32 {
        self.charge as i32
    }
    fn chiral_tag(&self) -> ChiralTag {
        self.chiral_tag
    }
    fn total_num_hs(&self) -> u32 {
        self.total_hs() as u32
    }
    fn hybridization(&self) -> Hybridization {
        self.hybridization
    }
    fn is_aromatic(&self) -> bool {
        self.aromatic
    }
    fn mass(&self) -> f32 {
        Atom::mass(self)
    }
    fn map_num(&self) -> u32 {
        self.map_num
    }
}

impl BondView for Bond {
    fn bond_type(&self) -> BondType {
        self.kind
    }
    fn is_conjugated(&self) -> bool {
        self.conjugated
    }
    fn is_in_ring(&self) -> bool {
        self.in_ring
    }
    fn stereo(&self) -> BondStereo {
        self.stereo
    }
}

impl MoleculeView for MoleculeGraph {
    type Atom = Atom;
    type Bond = Bond;

    fn num_atoms(&self) -> usize {
        self.node_count()
    }
    fn num_bonds(&self) -> usize {
        self.edge_count()
    }
    fn atom(&self, idx: usize) -> Option<&Atom> {
        self.node_weight(NodeIndex::new(idx))
    }
    fn bond_between(&self, a: usize, b: usize) -> Option<(usize, &Bond)> {
        let edge = self.find_edge(NodeIndex::new(a), NodeIndex::new(b))?;
        self.edge_weight(edge).map(|bond| (edge.index(), bond))
    }
}
