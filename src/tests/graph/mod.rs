use super::macros::*;
use crate::prelude::*;

mod mol_graph;

/// Check the index invariants every single graph has to hold
fn check_invariants(graph: &MolGraph) {
    assert_eq!(graph.n_bonds() % 2, 0);
    assert_eq!(graph.b2a().len(), graph.n_bonds());
    assert_eq!(graph.b2revb().len(), graph.n_bonds());
    assert_eq!(graph.f_bonds().len(), graph.n_bonds());
    assert_eq!(graph.a2b().len(), graph.n_atoms());
    for b in 0..graph.n_bonds() {
        let rev = graph.b2revb()[b];
        assert_ne!(rev, b);
        assert_eq!(graph.b2revb()[rev], b);
        assert_ne!(graph.b2a()[rev], graph.b2a()[b]);
        // b points at the atom its reverse starts from
        assert!(graph.a2b()[graph.b2a()[rev]].contains(&b));
    }
}
