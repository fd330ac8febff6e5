use crate::prelude::*;
use petgraph::graph::{EdgeIndex, NodeIndex};

mod parse;
mod perceive;

fn atom(graph: &MoleculeGraph, idx: usize) -> &Atom {
    &graph[NodeIndex::new(idx)]
}

fn bond(graph: &MoleculeGraph, idx: usize) -> &Bond {
    &graph[EdgeIndex::new(idx)]
}
