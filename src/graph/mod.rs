//! Graph encodings of molecules and batches of them.

pub mod batch;
pub mod mol_graph;

pub use batch::{mol2graph, mol2graph_with_extras, BatchComponents, BatchMolGraph, Scope};
pub use mol_graph::{ExtraFeatures, IncomingEdges, MolGraph};
