//! Derived properties of a freshly parsed molecule.
//!
//! SMILES only says which atoms and bonds exist. Everything the feature encoders read on
//! top of that (hydrogen counts, degrees, rings, conjugation, hybridization and double
//! bond stereo) is filled in here, in that order since later passes read earlier ones.

use crate::atom_info::ELEMENTS;
use crate::chem::*;
use petgraph::algo::has_path_connecting;
use petgraph::prelude::*;
use petgraph::visit::EdgeFiltered;
use tracing::*;

/// Run every perception pass over `graph`.
///
/// Unless `explicit_h` is set, hydrogen atoms that are plain leaves are removed and counted
/// on their neighbor instead.
#[instrument(level = "debug", skip_all, fields(atoms = graph.node_count(), explicit_h = explicit_h))]
pub fn perceive(graph: &mut MoleculeGraph, explicit_h: bool) {
    if !explicit_h {
        fold_hydrogens(graph);
    }
    update_hydrogens(graph);
    update_degrees(graph);
    update_rings(graph);
    update_conjugation(graph);
    update_hybridization(graph);
    update_stereo(graph);
}

/// A hydrogen atom that carries no information beyond being attached to its neighbor
fn is_foldable_h(graph: &MoleculeGraph, idx: NodeIndex) -> Option<NodeIndex> {
    let atom = &graph[idx];
    if atom.protons != 1
        || atom.isotope != 0
        || atom.charge != 0
        || atom.map_num != 0
        || atom.explicit_hs != 0
    {
        return None;
    }
    let mut edges = graph.edges(idx);
    let edge = edges.next()?;
    if edges.next().is_some() || edge.weight().kind != BondType::Single {
        return None;
    }
    let other = if edge.source() == idx {
        edge.target()
    } else {
        edge.source()
    };
    (graph[other].protons != 1).then_some(other)
}

fn fold_hydrogens(graph: &mut MoleculeGraph) {
    let folded = graph
        .node_indices()
        .filter_map(|idx| Some((idx, is_foldable_h(graph, idx)?)))
        .collect::<Vec<_>>();
    if folded.is_empty() {
        return;
    }
    trace!(count = folded.len(), "folding hydrogens");
    let mut remove = vec![false; graph.node_count()];
    for &(h, parent) in &folded {
        remove[h.index()] = true;
        let atom = &mut graph[parent];
        atom.explicit_hs = atom.explicit_hs.saturating_add(1);
    }
    // filter_map keeps the relative order of what's left, unlike remove_node
    *graph = graph.filter_map(
        |idx, atom| (!remove[idx.index()]).then(|| atom.clone()),
        |_, bond| Some(bond.clone()),
    );
}

fn update_hydrogens(graph: &mut MoleculeGraph) {
    for idx in graph.node_indices() {
        let atom = &graph[idx];
        if atom.no_implicit {
            continue;
        }
        let Some(valences) = ELEMENTS.get(atom.protons as usize).map(|e| e.valences) else {
            continue;
        };
        let mut bond_sum = 0u8;
        let mut aromatic_bonds = 0u8;
        for edge in graph.edges(idx) {
            let kind = edge.weight().kind;
            bond_sum = bond_sum.saturating_add(kind.valence());
            if kind == BondType::Aromatic {
                aromatic_bonds = aromatic_bonds.saturating_add(1);
            }
        }
        let implicit = if atom.aromatic && aromatic_bonds > 0 {
            // one electron goes into the pi system
            let used = bond_sum.saturating_add(1).saturating_add(atom.explicit_hs);
            valences.first().map_or(0, |v| v.saturating_sub(used))
        } else {
            let used = bond_sum.saturating_add(atom.explicit_hs);
            valences
                .iter()
                .find(|&&v| v >= used)
                .map_or(0, |v| v - used)
        };
        graph[idx].implicit_hs = implicit;
    }
}

fn update_degrees(graph: &mut MoleculeGraph) {
    for idx in graph.node_indices() {
        let neighbors = u8::try_from(graph.edges(idx).count()).unwrap_or(u8::MAX);
        let degree = neighbors.saturating_add(graph[idx].total_hs());
        let atom = &mut graph[idx];
        atom.total_degree = degree;
        if atom.chiral_tag.is_chiral() && degree < 3 {
            warn!(
                atom = idx.index(),
                degree, "chiral tag on an atom with fewer than three neighbors"
            );
        }
    }
}

/// A bond is in a ring iff its endpoints are still connected once it's gone.
fn update_rings(graph: &mut MoleculeGraph) {
    let in_ring = graph
        .edge_references()
        .map(|edge| {
            let id = edge.id();
            let filtered = EdgeFiltered::from_fn(&*graph, |e| e.id() != id);
            has_path_connecting(&filtered, edge.source(), edge.target(), None)
        })
        .collect::<Vec<_>>();
    for (bond, ring) in graph.edge_weights_mut().zip(in_ring) {
        bond.in_ring = ring;
    }
}

fn update_conjugation(graph: &mut MoleculeGraph) {
    let unsaturated = graph
        .node_indices()
        .map(|idx| graph.edges(idx).any(|e| e.weight().kind.is_multiple()))
        .collect::<Vec<_>>();
    let donor = graph
        .node_indices()
        .map(|idx| {
            let atom = &graph[idx];
            matches!(atom.protons, 7 | 8 | 16) && !unsaturated[idx.index()] && atom.charge <= 0
        })
        .collect::<Vec<_>>();
    let conjugated = graph
        .edge_references()
        .map(|edge| {
            let u = edge.source().index();
            let v = edge.target().index();
            match edge.weight().kind {
                BondType::Aromatic => true,
                BondType::Single => {
                    (unsaturated[u] && (unsaturated[v] || donor[v]))
                        || (unsaturated[v] && donor[u])
                }
                _ => false,
            }
        })
        .collect::<Vec<_>>();
    // multiple bonds are conjugated when they sit next to a conjugated single bond
    let conjugated = graph
        .edge_references()
        .map(|edge| {
            let idx = edge.id().index();
            if conjugated[idx] || !edge.weight().kind.is_multiple() {
                return conjugated[idx];
            }
            [edge.source(), edge.target()].into_iter().any(|end| {
                graph.edges(end).any(|other| {
                    other.weight().kind == BondType::Single && conjugated[other.id().index()]
                })
            })
        })
        .collect::<Vec<_>>();
    for (bond, conj) in graph.edge_weights_mut().zip(conjugated) {
        bond.conjugated = conj;
    }
}

fn update_hybridization(graph: &mut MoleculeGraph) {
    for idx in graph.node_indices() {
        let mut doubles = 0;
        let mut triples = 0;
        let mut aromatic = false;
        let mut conjugated = false;
        for edge in graph.edges(idx) {
            let bond = edge.weight();
            match bond.kind {
                BondType::Double => doubles += 1,
                BondType::Triple | BondType::Quadruple => triples += 1,
                BondType::Aromatic => aromatic = true,
                BondType::Single => {}
            }
            conjugated |= bond.conjugated;
        }
        let atom = &graph[idx];
        let degree = atom.total_degree;
        let hyb = match atom.protons {
            0 => Hybridization::Unspecified,
            1 | 2 => Hybridization::S,
            _ if degree == 0 => Hybridization::S,
            _ if triples > 0 || (doubles >= 2 && degree == 2) => Hybridization::Sp,
            p if (doubles == 1 || aromatic || (conjugated && matches!(p, 7 | 8)))
                && degree <= 3 =>
            {
                Hybridization::Sp2
            }
            _ => match degree {
                0..=4 => Hybridization::Sp3,
                5 => Hybridization::Sp3d,
                6 => Hybridization::Sp3d2,
                _ => Hybridization::Other,
            },
        };
        graph[idx].hybridization = hyb;
    }
}

/// Direction of the first marked bond around `end`, other than `skip`, as seen from `end`.
fn reference_dir(graph: &MoleculeGraph, end: NodeIndex, skip: EdgeIndex) -> Option<BondDir> {
    graph.edges(end).find_map(|edge| {
        let bond = edge.weight();
        if edge.id() == skip || bond.kind == BondType::Double || bond.dir == BondDir::None {
            return None;
        }
        // undirected edge references may be swapped, the stored order is what the marker is
        // relative to
        let (source, _) = graph.edge_endpoints(edge.id())?;
        Some(if source == end {
            bond.dir
        } else {
            bond.dir.flipped()
        })
    })
}

fn update_stereo(graph: &mut MoleculeGraph) {
    let stereo = graph
        .edge_references()
        .filter(|edge| edge.weight().kind == BondType::Double)
        .filter_map(|edge| {
            let (u, v) = graph.edge_endpoints(edge.id())?;
            let du = reference_dir(graph, u, edge.id())?;
            let dv = reference_dir(graph, v, edge.id())?;
            let stereo = if du == dv {
                BondStereo::Cis
            } else {
                BondStereo::Trans
            };
            Some((edge.id(), stereo))
        })
        .collect::<Vec<_>>();
    for (id, stereo) in stereo {
        trace!(bond = id.index(), ?stereo, "assigning double bond stereo");
        graph[id].stereo = stereo;
    }
}
