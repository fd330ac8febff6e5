//! Reaction SMILES and atom-map alignment between reactants and products.

use crate::chem::MoleculeGraph;
use crate::error::DataIntegrityError;
use crate::molecule::{atoms_of, AtomView, MoleculeView};
use crate::parse::smiles::{SmilesError, SmilesParser};
use ahash::{AHashMap, AHashSet};
use bstr::ByteSlice;
use tracing::*;

/// Parse a `reactants>agents>products` string.
///
/// Only the text before the first `>` and after the last one is used, agents are ignored.
/// Without any `>`, the same molecule is used for both sides. Error indices are relative to
/// the whole input.
#[instrument(level = "debug", skip_all)]
pub fn parse_reaction<I: AsRef<[u8]> + ?Sized>(
    input: &I,
    explicit_h: bool,
) -> Result<(MoleculeGraph, MoleculeGraph), SmilesError> {
    let input = input.as_ref();
    let reac_end = input.find_byte(b'>').unwrap_or(input.len());
    let prod_start = input.rfind_byte(b'>').map_or(0, |i| i + 1);
    let reactants = SmilesParser::new(&input[..reac_end])
        .with_explicit_h(explicit_h)
        .parse()?;
    let products = SmilesParser::new(&input[prod_start..])
        .with_explicit_h(explicit_h)
        .parse()
        .map_err(|err| SmilesError::new(err.index + prod_start, err.kind))?;
    trace!(
        reactant_atoms = reactants.node_count(),
        product_atoms = products.node_count(),
        "parsed reaction"
    );
    Ok((reactants, products))
}

/// Correspondence between reactant and product atoms, through their map numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomMapping {
    /// Reactant atom index to product atom index
    pub reac_to_prod: AHashMap<usize, usize>,
    /// Product atoms with no reactant counterpart, in product order
    pub only_prod: Vec<usize>,
    /// Reactant atoms with no product counterpart
    pub only_reac: AHashSet<usize>,
}
impl AtomMapping {
    /// Align two molecules by atom map number. Unmapped atoms (map number 0) are never
    /// aligned.
    pub fn new<R: MoleculeView, P: MoleculeView>(
        reactant: &R,
        product: &P,
    ) -> Result<Self, DataIntegrityError> {
        let mut reac_maps = AHashSet::new();
        for (_, atom) in atoms_of(reactant) {
            let map = atom.map_num();
            if map > 0 && !reac_maps.insert(map) {
                return Err(DataIntegrityError::DuplicateMapNumber(map));
            }
        }
        let mut prod_by_map = AHashMap::new();
        let mut only_prod = Vec::new();
        for (idx, atom) in atoms_of(product) {
            let map = atom.map_num();
            if map == 0 {
                only_prod.push(idx);
                continue;
            }
            if prod_by_map.insert(map, idx).is_some() {
                return Err(DataIntegrityError::DuplicateMapNumber(map));
            }
            if !reac_maps.contains(&map) {
                only_prod.push(idx);
            }
        }
        let mut reac_to_prod = AHashMap::new();
        let mut only_reac = AHashSet::new();
        for (idx, atom) in atoms_of(reactant) {
            match prod_by_map.get(&atom.map_num()) {
                Some(&prod) if atom.map_num() > 0 => {
                    reac_to_prod.insert(idx, prod);
                }
                _ => {
                    only_reac.insert(idx);
                }
            }
        }
        debug!(
            mapped = reac_to_prod.len(),
            only_reac = only_reac.len(),
            only_prod = only_prod.len(),
            "aligned reaction atoms"
        );
        Ok(Self {
            reac_to_prod,
            only_prod,
            only_reac,
        })
    }

    /// The product atom a reactant atom turns into, if any
    pub fn product_of(&self, reactant_atom: usize) -> Option<usize> {
        self.reac_to_prod.get(&reactant_atom).copied()
    }
}
