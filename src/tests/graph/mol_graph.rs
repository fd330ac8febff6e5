use super::*;
use ndarray::prelude::*;

fn graph(smiles: &str) -> MolGraph {
    MolGraph::from_smiles(smiles, FeaturizerConfig::new()).unwrap()
}

#[test]
fn ethane() {
    trace_capture!();
    let g = graph("CC");
    assert_eq!(g.n_atoms(), 2);
    assert_eq!(g.n_bonds(), 2);
    assert_eq!(g.b2a(), [0, 1]);
    assert_eq!(g.b2revb(), [1, 0]);
    assert_eq!(g.a2b()[0].to_vec(), [1]);
    assert_eq!(g.a2b()[1].to_vec(), [0]);
    check_invariants(&g);
}

#[test]
fn edge_features() {
    let g = graph("CO");
    assert_eq!(g.f_atoms().len(), 2);
    assert!(g.f_atoms().iter().all(|row| row.len() == ATOM_FDIM));
    assert!(g
        .f_bonds()
        .iter()
        .all(|row| row.len() == g.bond_fdim()));
    // each edge starts with its origin atom
    assert_eq!(g.f_bonds()[0][..ATOM_FDIM], g.f_atoms()[0][..]);
    assert_eq!(g.f_bonds()[1][..ATOM_FDIM], g.f_atoms()[1][..]);
    // and both directions share the bond part
    assert_eq!(g.f_bonds()[0][ATOM_FDIM..], g.f_bonds()[1][ATOM_FDIM..]);
    let mol = smiles!("CO");
    assert_eq!(
        g.f_bonds()[0][ATOM_FDIM..],
        bond_features(mol.edge_weights().next())[..]
    );
}

#[test]
fn single_atom() {
    trace_capture!();
    let g = graph("C");
    assert_eq!(g.n_atoms(), 1);
    assert_eq!(g.n_bonds(), 0);
    assert_eq!(g.a2b().len(), 1);
    assert!(g.a2b()[0].is_empty());
    assert!(g.f_bonds().is_empty());
}

#[test]
fn empty_molecule() {
    let g = graph("");
    assert_eq!(g.n_atoms(), 0);
    assert_eq!(g.n_bonds(), 0);
}

#[test]
fn invariants() {
    for smiles in [
        "CC(=O)O",
        "c1ccccc1",
        "C1CC%10CC1%10",
        "[Na+].[Cl-]",
        "CC(C)(C)C",
        "OC(=O)C1=CC=CC=C1O",
    ] {
        let mol = SmilesParser::new(smiles).parse().unwrap();
        let g = graph(smiles);
        assert_eq!(g.n_atoms(), mol.node_count(), "{smiles}");
        assert_eq!(g.n_bonds(), 2 * mol.edge_count(), "{smiles}");
        check_invariants(&g);
    }
}

#[test]
fn incoming_order() {
    // the central carbon sees edges in the order its bonds were enumerated
    let g = graph("CC(C)C");
    assert_eq!(g.a2b()[1].to_vec(), [0, 3, 5]);
    assert_eq!(g.b2a()[0], 0);
    assert_eq!(g.b2a()[3], 2);
    assert_eq!(g.b2a()[5], 3);
}

#[test]
fn extra_atom_features() {
    let config = FeaturizerConfig::new().with_extra_atom_features(2, false);
    let extra = array![[1.0, 2.0], [3.0, 4.0]];
    assert!(ExtraFeatures::new().is_empty());
    assert!(!ExtraFeatures::new().with_atoms(extra.view()).is_empty());
    let g = MolGraph::from_smiles_with_extras(
        "CC",
        ExtraFeatures::new().with_atoms(extra.view()),
        config,
    )
    .unwrap();
    assert_eq!(g.f_atoms()[0].len(), ATOM_FDIM + 2);
    assert_eq!(g.f_atoms()[1][ATOM_FDIM..], [3.0, 4.0]);
    assert_eq!(g.f_bonds()[0].len(), config.bond_fdim(false));
    // edge rows pick up the extended atom rows
    assert_eq!(g.f_bonds()[0][ATOM_FDIM..ATOM_FDIM + 2], [1.0, 2.0]);

    let overwrite = FeaturizerConfig::new().with_extra_atom_features(2, true);
    let g = MolGraph::from_smiles_with_extras(
        "CC",
        ExtraFeatures::new().with_atoms(extra.view()),
        overwrite,
    )
    .unwrap();
    assert_eq!(g.f_atoms()[0], [1.0, 2.0]);
    assert_eq!(g.f_bonds()[0].len(), 2 + BOND_FDIM);
}

#[test]
fn extra_bond_features() {
    let config = FeaturizerConfig::new().with_extra_bond_features(3, false);
    let extra = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let g = MolGraph::from_smiles_with_extras(
        "CCO",
        ExtraFeatures::new().with_bonds(extra.view()),
        config,
    )
    .unwrap();
    let width = config.bond_fdim(false);
    assert_eq!(g.f_bonds()[0].len(), width);
    assert_eq!(g.f_bonds()[0][(width - 3)..], [1.0, 2.0, 3.0]);
    assert_eq!(g.f_bonds()[1][(width - 3)..], [1.0, 2.0, 3.0]);
    assert_eq!(g.f_bonds()[2][(width - 3)..], [4.0, 5.0, 6.0]);

    let overwrite = FeaturizerConfig::new().with_extra_bond_features(3, true);
    let g = MolGraph::from_smiles_with_extras(
        "CCO",
        ExtraFeatures::new().with_bonds(extra.view()),
        overwrite,
    )
    .unwrap();
    assert_eq!(g.f_bonds()[2].len(), ATOM_FDIM + 3);
    assert_eq!(g.f_bonds()[2][ATOM_FDIM..], [4.0, 5.0, 6.0]);
}

#[test]
fn extra_feature_errors() {
    let config = FeaturizerConfig::new().with_extra_atom_features(2, false);
    let too_many = Array2::<f32>::zeros((3, 2));
    let err = MolGraph::from_smiles_with_extras(
        "CC",
        ExtraFeatures::new().with_atoms(too_many.view()),
        config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::DataIntegrity(DataIntegrityError::AtomFeatureCount {
            expected: 2,
            found: 3
        })
    ));

    let too_wide = Array2::<f32>::zeros((2, 4));
    let err = MolGraph::from_smiles_with_extras(
        "CC",
        ExtraFeatures::new().with_atoms(too_wide.view()),
        config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::DataIntegrity(DataIntegrityError::AtomFeatureWidth {
            expected: 2,
            found: 4
        })
    ));

    let err = MolGraph::from_smiles("CC", config).unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::DataIntegrity(DataIntegrityError::MissingAtomFeatures { width: 2 })
    ));

    let bond_config = FeaturizerConfig::new().with_extra_bond_features(1, false);
    let wrong_bonds = Array2::<f32>::zeros((2, 1));
    let err = MolGraph::from_smiles_with_extras(
        "CC",
        ExtraFeatures::new().with_bonds(wrong_bonds.view()),
        bond_config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::DataIntegrity(DataIntegrityError::BondFeatureCount {
            expected: 1,
            found: 2
        })
    ));
}

#[test]
fn config_errors() {
    let bad = FeaturizerConfig::new().with_extra_atom_features(0, true);
    let err = MolGraph::from_smiles("CC", bad).unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::Config(ConfigError::OverwriteWithoutExtraAtom)
    ));
}

#[test]
fn smiles_errors() {
    let err = MolGraph::from_smiles("C1CC", FeaturizerConfig::new()).unwrap_err();
    assert!(matches!(err, FeaturizeError::Smiles(SmilesError { index: 4, .. })));
}

#[test]
fn explicit_hydrogens() {
    let config = FeaturizerConfig::new().with_explicit_h(true);
    let g = MolGraph::from_smiles("[H]C([H])([H])[H]", config).unwrap();
    assert_eq!(g.n_atoms(), 5);
    assert_eq!(g.n_bonds(), 8);
    check_invariants(&g);
    assert_eq!(graph("[H]C([H])([H])[H]").n_atoms(), 1);
}
