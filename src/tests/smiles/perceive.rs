use super::*;

#[test]
fn implicit_hydrogens() {
    assert_eq!(atom(&smiles!("C"), 0).total_hs(), 4);
    let ethanol = smiles!("CCO");
    assert_eq!(atom(&ethanol, 0).total_hs(), 3);
    assert_eq!(atom(&ethanol, 1).total_hs(), 2);
    assert_eq!(atom(&ethanol, 2).total_hs(), 1);
    let formaldehyde = smiles!("C=O");
    assert_eq!(atom(&formaldehyde, 0).total_hs(), 2);
    assert_eq!(atom(&formaldehyde, 1).total_hs(), 0);
    // bracket atoms only get what's written
    assert_eq!(atom(&smiles!("[CH2]"), 0).total_hs(), 2);
    assert_eq!(atom(&smiles!("[C]"), 0).total_hs(), 0);
    // higher valences kick in when the default one is used up
    assert_eq!(atom(&smiles!("CS(=O)(=O)C"), 1).total_hs(), 0);
    assert_eq!(atom(&smiles!("CP(C)(C)(C)C"), 1).total_hs(), 0);
}

#[test]
fn aromatic_hydrogens() {
    let benzene = smiles!("c1ccccc1");
    assert!(benzene.node_weights().all(|a| a.total_hs() == 1));
    let pyridine = smiles!("n1ccccc1");
    assert_eq!(atom(&pyridine, 0).total_hs(), 0);
    assert_eq!(atom(&pyridine, 1).total_hs(), 1);
    let thiophene = smiles!("s1cccc1");
    assert_eq!(atom(&thiophene, 0).total_hs(), 0);
    let naphthalene = smiles!("c1ccc2ccccc2c1");
    assert_eq!(atom(&naphthalene, 3).total_hs(), 0);
    assert_eq!(atom(&naphthalene, 0).total_hs(), 1);
}

#[test]
fn degrees() {
    let ethanol = smiles!("CCO");
    let degrees = ethanol
        .node_weights()
        .map(|a| a.total_degree)
        .collect::<Vec<_>>();
    assert_eq!(degrees, [4, 4, 2]);
    assert_eq!(atom(&smiles!("[Na+]"), 0).total_degree, 0);
}

#[test]
fn ring_membership() {
    let toluene_ish = smiles!("C1CCCCC1C");
    let in_ring = toluene_ish
        .edge_weights()
        .map(|b| b.in_ring)
        .collect::<Vec<_>>();
    assert_eq!(in_ring, [true, true, true, true, true, true, false]);
    assert!(smiles!("c1ccccc1").edge_weights().all(|b| b.in_ring));
    assert!(!smiles!("CCCC").edge_weights().any(|b| b.in_ring));
}

#[test]
fn conjugation() {
    let butadiene = smiles!("C=CC=C");
    assert!(butadiene.edge_weights().all(|b| b.conjugated));
    let propene = smiles!("C=CC");
    assert!(!propene.edge_weights().any(|b| b.conjugated));
    let acetamide = smiles!("CC(=O)N");
    let conj = acetamide
        .edge_weights()
        .map(|b| b.conjugated)
        .collect::<Vec<_>>();
    assert_eq!(conj, [false, true, true]);
    assert!(smiles!("c1ccccc1").edge_weights().all(|b| b.conjugated));
    assert!(!smiles!("CCO").edge_weights().any(|b| b.conjugated));
}

#[test]
fn hybridization() {
    use Hybridization::*;
    assert_eq!(atom(&smiles!("C"), 0).hybridization, Sp3);
    assert_eq!(atom(&smiles!("O"), 0).hybridization, Sp3);
    assert_eq!(atom(&smiles!("C=C"), 0).hybridization, Sp2);
    assert_eq!(atom(&smiles!("C#C"), 0).hybridization, Sp);
    assert_eq!(atom(&smiles!("c1ccccc1"), 0).hybridization, Sp2);
    let co2 = smiles!("O=C=O");
    assert_eq!(atom(&co2, 0).hybridization, Sp2);
    assert_eq!(atom(&co2, 1).hybridization, Sp);
    // amide nitrogen is planar
    assert_eq!(atom(&smiles!("CC(=O)N"), 3).hybridization, Sp2);
    assert_eq!(atom(&smiles!("CCN"), 2).hybridization, Sp3);
    assert_eq!(atom(&smiles!("[Na+]"), 0).hybridization, S);
    assert_eq!(atom(&smiles!("[H][H]"), 0).hybridization, S);
    assert_eq!(atom(&smiles!("*C"), 0).hybridization, Unspecified);
}
