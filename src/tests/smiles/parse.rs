use super::*;
use crate::parse::smiles::SmilesErrorKind::*;

fn parse_err(input: &str) -> SmilesError {
    SmilesParser::new(input)
        .parse()
        .expect_err("SMILES should have failed to parse")
}

#[test]
fn simple() {
    // methane
    smiles!("C");
    // methylene
    smiles!("[CH2]");
    // acetylene
    smiles!("C#C");
    // benzene
    smiles!("c1ccccc1");
    // carbon monoxide
    smiles!("[C-]#[O+]");
    // acetic acid
    let acetic = smiles!("CC(=O)O");
    assert_eq!(acetic.node_count(), 4);
    assert_eq!(acetic.edge_count(), 3);
    assert_eq!(bond(&acetic, 1).kind, BondType::Double);
}

#[test]
fn elements() {
    let mol = smiles!("ClCBr");
    let protons = mol.node_weights().map(|a| a.protons).collect::<Vec<_>>();
    assert_eq!(protons, [17, 6, 35]);
    let selenophene = smiles!("[se]1cccc1");
    assert_eq!(atom(&selenophene, 0).protons, 34);
    assert!(atom(&selenophene, 0).aromatic);
    assert_eq!(atom(&smiles!("[Se]"), 0).protons, 34);
    assert_eq!(atom(&smiles!("*C"), 0).protons, 0);
}

#[test]
fn bracket_atoms() {
    let ammonium = smiles!("[NH4+]");
    assert_eq!(atom(&ammonium, 0).charge, 1);
    assert_eq!(atom(&ammonium, 0).explicit_hs, 4);
    assert_eq!(atom(&smiles!("[Fe+++]"), 0).charge, 3);
    assert_eq!(atom(&smiles!("[O--]"), 0).charge, -2);
    assert_eq!(atom(&smiles!("[Cu+2]"), 0).charge, 2);
    let c13 = smiles!("[13CH4]");
    assert_eq!(atom(&c13, 0).isotope, 13);
    assert!((13.0..13.2).contains(&atom(&c13, 0).mass()));
    let mapped = smiles!("[CH3:1][OH:12]");
    assert_eq!(atom(&mapped, 0).map_num, 1);
    assert_eq!(atom(&mapped, 1).map_num, 12);
}

#[test]
fn chirality() {
    assert_eq!(
        atom(&smiles!("FC(Cl)(Br)I"), 1).chiral_tag,
        ChiralTag::Unspecified
    );
    assert_eq!(atom(&smiles!("F[C@](Cl)(Br)I"), 1).chiral_tag, ChiralTag::Ccw);
    assert_eq!(atom(&smiles!("F[C@@](Cl)(Br)I"), 1).chiral_tag, ChiralTag::Cw);
}

#[test]
fn rings() {
    let pyrrole = smiles!("[nH]1cccc1");
    assert_eq!(pyrrole.edge_count(), 5);
    assert!(pyrrole.edge_weights().all(|b| b.kind == BondType::Aromatic));
    let ring = smiles!("C=1CCCC1");
    assert_eq!(bond(&ring, 4).kind, BondType::Double);
    let bicycle = smiles!("C1CC%10CC1%10");
    assert_eq!(bicycle.node_count(), 5);
    assert_eq!(bicycle.edge_count(), 6);
}

#[test]
fn disconnected() {
    let salt = smiles!("[Na+].[Cl-]");
    assert_eq!(salt.node_count(), 2);
    assert_eq!(salt.edge_count(), 0);
}

#[test]
fn hydrogen_folding() {
    let methane = smiles!("[H]C([H])([H])[H]");
    assert_eq!(methane.node_count(), 1);
    assert_eq!(atom(&methane, 0).total_hs(), 4);

    let explicit = SmilesParser::new("[H]C([H])([H])[H]")
        .with_explicit_h(true)
        .parse()
        .unwrap();
    assert_eq!(explicit.node_count(), 5);
    assert_eq!(atom(&explicit, 1).total_hs(), 0);
    assert_eq!(atom(&explicit, 1).total_degree, 4);

    // isotopes and hydrogen molecules stay as atoms
    assert_eq!(smiles!("[2H]C").node_count(), 2);
    assert_eq!(smiles!("[H][H]").node_count(), 2);
}

#[test]
fn errors() {
    assert_eq!(parse_err("C1CC"), SmilesError::new(4, UnclosedRing(1)));
    assert_eq!(parse_err("C(C"), SmilesError::new(3, ExpectedClosingParen));
    assert_eq!(parse_err("CC)"), SmilesError::new(2, UnmatchedParen));
    assert_eq!(
        parse_err("[Xx]"),
        SmilesError::new(1, UnknownElement("Xx".into()))
    );
    assert_eq!(parse_err("[C"), SmilesError::new(2, ExpectedClosingBracket));
    assert_eq!(
        parse_err("C=1CCCC#1"),
        SmilesError::new(7, RingBondMismatch(BondType::Double, BondType::Triple))
    );
    assert_eq!(parse_err("C11"), SmilesError::new(2, SelfBond));
    assert_eq!(parse_err("C1C1"), SmilesError::new(3, DuplicateBond));
    assert_eq!(parse_err("=C"), SmilesError::new(0, BondWithoutAtom));
    assert_eq!(parse_err("C="), SmilesError::new(2, ExpectedAtom(None)));
    assert_eq!(parse_err("1C"), SmilesError::new(0, RingWithoutAtom));
    assert_eq!(parse_err("[CH3:]"), SmilesError::new(5, ExpectedMapNumber));
    assert_eq!(parse_err("C%"), SmilesError::new(2, ExpectedRingNumber));
    assert_eq!(parse_err("Q"), SmilesError::new(0, ExpectedAtom(Some(b'Q'))));
}

#[test]
fn oversized_numbers() {
    assert_eq!(parse_err("[70000C]"), SmilesError::new(1, NumberOutOfRange));
    assert_eq!(parse_err("[CH300]"), SmilesError::new(3, NumberOutOfRange));
    assert_eq!(parse_err("[C+200]"), SmilesError::new(3, NumberOutOfRange));
    assert_eq!(parse_err("[C-128]"), SmilesError::new(3, NumberOutOfRange));
    assert_eq!(
        parse_err("[C:4294967296]"),
        SmilesError::new(3, NumberOutOfRange)
    );
    assert_eq!(atom(&smiles!("[C-127]"), 0).charge, -127);

    // the counts fit, the degree saturates
    let crowded = smiles!("[CH255]C");
    assert_eq!(atom(&crowded, 0).total_degree, u8::MAX);
    let graph = MolGraph::from_smiles("[CH255]C", FeaturizerConfig::new()).unwrap();
    assert_eq!(graph.n_atoms(), 2);
    let err = mol2graph(["C", "[CH300]"], FeaturizerConfig::new()).unwrap_err();
    assert!(matches!(
        err,
        FeaturizeError::Smiles(SmilesError {
            index: 3,
            kind: NumberOutOfRange
        })
    ));
}

#[test]
fn reuse_settings() {
    let mut parser = SmilesParser::new("[H]O[H]");
    parser.set_explicit_h(true);
    assert_eq!(parser.parse().unwrap().node_count(), 3);
    let mut parser = SmilesParser::new("[H]O[H]").with_explicit_h(true);
    parser.set_explicit_h(false);
    assert_eq!(parser.parse().unwrap().node_count(), 1);
}

#[test]
fn display_atoms() {
    let mol = smiles!("[13CH3:1][O-].[NH4+].[Fe+3]");
    let shown = mol.node_weights().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(shown, ["13C:1", "O-", "N+", "Fe+3"]);
}
