//! Fixed-length numeric encodings of atoms and bonds.
//!
//! Atom feature layout, in order:
//!
//! | block | choices |
//! |---|---|
//! | atomic number - 1 | `0..100` |
//! | total degree | `0..=5` |
//! | formal charge | `-1, -2, 1, 2, 0` |
//! | chiral tag | `0..=3` |
//! | total hydrogens | `0..=4` |
//! | hybridization | SP, SP2, SP3, SP3D, SP3D2 |
//!
//! Each block is one-hot with an extra overflow slot, followed by an aromaticity flag and
//! the atomic mass scaled by 0.01.
//!
//! Bond feature layout: null flag, single, double, triple, aromatic, conjugated, in ring,
//! then a one-hot over the six stereo categories (plus overflow).
//!
//! Double bonds marked with `/` and `\` in SMILES are encoded as cis or trans (stereo codes
//! 4 and 5) relative to the marked neighbors. No CIP ranking is done, so the Z and E slots
//! (codes 2 and 3) are only set by other [`BondView`] implementations. Toolkits that
//! perceive E/Z from SMILES set a different bit for the same bond.

use crate::chem::{BondType, Hybridization};
use crate::molecule::{AtomView, BondView};

/// Size of the atomic number vocabulary
pub const MAX_ATOMIC_NUM: usize = 100;

const ATOMIC_NUM_CHOICES: [i32; MAX_ATOMIC_NUM] = index_choices::<MAX_ATOMIC_NUM>();
const DEGREE_CHOICES: [i32; 6] = [0, 1, 2, 3, 4, 5];
const FORMAL_CHARGE_CHOICES: [i32; 5] = [-1, -2, 1, 2, 0];
const CHIRAL_TAG_CHOICES: [i32; 4] = [0, 1, 2, 3];
const NUM_HS_CHOICES: [i32; 5] = [0, 1, 2, 3, 4];
const HYBRIDIZATION_CHOICES: [Hybridization; 5] = [
    Hybridization::Sp,
    Hybridization::Sp2,
    Hybridization::Sp3,
    Hybridization::Sp3d,
    Hybridization::Sp3d2,
];
const STEREO_CHOICES: [i32; 6] = [0, 1, 2, 3, 4, 5];

/// Length of an atom feature vector
pub const ATOM_FDIM: usize = (ATOMIC_NUM_CHOICES.len() + 1)
    + (DEGREE_CHOICES.len() + 1)
    + (FORMAL_CHARGE_CHOICES.len() + 1)
    + (CHIRAL_TAG_CHOICES.len() + 1)
    + (NUM_HS_CHOICES.len() + 1)
    + (HYBRIDIZATION_CHOICES.len() + 1)
    + 2;

/// Length of a bond feature vector
pub const BOND_FDIM: usize = 7 + STEREO_CHOICES.len() + 1;

/// Where the atomic number block ends in an atom feature vector
pub const ATOMIC_NUM_BLOCK: usize = MAX_ATOMIC_NUM + 1;

/// Width of the part of an atom feature vector after the atomic number block.
/// Reaction graphs append this much per atom for the second side.
pub const REACTION_ATOM_FDIM: usize = ATOM_FDIM - ATOMIC_NUM_BLOCK;

const fn index_choices<const N: usize>() -> [i32; N] {
    let mut out = [0; N];
    let mut i = 0;
    while i < N {
        out[i] = i as i32;
        i += 1;
    }
    out
}

/// One-hot encode `value` over `choices`, with a final slot for anything not in `choices`.
///
/// The output always has `choices.len() + 1` entries with exactly one set.
pub fn onek_encoding_unk<T: PartialEq>(value: T, choices: &[T]) -> Vec<f32> {
    let mut out = Vec::with_capacity(choices.len() + 1);
    push_onek(&mut out, value, choices);
    out
}

fn push_onek<T: PartialEq>(out: &mut Vec<f32>, value: T, choices: &[T]) {
    let start = out.len();
    out.resize(start + choices.len() + 1, 0.0);
    let idx = choices
        .iter()
        .position(|c| *c == value)
        .unwrap_or(choices.len());
    out[start + idx] = 1.0;
}

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// The feature vector of an atom that doesn't exist, all zeros
pub fn null_atom_features() -> Vec<f32> {
    vec![0.0; ATOM_FDIM]
}

/// The feature vector of a bond that doesn't exist, only the null flag is set
pub fn null_bond_features() -> Vec<f32> {
    let mut out = vec![0.0; BOND_FDIM];
    out[0] = 1.0;
    out
}

/// Build the feature vector for an atom, or the null vector for `None`.
pub fn atom_features<A: AtomView + ?Sized>(atom: Option<&A>) -> Vec<f32> {
    let Some(atom) = atom else {
        return null_atom_features();
    };
    let mut out = Vec::with_capacity(ATOM_FDIM);
    push_onek(
        &mut out,
        atom.atomic_num() as i32 - 1,
        &ATOMIC_NUM_CHOICES,
    );
    push_onek(&mut out, atom.total_degree() as i32, &DEGREE_CHOICES);
    push_onek(&mut out, atom.formal_charge(), &FORMAL_CHARGE_CHOICES);
    push_onek(&mut out, atom.chiral_tag().code(), &CHIRAL_TAG_CHOICES);
    push_onek(&mut out, atom.total_num_hs() as i32, &NUM_HS_CHOICES);
    push_onek(&mut out, atom.hybridization(), &HYBRIDIZATION_CHOICES);
    out.push(flag(atom.is_aromatic()));
    // scaled to about the same range as the other features
    out.push(atom.mass() * 0.01);
    debug_assert_eq!(out.len(), ATOM_FDIM);
    out
}

/// Build the feature vector for a bond, or the null vector for `None`.
pub fn bond_features<B: BondView + ?Sized>(bond: Option<&B>) -> Vec<f32> {
    let Some(bond) = bond else {
        return null_bond_features();
    };
    let bt = bond.bond_type();
    let mut out = Vec::with_capacity(BOND_FDIM);
    out.extend([
        0.0,
        flag(bt == BondType::Single),
        flag(bt == BondType::Double),
        flag(bt == BondType::Triple),
        flag(bt == BondType::Aromatic),
        flag(bond.is_conjugated()),
        flag(bond.is_in_ring()),
    ]);
    push_onek(&mut out, bond.stereo().code(), &STEREO_CHOICES);
    debug_assert_eq!(out.len(), BOND_FDIM);
    out
}
