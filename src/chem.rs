//! Concrete molecule model produced by the SMILES parser.
//!
//! The category enums use the same integer codes RDKit uses, since those codes are what
//! the feature encoders one-hot over.

use crate::atom_info::ELEMENTS;
use petgraph::prelude::*;
use std::fmt::{self, Display, Formatter};

const PROTON_MASS: f32 = 1.00727647;
const NEUTRON_MASS: f32 = 1.008665;

/// Tetrahedral chirality tag
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChiralTag {
    #[default]
    Unspecified = 0,
    /// `@@`
    Cw = 1,
    /// `@`
    Ccw = 2,
    Other = 3,
}
impl ChiralTag {
    pub fn is_chiral(self) -> bool {
        self != Self::Unspecified
    }
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Hybridization {
    #[default]
    Unspecified = 0,
    S = 1,
    Sp = 2,
    Sp2 = 3,
    Sp3 = 4,
    Sp3d = 5,
    Sp3d2 = 6,
    Other = 7,
}
impl Hybridization {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Bond order of a bond in the molecule graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BondType {
    Single = 1,
    Double = 2,
    Triple = 3,
    Quadruple = 4,
    Aromatic = 12,
}
impl BondType {
    /// Contribution to an atom's valence. Aromatic bonds count as single here, the extra
    /// electron is accounted for per atom.
    pub fn valence(self) -> u8 {
        match self {
            Self::Single | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }
    /// Anything that makes its atoms unsaturated
    pub fn is_multiple(self) -> bool {
        self != Self::Single
    }
    pub fn as_static_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Quadruple => "quadruple",
            Self::Aromatic => "aromatic",
        }
    }
}
impl Display for BondType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_static_str())
    }
}

/// Double bond stereo category
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BondStereo {
    #[default]
    None = 0,
    Any = 1,
    Z = 2,
    E = 3,
    Cis = 4,
    Trans = 5,
}
impl BondStereo {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Direction of a `/` or `\` bond, relative to the source of the edge it's stored on.
///
/// `Up` means the target is above the source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondDir {
    #[default]
    None,
    Up,
    Down,
}
impl BondDir {
    pub fn flipped(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// An atom in the molecule graph
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    pub protons: u8,
    pub charge: i8,
    pub isotope: u16,
    pub aromatic: bool,
    pub chiral_tag: ChiralTag,
    /// Hydrogens written in a bracket atom, plus any folded in from hydrogen atoms
    pub explicit_hs: u8,
    /// Bracket atoms never get implicit hydrogens
    pub no_implicit: bool,
    /// Atom map number, 0 if unmapped
    pub map_num: u32,
    // everything below is filled in by perception
    pub implicit_hs: u8,
    /// Neighbors in the graph plus attached hydrogens
    pub total_degree: u8,
    pub hybridization: Hybridization,
}
impl Atom {
    pub fn new(protons: u8) -> Self {
        Self {
            protons,
            ..Default::default()
        }
    }
    pub fn new_aromatic(protons: u8) -> Self {
        Self {
            protons,
            aromatic: true,
            ..Default::default()
        }
    }

    pub fn total_hs(&self) -> u8 {
        self.explicit_hs.saturating_add(self.implicit_hs)
    }

    /// Average mass, or an approximate isotopic mass if an isotope was given
    pub fn mass(&self) -> f32 {
        if self.isotope == 0 {
            ELEMENTS
                .get(self.protons as usize)
                .map_or(0.0, |elem| elem.mass)
        } else {
            PROTON_MASS * self.protons as f32
                + NEUTRON_MASS * (self.isotope as f32 - self.protons as f32)
        }
    }

    pub fn symbol(&self) -> &'static str {
        ELEMENTS
            .get(self.protons as usize)
            .map_or("?", |elem| elem.sym)
    }
}
impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.isotope != 0 {
            write!(f, "{}", self.isotope)?;
        }
        if self.aromatic {
            f.write_str(&self.symbol().to_ascii_lowercase())?;
        } else {
            f.write_str(self.symbol())?;
        }
        match self.charge {
            0 => {}
            1 => f.write_str("+")?,
            -1 => f.write_str("-")?,
            c => write!(f, "{c:+}")?,
        }
        if self.map_num != 0 {
            write!(f, ":{}", self.map_num)?;
        }
        Ok(())
    }
}

/// A bond between atoms in the molecule graph
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub kind: BondType,
    /// Only set while parsing, it's resolved into `stereo` by perception
    pub dir: BondDir,
    pub conjugated: bool,
    pub in_ring: bool,
    pub stereo: BondStereo,
}
impl Bond {
    pub fn new(kind: BondType) -> Self {
        Self {
            kind,
            dir: BondDir::None,
            conjugated: false,
            in_ring: false,
            stereo: BondStereo::None,
        }
    }
    /// A single bond with a cis/trans direction marker
    pub fn directed(dir: BondDir) -> Self {
        Self {
            dir,
            ..Self::new(BondType::Single)
        }
    }
}

/// A molecule graph is an undirected graph between atoms, connected with bonds
pub type MoleculeGraph = UnGraph<Atom, Bond>;
