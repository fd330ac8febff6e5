use crate::atom_info::element_by_symbol;
use crate::chem::*;
use crate::parse::perceive;
use crate::utils::text::MaybeByte;
use atoi::{FromRadix10, FromRadix10Checked};
use bstr::BString;
use petgraph::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;
use tracing::*;
use SmilesErrorKind::*;

#[macro_export]
macro_rules! smiles {
    ($smiles:literal) => {
        $crate::parse::smiles::SmilesParser::new($smiles)
            .parse()
            .expect(concat!("Failed to parse SMILES ", $smiles))
    };
}

/// Inner enum for `SmilesError`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesErrorKind {
    #[error("{0:?} is not a recognized element")]
    UnknownElement(BString),
    #[error("a ring was opened without an atom")]
    RingWithoutAtom,
    #[error("ring {0} was not closed by the end of the input")]
    UnclosedRing(usize),
    #[error("expected a ring number")]
    ExpectedRingNumber,
    #[error("expected an atom map number")]
    ExpectedMapNumber,
    #[error("expected an atom, found {}", MaybeByte(*.0))]
    ExpectedAtom(Option<u8>),
    #[error("a bond has to follow an atom")]
    BondWithoutAtom,
    #[error("expected a closing bracket")]
    ExpectedClosingBracket,
    #[error("expected a closing parenthesis")]
    ExpectedClosingParen,
    #[error("closing parenthesis without a matching opening one")]
    UnmatchedParen,
    #[error("bonds in ring closure don't match: {0} vs {1}")]
    RingBondMismatch(BondType, BondType),
    #[error("duplicate bonds between atoms")]
    DuplicateBond,
    #[error("a ring closure can't bond an atom to itself")]
    SelfBond,
    #[error("number is too large")]
    NumberOutOfRange,
}

/// Something went wrong trying to parse a SMILES string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("an error occurred at byte {index} in the SMILES string: {kind}")]
pub struct SmilesError {
    pub index: usize,
    pub kind: SmilesErrorKind,
}
impl SmilesError {
    /// Convenience method
    pub const fn new(index: usize, kind: SmilesErrorKind) -> Self {
        Self { index, kind }
    }
}

/// A bond as it's written, before it's placed in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondSpec {
    Order(BondType),
    Up,
    Down,
    Dot,
}
impl BondSpec {
    fn bond_type(self) -> Option<BondType> {
        match self {
            Self::Order(kind) => Some(kind),
            Self::Up | Self::Down => Some(BondType::Single),
            Self::Dot => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Parser for a SMILES string
pub struct SmilesParser<'a> {
    // use byte slice because SMILES shouldn't have non-ASCII data
    pub input: &'a [u8],
    index: usize,
    rings: HashMap<usize, (NodeIndex, Option<BondSpec>)>,
    branches: SmallVec<NodeIndex, 8>,
    graph: MoleculeGraph,
    /// Keep hydrogen atoms as nodes instead of folding them into their neighbors
    pub explicit_h: bool,
}
impl<'a> SmilesParser<'a> {
    /// Create a new parser from an input string
    pub fn new<I: AsRef<[u8]> + ?Sized>(input: &'a I) -> Self {
        Self {
            input: input.as_ref(),
            index: 0,
            rings: Default::default(),
            branches: SmallVec::new(),
            graph: Default::default(),
            explicit_h: false,
        }
    }

    pub fn with_explicit_h(mut self, explicit_h: bool) -> Self {
        self.explicit_h = explicit_h;
        self
    }
    pub fn set_explicit_h(&mut self, explicit_h: bool) -> &mut Self {
        self.explicit_h = explicit_h;
        self
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.index).copied()
    }

    fn error(&self, kind: SmilesErrorKind) -> SmilesError {
        SmilesError::new(self.index, kind)
    }

    /// Walk the whole input, building up the graph. Branches are tracked on a stack, and a
    /// bond symbol is held until the atom after it shows up.
    #[instrument(level = "debug", skip_all, fields(input = %bstr::BStr::new(self.input)))]
    fn parse_chain(&mut self) -> Result<(), SmilesError> {
        let mut prev: Option<NodeIndex> = None;
        let mut pending: Option<(BondSpec, usize)> = None;
        while let Some(c) = self.peek() {
            match c {
                b'(' => {
                    let atom = prev.ok_or_else(|| self.error(ExpectedAtom(Some(c))))?;
                    if pending.is_some() {
                        return Err(self.error(ExpectedAtom(Some(c))));
                    }
                    self.branches.push(atom);
                    self.index += 1;
                }
                b')' => {
                    if pending.is_some() {
                        return Err(self.error(ExpectedAtom(Some(c))));
                    }
                    let atom = self
                        .branches
                        .pop()
                        .ok_or_else(|| self.error(UnmatchedParen))?;
                    prev = Some(atom);
                    self.index += 1;
                }
                b'0'..=b'9' | b'%' => {
                    let atom = prev.ok_or_else(|| self.error(RingWithoutAtom))?;
                    self.handle_ring(atom, pending.take())?;
                }
                _ => {
                    let start = self.index;
                    if let Some(bond) = self.get_bond() {
                        if pending.is_some() {
                            return Err(SmilesError::new(start, ExpectedAtom(Some(c))));
                        }
                        pending = Some((bond, start));
                        continue;
                    }
                    let atom = self.get_atom()?;
                    match (prev, pending.take()) {
                        (Some(last), bond) => self.connect(last, atom, bond.map(|b| b.0)),
                        (None, None | Some((BondSpec::Dot, _))) => {}
                        (None, Some((_, idx))) => {
                            return Err(SmilesError::new(idx, BondWithoutAtom));
                        }
                    }
                    prev = Some(atom);
                }
            }
        }
        if pending.is_some() {
            return Err(self.error(ExpectedAtom(None)));
        }
        if !self.branches.is_empty() {
            return Err(self.error(ExpectedClosingParen));
        }
        Ok(())
    }

    /// Add a bond between two atoms. Unmarked bonds between aromatic atoms are aromatic.
    fn connect(&mut self, a: NodeIndex, b: NodeIndex, spec: Option<BondSpec>) {
        let bond = match spec {
            Some(BondSpec::Dot) => return,
            Some(BondSpec::Order(kind)) => Bond::new(kind),
            Some(BondSpec::Up) => Bond::directed(BondDir::Up),
            Some(BondSpec::Down) => Bond::directed(BondDir::Down),
            None if self.graph[a].aromatic && self.graph[b].aromatic => {
                Bond::new(BondType::Aromatic)
            }
            None => Bond::new(BondType::Single),
        };
        trace!(a = a.index(), b = b.index(), kind = %bond.kind, "adding bond");
        self.graph.add_edge(a, b, bond);
    }

    /// Parse an atom, either from the organic subset or in brackets
    #[instrument(level = "trace", skip_all, fields(self.index))]
    fn get_atom(&mut self) -> Result<NodeIndex, SmilesError> {
        let next = self.input.get(self.index + 1).copied();
        let (atom, len) = match self.peek() {
            Some(b'[') => return self.get_bracket_atom(),
            Some(b'B') if next == Some(b'r') => (Atom::new(35), 2),
            Some(b'C') if next == Some(b'l') => (Atom::new(17), 2),
            Some(b'B') => (Atom::new(5), 1),
            Some(b'C') => (Atom::new(6), 1),
            Some(b'N') => (Atom::new(7), 1),
            Some(b'O') => (Atom::new(8), 1),
            Some(b'P') => (Atom::new(15), 1),
            Some(b'S') => (Atom::new(16), 1),
            Some(b'F') => (Atom::new(9), 1),
            Some(b'I') => (Atom::new(53), 1),
            Some(b'*') => (Atom::new(0), 1),
            Some(b'b') => (Atom::new_aromatic(5), 1),
            Some(b'c') => (Atom::new_aromatic(6), 1),
            Some(b'n') => (Atom::new_aromatic(7), 1),
            Some(b'o') => (Atom::new_aromatic(8), 1),
            Some(b'p') => (Atom::new_aromatic(15), 1),
            Some(b's') => (Atom::new_aromatic(16), 1),
            c => return Err(self.error(ExpectedAtom(c))),
        };
        self.index += len;
        Ok(self.graph.add_node(atom))
    }

    /// Parse a bracket atom: `[isotope? symbol chirality? hcount? charge? map?]`
    fn get_bracket_atom(&mut self) -> Result<NodeIndex, SmilesError> {
        let _span = trace_span!("parsing bracket atom", index = self.index).entered();
        self.index += 1;
        let isotope = self.get_number::<u16>()?.unwrap_or(0);
        let (protons, aromatic) = self.get_element()?;
        let mut atom = Atom {
            protons,
            isotope,
            aromatic,
            no_implicit: true,
            ..Default::default()
        };
        if self.peek() == Some(b'@') {
            self.index += 1;
            if self.peek() == Some(b'@') {
                self.index += 1;
                atom.chiral_tag = ChiralTag::Cw;
            } else {
                atom.chiral_tag = ChiralTag::Ccw;
            }
        }
        if self.peek() == Some(b'H') {
            self.index += 1;
            atom.explicit_hs = self.get_number::<u8>()?.unwrap_or(1);
            trace!(count = atom.explicit_hs, "adding explicit hydrogens");
        }
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.index += 1;
            let charge = match self.get_number::<i8>()? {
                Some(charge) => charge,
                None => {
                    // `++` and `--` are shorthand for 2 and -2
                    let count = self.input[self.index..]
                        .iter()
                        .take_while(|&&c| c == sign)
                        .count();
                    let charge =
                        i8::try_from(count + 1).map_err(|_| self.error(NumberOutOfRange))?;
                    self.index += count;
                    charge
                }
            };
            atom.charge = if sign == b'-' { -charge } else { charge };
            trace!(charge = atom.charge, "adding charge");
        }
        if self.peek() == Some(b':') {
            self.index += 1;
            let Some(map) = self.get_number::<u32>()? else {
                return Err(self.error(ExpectedMapNumber));
            };
            atom.map_num = map;
        }
        if self.peek() != Some(b']') {
            return Err(self.error(ExpectedClosingBracket));
        }
        self.index += 1;
        Ok(self.graph.add_node(atom))
    }

    /// Parse an unsigned number at the current position, if there is one.
    fn get_number<T: FromRadix10Checked>(&mut self) -> Result<Option<T>, SmilesError> {
        match T::from_radix_10_checked(&self.input[self.index..]) {
            (_, 0) => Ok(None),
            (Some(n), used) => {
                self.index += used;
                Ok(Some(n))
            }
            (None, _) => Err(self.error(NumberOutOfRange)),
        }
    }

    /// Parse an element symbol inside brackets, returning the atomic number and whether it
    /// was written as aromatic.
    fn get_element(&mut self) -> Result<(u8, bool), SmilesError> {
        let start = self.index;
        let rest = &self.input[start..];
        match rest.first().copied() {
            Some(b'*') => {
                self.index += 1;
                Ok((0, false))
            }
            Some(c) if c.is_ascii_lowercase() => {
                const TWO_LETTER: [&[u8]; 3] = [b"se", b"as", b"te"];
                let (sym, len): (&[u8], usize) =
                    match TWO_LETTER.into_iter().find(|s| rest.starts_with(s)) {
                        Some(two) => (two, 2),
                        None if b"bcnops".contains(&c) => (&rest[..1], 1),
                        None => return Err(self.unknown_element(start)),
                    };
                let mut upper = sym.to_vec();
                upper[0] = upper[0].to_ascii_uppercase();
                let protons =
                    element_by_symbol(&upper).ok_or_else(|| self.unknown_element(start))?;
                self.index += len;
                Ok((protons, true))
            }
            Some(c) if c.is_ascii_uppercase() => {
                if rest.get(1).is_some_and(u8::is_ascii_lowercase) {
                    if let Some(protons) = element_by_symbol(&rest[..2]) {
                        self.index += 2;
                        return Ok((protons, false));
                    }
                }
                let protons =
                    element_by_symbol(&rest[..1]).ok_or_else(|| self.unknown_element(start))?;
                self.index += 1;
                Ok((protons, false))
            }
            c => Err(self.error(ExpectedAtom(c))),
        }
    }

    fn unknown_element(&self, start: usize) -> SmilesError {
        let len = 1 + self.input[(start + 1)..]
            .iter()
            .take_while(|c| c.is_ascii_lowercase())
            .take(2)
            .count();
        SmilesError::new(start, UnknownElement(BString::from(&self.input[start..(start + len)])))
    }

    /// Parse a single bond symbol, if there is one
    fn get_bond(&mut self) -> Option<BondSpec> {
        let bond = match self.peek()? {
            b'.' => BondSpec::Dot,
            b'-' => BondSpec::Order(BondType::Single),
            b'=' => BondSpec::Order(BondType::Double),
            b'#' => BondSpec::Order(BondType::Triple),
            b'$' => BondSpec::Order(BondType::Quadruple),
            b':' => BondSpec::Order(BondType::Aromatic),
            b'/' => BondSpec::Up,
            b'\\' => BondSpec::Down,
            _ => return None,
        };
        self.index += 1;
        Some(bond)
    }

    /// Open or close a ring at `atom`.
    #[instrument(level = "trace", skip_all, fields(self.index))]
    fn handle_ring(
        &mut self,
        atom: NodeIndex,
        bond: Option<(BondSpec, usize)>,
    ) -> Result<(), SmilesError> {
        let num_idx = self.index;
        let num = if self.peek() == Some(b'%') {
            self.index += 1;
            // two digits at most, anything after that is another ring bond
            let end = (self.index + 2).min(self.input.len());
            let (num, used) = usize::from_radix_10(&self.input[self.index..end]);
            if used == 0 {
                return Err(self.error(ExpectedRingNumber));
            }
            self.index += used;
            num
        } else {
            let num = (self.input[self.index] - b'0') as usize;
            self.index += 1;
            num
        };
        match self.rings.remove(&num) {
            Some((other, open_bond)) => {
                if other == atom {
                    return Err(SmilesError::new(num_idx, SelfBond));
                }
                if self.graph.contains_edge(atom, other) {
                    return Err(SmilesError::new(num_idx, DuplicateBond));
                }
                let spec = match (open_bond, bond) {
                    (Some(open), Some((close, idx))) => {
                        match (open.bond_type(), close.bond_type()) {
                            (Some(a), Some(b)) if a != b => {
                                return Err(SmilesError::new(idx, RingBondMismatch(a, b)));
                            }
                            _ => Some(close),
                        }
                    }
                    (open, close) => open.or(close.map(|b| b.0)),
                };
                // direction markers on ring closures aren't tracked, keep the bond order only
                let spec = spec.map(|s| match s {
                    BondSpec::Up | BondSpec::Down => BondSpec::Order(BondType::Single),
                    s => s,
                });
                self.connect(atom, other, spec);
            }
            None => {
                self.rings.insert(num, (atom, bond.map(|b| b.0)));
            }
        }
        Ok(())
    }

    /// Parse the molecule, consuming self. This is taken by value to avoid cleanup.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> Result<MoleculeGraph, SmilesError> {
        self.parse_chain()?;
        if let Some(&num) = self.rings.keys().min() {
            return Err(SmilesError::new(self.index, UnclosedRing(num)));
        }
        perceive::perceive(&mut self.graph, self.explicit_h);
        debug!(
            atoms = self.graph.node_count(),
            bonds = self.graph.edge_count(),
            "parsed molecule"
        );
        Ok(self.graph)
    }
}
