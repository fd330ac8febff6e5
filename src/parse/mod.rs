pub mod perceive;
pub mod reaction;
pub mod smiles;

pub use reaction::{parse_reaction, AtomMapping};
pub use smiles::{SmilesError, SmilesErrorKind, SmilesParser};
