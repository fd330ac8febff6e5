use std::fmt::{self, Display, Formatter};

/// A wrapper around an input byte for error messages.
///
/// Printable ASCII is shown quoted, everything else as a hex escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextByte(pub u8);
impl Display for TextByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            c @ 32..=126 => write!(f, "'{}'", c as char),
            b'\n' => f.write_str("'\\n'"),
            b'\t' => f.write_str("'\\t'"),
            c => write!(f, "'\\x{c:0>2x}'"),
        }
    }
}

/// Prints an optional byte, or "end of input"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaybeByte(pub Option<u8>);
impl Display for MaybeByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(b) => Display::fmt(&TextByte(b), f),
            None => f.write_str("end of input"),
        }
    }
}
