//! # Filter Module
//!
//! Source filtering: everything that is not one of the eight instruction
//! bytes is a comment and gets dropped before compilation. Relative order
//! of the surviving bytes is preserved.

/// The full instruction alphabet of the language.
pub const ALPHABET: &[u8; 8] = b"+-<>.,[]";

/// Returns `true` iff `byte` is one of the eight instruction bytes.
#[inline]
pub fn is_instruction(byte: u8) -> bool {
    matches!(
        byte,
        b'+' | b'-' | b'<' | b'>' | b'.' | b',' | b'[' | b']'
    )
}

/// Strips `source` down to the instruction alphabet. Empty input yields
/// empty output; there are no error conditions.
pub fn strip(source: &[u8]) -> Vec<u8> {
    source
        .iter()
        .copied()
        .filter(|&byte| is_instruction(byte))
        .collect()
}
