//! Four-character codes.
//!
//! The audio frameworks love FourCCs: many status, type and property codes
//! are four ASCII characters packed big-endian into 32 bits, written `'abcd'`
//! in C. A status that decodes this way is far easier to recognise than the
//! raw integer.

use std::fmt;

use serde::{Serialize, Serializer};

use super::OSStatus;

/// Get the 32-bit integer corresponding to a FourCC. Where you'd write
/// `'e.g.'` in C, write `fourcc(b"e.g.")` in Rust.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// Same as [fourcc], typed as a status code.
pub const fn fourcc_status(code: &[u8; 4]) -> OSStatus {
    i32::from_be_bytes(*code)
}

/// C-locale `isprint()`: space through tilde.
pub const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7e)
}

/// A status whose four big-endian bytes are all printable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC([u8; 4]);

impl FourCC {
    /// Returns `None` if any byte is not printable.
    pub fn new(bytes: [u8; 4]) -> Option<Self> {
        bytes.iter().all(|&b| is_printable(b)).then_some(Self(bytes))
    }

    pub fn from_status(status: OSStatus) -> Option<Self> {
        Self::new(status.to_be_bytes())
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    pub fn to_status(self) -> OSStatus {
        i32::from_be_bytes(self.0)
    }

    pub fn as_str(&self) -> &str {
        // Printable bytes are always ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_matches_c_literal() {
        assert_eq!(fourcc(b"noEr"), 0x6E6F_4572);
        assert_eq!(fourcc_status(b"!siz"), 0x2173_697A);
    }

    #[test]
    fn test_decodes_printable_status() {
        let code = FourCC::from_status(fourcc_status(b"noEr")).expect("printable");
        assert_eq!(code.as_str(), "noEr");
        assert_eq!(code.to_string(), "'noEr'");
        assert_eq!(code.to_status(), fourcc_status(b"noEr"));
    }

    #[test]
    fn test_space_is_printable() {
        let code = FourCC::from_status(fourcc_status(b"ab c")).expect("space is printable");
        assert_eq!(code.to_string(), "'ab c'");
    }

    #[test]
    fn test_rejects_control_and_high_bytes() {
        assert!(FourCC::new([b'a', b'b', b'c', 0x7f]).is_none());
        assert!(FourCC::new([b'a', 0x09, b'c', b'd']).is_none());
        assert!(FourCC::from_status(-10830).is_none());
        assert!(FourCC::from_status(0).is_none());
        assert!(FourCC::from_status(123_456_789).is_none());
    }

    #[test]
    fn test_serializes_as_quoted_string() {
        let code = FourCC::new(*b"wht?").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"'wht?'\"");
    }
}
