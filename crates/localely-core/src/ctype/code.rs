//! Validated input codes.

use std::fmt;

use super::{ClassSet, EOF, classify};
use crate::error::DomainError;

/// An input code known to lie in `{-1} ∪ [0, 255]`.
///
/// The bare `i32` predicates only check their domain in debug builds;
/// converting through `InputCode` checks it always and reports a
/// [`DomainError`] instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputCode(i32);

impl InputCode {
    pub const EOF: InputCode = InputCode(EOF);

    pub const fn new(code: i32) -> Result<Self, DomainError> {
        if code >= EOF && code <= 255 {
            Ok(Self(code))
        } else {
            Err(DomainError { code })
        }
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_eof(self) -> bool {
        self.0 == EOF
    }

    /// The byte value, or `None` for [`InputCode::EOF`].
    #[must_use]
    pub const fn as_byte(self) -> Option<u8> {
        if self.is_eof() { None } else { Some(self.0 as u8) }
    }

    #[must_use]
    pub fn classes(self) -> ClassSet {
        classify(self.0)
    }

    /// Every legal input code, starting at [`InputCode::EOF`].
    pub fn all() -> impl Iterator<Item = InputCode> {
        (EOF..=255).map(InputCode)
    }
}

impl From<u8> for InputCode {
    fn from(byte: u8) -> Self {
        Self(i32::from(byte))
    }
}

impl TryFrom<i32> for InputCode {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<InputCode> for i32 {
    fn from(code: InputCode) -> Self {
        code.0
    }
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_byte() {
            None => f.write_str("EOF"),
            Some(b) if b.is_ascii_graphic() => write!(f, "{} ('{}')", b, b as char),
            Some(b) => write!(f, "{b} (0x{b:02X})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharClass;

    #[test]
    fn new_accepts_legal_domain() {
        assert_eq!(InputCode::new(-1), Ok(InputCode::EOF));
        assert_eq!(InputCode::new(0).map(InputCode::get), Ok(0));
        assert_eq!(InputCode::new(255).map(InputCode::get), Ok(255));
    }

    #[test]
    fn new_rejects_out_of_domain() {
        assert_eq!(InputCode::new(256), Err(DomainError { code: 256 }));
        assert_eq!(InputCode::new(-2), Err(DomainError { code: -2 }));
        assert_eq!(
            InputCode::try_from(i32::MIN),
            Err(DomainError { code: i32::MIN })
        );
    }

    #[test]
    fn byte_conversion() {
        assert_eq!(InputCode::EOF.as_byte(), None);
        assert_eq!(InputCode::from(0xFFu8).as_byte(), Some(0xFF));
        assert_eq!(i32::from(InputCode::from(b'A')), 65);
    }

    #[test]
    fn all_covers_257_codes() {
        let codes: Vec<_> = InputCode::all().collect();
        assert_eq!(codes.len(), 257);
        assert!(codes[0].is_eof());
        assert_eq!(codes[256].get(), 255);
    }

    #[test]
    fn classes_delegate_to_classify() {
        assert!(InputCode::from(b'F').classes().contains(CharClass::Xdigit));
        assert!(InputCode::EOF.classes().is_empty());
    }

    #[test]
    fn display_forms() {
        assert_eq!(InputCode::EOF.to_string(), "EOF");
        assert_eq!(InputCode::from(b'A').to_string(), "65 ('A')");
        assert_eq!(InputCode::from(b'\n').to_string(), "10 (0x0A)");
    }
}
