//! Character classification and conversion.
//!
//! Implements the `<ctype.h>` predicates over input codes in
//! `{-1} ∪ [0, 255]`, always with "C" locale semantics. Codes 128..=255 and
//! [`EOF`] belong to no class.

mod class;
mod code;

pub use class::{CharClass, ClassSet, ClassSetIter, classify};
pub use code::InputCode;

/// End-of-input sentinel, as returned by `getc` and friends.
pub const EOF: i32 = -1;

/// Contract check shared by every predicate. Elided in release builds.
#[inline]
#[track_caller]
const fn check_domain(ch: i32) {
    debug_assert!(
        ch >= EOF && ch <= 255,
        "input code outside [-1, 255] passed to a ctype predicate"
    );
}

/// Returns `true` if `ch` is a 7-bit ASCII code (`[0, 127]`).
#[inline]
#[track_caller]
pub const fn is_ascii(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0..=0x7F)
}

/// Returns `true` if `ch` is a whitespace character.
///
/// Whitespace: tab, newline, vertical tab, form feed, carriage return, space.
#[inline]
#[track_caller]
pub const fn is_space(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x09..=0x0D | 0x20)
}

/// Returns `true` if `ch` is a control character (`[0, 31]` or DEL).
#[inline]
#[track_caller]
pub const fn is_cntrl(ch: i32) -> bool {
    check_domain(ch);
    (ch < 0x20 || ch == 0x7F) && is_ascii(ch)
}

/// Returns `true` if `ch` is a printable character (including space).
#[inline]
#[track_caller]
pub const fn is_print(ch: i32) -> bool {
    check_domain(ch);
    !is_cntrl(ch) && is_ascii(ch)
}

/// Returns `true` if `ch` is a space or a horizontal tab.
#[inline]
#[track_caller]
pub const fn is_blank(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x20 | 0x09)
}

/// Returns `true` if `ch` is printable and not a space.
#[inline]
#[track_caller]
pub const fn is_graph(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x21..=0x7E)
}

/// Returns `true` if `ch` is an uppercase letter (`[A-Z]`).
#[inline]
#[track_caller]
pub const fn is_upper(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x41..=0x5A)
}

/// Returns `true` if `ch` is a lowercase letter (`[a-z]`).
#[inline]
#[track_caller]
pub const fn is_lower(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x61..=0x7A)
}

/// Returns `true` if `ch` is an alphabetic character (`[A-Za-z]`).
#[inline]
#[track_caller]
pub const fn is_alpha(ch: i32) -> bool {
    check_domain(ch);
    is_lower(ch) || is_upper(ch)
}

/// Returns `true` if `ch` is a decimal digit (`[0-9]`).
#[inline]
#[track_caller]
pub const fn is_digit(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x30..=0x39)
}

/// Returns `true` if `ch` is an alphanumeric character (`[A-Za-z0-9]`).
#[inline]
#[track_caller]
pub const fn is_alnum(ch: i32) -> bool {
    check_domain(ch);
    is_alpha(ch) || is_digit(ch)
}

/// Returns `true` if `ch` is a punctuation character.
///
/// `!"#$%&'()*+,-./`, `:;<=>?@`, ``[\]^_` `` and `{|}~`.
#[inline]
#[track_caller]
pub const fn is_punct(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x21..=0x2F | 0x3A..=0x40 | 0x5B..=0x60 | 0x7B..=0x7E)
}

/// Returns `true` if `ch` is a hexadecimal digit (`[0-9A-Fa-f]`).
#[inline]
#[track_caller]
pub const fn is_xdigit(ch: i32) -> bool {
    check_domain(ch);
    matches!(ch, 0x41..=0x46 | 0x61..=0x66) || is_digit(ch)
}

/// Converts `ch` to uppercase if it is a lowercase letter.
///
/// Every other code, [`EOF`] included, is returned unchanged.
#[inline]
#[track_caller]
pub const fn to_upper(ch: i32) -> i32 {
    if is_lower(ch) { ch - 0x20 } else { ch }
}

/// Converts `ch` to lowercase if it is an uppercase letter.
#[inline]
#[track_caller]
pub const fn to_lower(ch: i32) -> i32 {
    if is_upper(ch) { ch + 0x20 } else { ch }
}
