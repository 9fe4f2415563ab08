//! Named character classes and class sets.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownClass;

/// One of the thirteen `<ctype.h>` classification classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CharClass {
    Ascii,
    Space,
    Cntrl,
    Print,
    Blank,
    Graph,
    Upper,
    Lower,
    Alpha,
    Digit,
    Alnum,
    Punct,
    Xdigit,
}

impl CharClass {
    /// Every class, in declaration order.
    pub const ALL: [CharClass; 13] = [
        CharClass::Ascii,
        CharClass::Space,
        CharClass::Cntrl,
        CharClass::Print,
        CharClass::Blank,
        CharClass::Graph,
        CharClass::Upper,
        CharClass::Lower,
        CharClass::Alpha,
        CharClass::Digit,
        CharClass::Alnum,
        CharClass::Punct,
        CharClass::Xdigit,
    ];

    /// The predicate implementing this class.
    #[must_use]
    pub fn predicate(self) -> fn(i32) -> bool {
        match self {
            CharClass::Ascii => super::is_ascii,
            CharClass::Space => super::is_space,
            CharClass::Cntrl => super::is_cntrl,
            CharClass::Print => super::is_print,
            CharClass::Blank => super::is_blank,
            CharClass::Graph => super::is_graph,
            CharClass::Upper => super::is_upper,
            CharClass::Lower => super::is_lower,
            CharClass::Alpha => super::is_alpha,
            CharClass::Digit => super::is_digit,
            CharClass::Alnum => super::is_alnum,
            CharClass::Punct => super::is_punct,
            CharClass::Xdigit => super::is_xdigit,
        }
    }

    /// Returns `true` if `ch` belongs to this class.
    #[inline]
    #[must_use]
    pub fn matches(self, ch: i32) -> bool {
        (self.predicate())(ch)
    }

    /// Classical C function name, e.g. `isspace`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CharClass::Ascii => "isascii",
            CharClass::Space => "isspace",
            CharClass::Cntrl => "iscntrl",
            CharClass::Print => "isprint",
            CharClass::Blank => "isblank",
            CharClass::Graph => "isgraph",
            CharClass::Upper => "isupper",
            CharClass::Lower => "islower",
            CharClass::Alpha => "isalpha",
            CharClass::Digit => "isdigit",
            CharClass::Alnum => "isalnum",
            CharClass::Punct => "ispunct",
            CharClass::Xdigit => "isxdigit",
        }
    }

    /// Exported ABI symbol, e.g. `C_isspace`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CharClass::Ascii => "C_isascii",
            CharClass::Space => "C_isspace",
            CharClass::Cntrl => "C_iscntrl",
            CharClass::Print => "C_isprint",
            CharClass::Blank => "C_isblank",
            CharClass::Graph => "C_isgraph",
            CharClass::Upper => "C_isupper",
            CharClass::Lower => "C_islower",
            CharClass::Alpha => "C_isalpha",
            CharClass::Digit => "C_isdigit",
            CharClass::Alnum => "C_isalnum",
            CharClass::Punct => "C_ispunct",
            CharClass::Xdigit => "C_isxdigit",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharClass::ALL
            .into_iter()
            .find(|class| class.name() == s || class.symbol() == s)
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}

/// A set of [`CharClass`] values, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassSet(u16);

impl ClassSet {
    /// The empty set.
    pub const EMPTY: ClassSet = ClassSet(0);

    #[must_use]
    pub const fn contains(self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn insert(&mut self, class: CharClass) {
        self.0 |= class.bit();
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask; bit `n` is set for the class with discriminant `n`.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Iterate members in declaration order.
    #[must_use]
    pub fn iter(self) -> ClassSetIter {
        ClassSetIter { set: self, next: 0 }
    }
}

impl FromIterator<CharClass> for ClassSet {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        let mut set = ClassSet::EMPTY;
        for class in iter {
            set.insert(class);
        }
        set
    }
}

impl IntoIterator for ClassSet {
    type Item = CharClass;
    type IntoIter = ClassSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`ClassSet`].
#[derive(Debug, Clone)]
pub struct ClassSetIter {
    set: ClassSet,
    next: usize,
}

impl Iterator for ClassSetIter {
    type Item = CharClass;

    fn next(&mut self) -> Option<CharClass> {
        while let Some(&class) = CharClass::ALL.get(self.next) {
            self.next += 1;
            if self.set.contains(class) {
                return Some(class);
            }
        }
        None
    }
}

/// Every class `ch` belongs to.
#[must_use]
pub fn classify(ch: i32) -> ClassSet {
    CharClass::ALL
        .into_iter()
        .filter(|class| class.matches(ch))
        .collect()
}
