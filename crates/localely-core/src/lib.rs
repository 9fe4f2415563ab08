//! # localely-core
//!
//! Locale-independent ASCII character classification.
//!
//! The `<ctype.h>` predicates consult the process-wide locale, so a single
//! `setlocale` call anywhere in a program (or in one of its dependencies) can
//! change what `isalpha` or `isspace` report. This crate provides the same
//! predicates with the fixed "C"/ASCII meaning. Nothing here reads global
//! state; every function is a pure comparison over the input code.
//!
//! Input codes follow the C convention: a byte value in `[0, 255]` or
//! [`EOF`](ctype::EOF) (`-1`). Passing anything else is a contract violation
//! that is caught by `debug_assert!` in debug builds.

#![deny(unsafe_code)]

pub mod ctype;
pub mod error;

pub use ctype::{CharClass, ClassSet, EOF, InputCode};
pub use error::{DomainError, UnknownClass};
