//! # localely-abi
//!
//! `extern "C"` boundary for the localely classifier.
//!
//! This crate produces `liblocalely.so` / `liblocalely.a` exporting the
//! `C_is*` predicates declared in `include/localely.h`. C callers include the
//! header (declarations only) and link the library (implementation); Rust
//! callers should depend on `localely-core` directly and get the inlined
//! predicates instead.
//!
//! ```text
//! C caller -> C_isalpha (this crate) -> localely_core::ctype::is_alpha -> 0/1
//! ```
//!
//! With the `self-test` feature the library also exports
//! `localely_unit_tests`, which compares every predicate against the host
//! `<ctype.h>` in the "C" locale. That routine calls `setlocale`; production
//! code should never call it.

#![allow(non_snake_case)]

pub mod ctype_abi;
#[cfg(feature = "self-test")]
pub mod selftest_abi;
