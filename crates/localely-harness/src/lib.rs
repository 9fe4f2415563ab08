//! Verification harness for localely.
//!
//! This crate provides:
//! - Host reference: the platform `<ctype.h>` evaluated under `LC_ALL=C`
//! - Verifier: compare every classifier predicate against the reference
//! - Fixtures: capture the reference table as JSON and check against it later
//! - Report generation: markdown + JSON conformance reports
//! - Structured JSONL logs with a SHA-256 artifact index
//!
//! Everything here that touches the process locale is meant for tests and
//! development tooling. The classifier itself never reaches this crate.

#![deny(unsafe_code)]

pub mod fixtures;
#[allow(unsafe_code)]
pub mod reference;
pub mod report;
pub mod structured_log;
pub mod verify;

pub use fixtures::{ClassTableFixture, FixtureError};
pub use report::ConformanceReport;
pub use verify::{ClassRow, VerifyError, VerifySummary};
