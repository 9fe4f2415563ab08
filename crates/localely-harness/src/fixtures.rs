//! Captured classification tables.
//!
//! A fixture records, for every class, the input codes the host reference
//! placed in it. Checking a fixture later needs no locale access, so captured
//! tables from several hosts can be compared against the classifier anywhere.

use std::path::Path;

use localely_core::{CharClass, InputCode, UnknownClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::CLocaleGuard;
use crate::verify::VerifyError;

/// Current fixture schema version.
pub const FIXTURE_VERSION: &str = "v1";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported fixture version '{0}'")]
    Version(String),
    #[error(transparent)]
    UnknownClass(#[from] UnknownClass),
    #[error("fixture has no table for {0}")]
    MissingClass(CharClass),
    #[error("fixture member {input} of {class} is outside [-1, 255]")]
    OutOfDomain { class: CharClass, input: i32 },
    #[error("{class} disagrees with fixture at {input}: fixture {expected}, classifier {actual}")]
    Mismatch {
        class: CharClass,
        input: InputCode,
        expected: bool,
        actual: bool,
    },
}

/// Members of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTable {
    /// C name, e.g. `ispunct`.
    pub class: String,
    /// Input codes in the class, ascending.
    pub members: Vec<i32>,
}

/// A full reference classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTableFixture {
    /// Schema version.
    pub version: String,
    /// Where the table came from (e.g. `host libc, LC_ALL=C`).
    pub reference: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub tables: Vec<ClassTable>,
}

impl ClassTableFixture {
    /// Build a fixture from any reference.
    pub fn from_reference<F>(reference: &str, captured_at: &str, f: F) -> Self
    where
        F: Fn(CharClass, InputCode) -> bool,
    {
        let tables = CharClass::ALL
            .into_iter()
            .map(|class| ClassTable {
                class: class.name().to_string(),
                members: InputCode::all()
                    .filter(|&ch| f(class, ch))
                    .map(InputCode::get)
                    .collect(),
            })
            .collect();
        Self {
            version: FIXTURE_VERSION.to_string(),
            reference: reference.to_string(),
            captured_at: captured_at.to_string(),
            tables,
        }
    }

    /// Record the host `<ctype.h>` table under `LC_ALL=C`.
    pub fn capture_host(captured_at: &str) -> Result<Self, VerifyError> {
        let guard = CLocaleGuard::enter()?;
        Ok(Self::from_reference(
            "host libc, LC_ALL=C",
            captured_at,
            |class, ch| guard.classify(class, ch),
        ))
    }

    /// Load fixture from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture from a file path.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Compare the classifier against this table.
    ///
    /// Returns the number of (class, input) pairs checked.
    pub fn check(&self) -> Result<usize, FixtureError> {
        if self.version != FIXTURE_VERSION {
            return Err(FixtureError::Version(self.version.clone()));
        }
        let mut checked = 0;
        for class in CharClass::ALL {
            let table = self
                .tables
                .iter()
                .find(|t| t.class.parse::<CharClass>().is_ok_and(|c| c == class))
                .ok_or(FixtureError::MissingClass(class))?;
            if let Some(&input) = table.members.iter().find(|&&m| InputCode::new(m).is_err()) {
                return Err(FixtureError::OutOfDomain { class, input });
            }
            for input in InputCode::all() {
                let expected = table.members.contains(&input.get());
                let actual = class.matches(input.get());
                if expected != actual {
                    return Err(FixtureError::Mismatch {
                        class,
                        input,
                        expected,
                        actual,
                    });
                }
                checked += 1;
            }
        }
        for table in &self.tables {
            table.class.parse::<CharClass>()?;
        }
        Ok(checked)
    }
}
