//! Differential verification of the classifier against a reference.
//!
//! The reference is normally the host `<ctype.h>` under `LC_ALL=C`
//! ([`verify_against_host`]), but every entry point has a `*_with` form that
//! takes the reference as a closure so divergence handling can be exercised
//! without touching the process locale.

use localely_core::{CharClass, InputCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::{CLocaleGuard, LocaleUnavailable};

/// Status code for a clean run.
pub const STATUS_PASS: i32 = 0;
/// Status code when the "C" locale could not be selected.
pub const STATUS_LOCALE_UNAVAILABLE: i32 = -1;

/// Classes in the order they are checked for each input code.
pub const CHECK_ORDER: [CharClass; 13] = [
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
    CharClass::Ascii,
];

/// Distinct negative status code identifying a diverging class.
#[must_use]
pub const fn status_code(class: CharClass) -> i32 {
    match class {
        CharClass::Space => -2,
        CharClass::Cntrl => -3,
        CharClass::Print => -4,
        CharClass::Blank => -5,
        CharClass::Graph => -6,
        CharClass::Upper => -7,
        CharClass::Lower => -8,
        CharClass::Alpha => -9,
        CharClass::Digit => -10,
        CharClass::Alnum => -11,
        CharClass::Punct => -12,
        CharClass::Xdigit => -13,
        CharClass::Ascii => -14,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("reference unavailable: {0}")]
    LocaleUnavailable(#[from] LocaleUnavailable),
    #[error("{class} diverged from the reference at {input}: expected {expected}, got {actual}")]
    Divergence {
        class: CharClass,
        input: InputCode,
        expected: bool,
        actual: bool,
    },
}

impl VerifyError {
    /// Negative status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> i32 {
        match self {
            VerifyError::LocaleUnavailable(_) => STATUS_LOCALE_UNAVAILABLE,
            VerifyError::Divergence { class, .. } => status_code(*class),
        }
    }
}

/// Counts from a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySummary {
    pub inputs: usize,
    pub checks: usize,
}

/// Compare every class for every input in `[-1, 255]` against the host
/// "C" locale. Stops at the first divergence.
pub fn verify_against_host() -> Result<VerifySummary, VerifyError> {
    let guard = CLocaleGuard::enter()?;
    verify_with(|class, ch| guard.classify(class, ch))
}

/// As [`verify_against_host`], with a caller-supplied reference.
pub fn verify_with<F>(reference: F) -> Result<VerifySummary, VerifyError>
where
    F: Fn(CharClass, InputCode) -> bool,
{
    let mut summary = VerifySummary {
        inputs: 0,
        checks: 0,
    };
    for input in InputCode::all() {
        summary.inputs += 1;
        for class in CHECK_ORDER {
            let expected = reference(class, input);
            let actual = class.matches(input.get());
            if expected != actual {
                return Err(VerifyError::Divergence {
                    class,
                    input,
                    expected,
                    actual,
                });
            }
            summary.checks += 1;
        }
    }
    Ok(summary)
}

/// Self-test status code: 0 on success, `-1` if the "C" locale is
/// unavailable, otherwise the code of the first diverging class.
#[must_use]
pub fn run_self_test() -> i32 {
    match verify_against_host() {
        Ok(_) => STATUS_PASS,
        Err(err) => err.status_code(),
    }
}

/// One input where classifier and reference disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub input: i32,
    pub expected: bool,
    pub actual: bool,
}

/// Full comparison result for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRow {
    /// C name, e.g. `isdigit`.
    pub class: String,
    /// Exported symbol, e.g. `C_isdigit`.
    pub symbol: String,
    /// Status code reported if this class diverges.
    pub status_code: i32,
    /// Number of inputs the classifier places in this class.
    pub members: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ClassRow {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Non-short-circuiting comparison of every class against the host "C"
/// locale, one row per class in [`CHECK_ORDER`].
pub fn differential_table() -> Result<Vec<ClassRow>, VerifyError> {
    let guard = CLocaleGuard::enter()?;
    Ok(differential_with(|class, ch| guard.classify(class, ch)))
}

/// As [`differential_table`], with a caller-supplied reference.
pub fn differential_with<F>(reference: F) -> Vec<ClassRow>
where
    F: Fn(CharClass, InputCode) -> bool,
{
    CHECK_ORDER
        .into_iter()
        .map(|class| {
            let mut members = 0;
            let mut mismatches = Vec::new();
            for input in InputCode::all() {
                let actual = class.matches(input.get());
                let expected = reference(class, input);
                members += usize::from(actual);
                if expected != actual {
                    mismatches.push(Mismatch {
                        input: input.get(),
                        expected,
                        actual,
                    });
                }
            }
            ClassRow {
                class: class.name().to_string(),
                symbol: class.symbol().to_string(),
                status_code: status_code(class),
                members,
                mismatches,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier_reference(class: CharClass, ch: InputCode) -> bool {
        class.matches(ch.get())
    }

    #[test]
    fn classifier_matches_host_c_locale() {
        let summary = verify_against_host().expect("classifier must match host C locale");
        assert_eq!(summary.inputs, 257);
        assert_eq!(summary.checks, 257 * 13);
        assert_eq!(run_self_test(), STATUS_PASS);
    }

    #[test]
    fn differential_table_is_clean_on_host() {
        let rows = differential_table().expect("C locale is always available");
        assert_eq!(rows.len(), 13);
        for row in &rows {
            assert!(row.passed(), "{} diverged: {:?}", row.class, row.mismatches);
        }
        let digit = rows.iter().find(|r| r.class == "isdigit").expect("digit row");
        assert_eq!(digit.members, 10);
    }

    #[test]
    fn status_codes_are_distinct_and_negative() {
        let mut codes: Vec<i32> = CHECK_ORDER.iter().map(|c| status_code(*c)).collect();
        assert!(codes.iter().all(|&c| c < STATUS_LOCALE_UNAVAILABLE));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 13);
    }

    #[test]
    fn check_order_covers_every_class() {
        for class in CharClass::ALL {
            assert!(CHECK_ORDER.contains(&class), "{class} missing from check order");
        }
    }

    #[test]
    fn divergence_reports_first_class_and_input() {
        // A reference that disagrees on isupper for 'Q' and on isdigit for '0'.
        let reference = |class: CharClass, ch: InputCode| {
            let base = classifier_reference(class, ch);
            match (class, ch.get()) {
                (CharClass::Digit, 0x30) | (CharClass::Upper, 0x51) => !base,
                _ => base,
            }
        };
        let err = verify_with(reference).expect_err("reference diverges");
        assert_eq!(
            err,
            VerifyError::Divergence {
                class: CharClass::Digit,
                input: InputCode::from(b'0'),
                expected: false,
                actual: true,
            }
        );
        assert_eq!(err.status_code(), -10);
    }

    #[test]
    fn divergence_order_within_one_input() {
        // Both print and xdigit disagree at 'a'; print is checked first.
        let reference = |class: CharClass, ch: InputCode| {
            let base = classifier_reference(class, ch);
            if ch.get() == 0x61 && matches!(class, CharClass::Print | CharClass::Xdigit) {
                !base
            } else {
                base
            }
        };
        assert_eq!(verify_with(reference).map_err(|e| e.status_code()), Err(-4));
    }

    #[test]
    fn ascii_divergence_has_its_own_code() {
        let reference = |class: CharClass, ch: InputCode| {
            classifier_reference(class, ch) ^ (class == CharClass::Ascii && ch.is_eof())
        };
        assert_eq!(verify_with(reference).map_err(|e| e.status_code()), Err(-14));
    }

    #[test]
    fn differential_collects_every_mismatch() {
        let reference = |class: CharClass, ch: InputCode| {
            classifier_reference(class, ch)
                || (class == CharClass::Space && matches!(ch.get(), 0x85 | 0xA0))
        };
        let rows = differential_with(reference);
        let space = rows.iter().find(|r| r.class == "isspace").expect("space row");
        assert_eq!(space.status_code, -2);
        assert_eq!(
            space.mismatches,
            vec![
                Mismatch { input: 0x85, expected: true, actual: false },
                Mismatch { input: 0xA0, expected: true, actual: false },
            ]
        );
        assert!(rows.iter().filter(|r| r.class != "isspace").all(ClassRow::passed));
    }

    #[test]
    fn locale_error_maps_to_minus_one() {
        let err = VerifyError::from(LocaleUnavailable);
        assert_eq!(err.status_code(), STATUS_LOCALE_UNAVAILABLE);
    }
}
