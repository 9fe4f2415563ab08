//! Optional self-test export.
//!
//! `localely_unit_tests` switches `LC_ALL` to "C" for the duration of the run
//! (restoring the previous locale afterwards). It is a development aid.

use std::ffi::c_int;

/// Returns 0 when every predicate matches the host "C" locale for every input
/// in `[-1, 255]`, `-1` when the "C" locale cannot be selected, and
/// `-2..=-14` naming the first class that diverged.
#[unsafe(no_mangle)]
pub extern "C" fn localely_unit_tests() -> c_int {
    localely_harness::verify::run_self_test()
}
