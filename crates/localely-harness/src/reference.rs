//! Host `<ctype.h>` reference under the "C" locale.
//!
//! This is the only place in the workspace that calls `setlocale`. A
//! [`CLocaleGuard`] serializes access to the process locale, switches
//! `LC_ALL` to "C", and restores the previous locale when dropped. Host
//! predicates can only be reached through a live guard.

use std::ffi::{CStr, CString, c_int};
use std::ptr;

use localely_core::{CharClass, InputCode};
use parking_lot::{Mutex, MutexGuard, const_mutex};
use thiserror::Error;

unsafe extern "C" {
    fn isascii(c: c_int) -> c_int;
    fn isspace(c: c_int) -> c_int;
    fn iscntrl(c: c_int) -> c_int;
    fn isprint(c: c_int) -> c_int;
    fn isblank(c: c_int) -> c_int;
    fn isgraph(c: c_int) -> c_int;
    fn isupper(c: c_int) -> c_int;
    fn islower(c: c_int) -> c_int;
    fn isalpha(c: c_int) -> c_int;
    fn isdigit(c: c_int) -> c_int;
    fn isalnum(c: c_int) -> c_int;
    fn ispunct(c: c_int) -> c_int;
    fn isxdigit(c: c_int) -> c_int;
}

static LOCALE_LOCK: Mutex<()> = const_mutex(());

/// The host refused to select the "C" locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("setlocale(LC_ALL, \"C\") failed")]
pub struct LocaleUnavailable;

/// Holds the process locale at "C" for as long as it lives.
pub struct CLocaleGuard {
    previous: Option<CString>,
    _lock: MutexGuard<'static, ()>,
}

impl CLocaleGuard {
    /// Block until no other guard is live, then select the "C" locale.
    pub fn enter() -> Result<Self, LocaleUnavailable> {
        let lock = LOCALE_LOCK.lock();
        // SAFETY: a null locale argument only queries; the returned string is
        // copied before any further setlocale call can invalidate it.
        let previous = unsafe {
            let current = libc::setlocale(libc::LC_ALL, ptr::null());
            (!current.is_null()).then(|| CStr::from_ptr(current).to_owned())
        };
        // SAFETY: the argument is a valid NUL-terminated string.
        let selected = unsafe { libc::setlocale(libc::LC_ALL, c"C".as_ptr()) };
        if selected.is_null() {
            return Err(LocaleUnavailable);
        }
        Ok(Self {
            previous,
            _lock: lock,
        })
    }

    /// Host classification of `ch` for `class`, normalized to `bool`.
    #[must_use]
    pub fn classify(&self, class: CharClass, ch: InputCode) -> bool {
        let host = host_predicate(class);
        // SAFETY: `ch` is EOF or representable as unsigned char, which is the
        // whole domain the C standard defines for these functions.
        unsafe { host(ch.get()) != 0 }
    }
}

impl Drop for CLocaleGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // SAFETY: `previous` is a valid NUL-terminated locale name that
            // setlocale itself returned.
            unsafe {
                libc::setlocale(libc::LC_ALL, previous.as_ptr());
            }
        }
    }
}

fn host_predicate(class: CharClass) -> unsafe extern "C" fn(c_int) -> c_int {
    match class {
        CharClass::Ascii => isascii,
        CharClass::Space => isspace,
        CharClass::Cntrl => iscntrl,
        CharClass::Print => isprint,
        CharClass::Blank => isblank,
        CharClass::Graph => isgraph,
        CharClass::Upper => isupper,
        CharClass::Lower => islower,
        CharClass::Alpha => isalpha,
        CharClass::Digit => isdigit,
        CharClass::Alnum => isalnum,
        CharClass::Punct => ispunct,
        CharClass::Xdigit => isxdigit,
    }
}

/// Name of the current `LC_ALL` locale, if the host reports one.
#[must_use]
pub fn current_locale() -> Option<String> {
    let _lock = LOCALE_LOCK.lock();
    // SAFETY: query-only call; the result is copied immediately.
    unsafe {
        let current = libc::setlocale(libc::LC_ALL, ptr::null());
        (!current.is_null()).then(|| CStr::from_ptr(current).to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_selects_c_locale() {
        let guard = CLocaleGuard::enter().expect("C locale is always available");
        assert!(guard.classify(CharClass::Digit, InputCode::from(b'5')));
        assert!(!guard.classify(CharClass::Digit, InputCode::EOF));
        assert!(!guard.classify(CharClass::Alpha, InputCode::from(0xE9u8)));
    }

    fn select_locale(name: &CStr) -> Option<String> {
        let _lock = LOCALE_LOCK.lock();
        // SAFETY: `name` is NUL-terminated; the result is copied before the
        // lock is released.
        unsafe {
            let selected = libc::setlocale(libc::LC_ALL, name.as_ptr());
            (!selected.is_null()).then(|| CStr::from_ptr(selected).to_string_lossy().into_owned())
        }
    }

    fn select_non_c_locale() -> Option<String> {
        [c"C.UTF-8", c"C.utf8", c"en_US.UTF-8"]
            .into_iter()
            .filter_map(select_locale)
            .find(|name| name != "C" && name != "POSIX")
    }

    #[test]
    fn guard_restores_previous_locale() {
        let Some(selected) = select_non_c_locale() else {
            eprintln!("no non-C locale installed; skipping restore check");
            return;
        };
        assert_eq!(current_locale().as_deref(), Some(selected.as_str()));

        crate::verify::verify_against_host().expect("classifier must match host C locale");
        assert_eq!(current_locale().as_deref(), Some(selected.as_str()));

        assert_eq!(crate::verify::run_self_test(), 0);
        assert_eq!(current_locale().as_deref(), Some(selected.as_str()));

        {
            let guard = CLocaleGuard::enter().expect("C locale is always available");
            assert_eq!(current_locale_unlocked().as_deref(), Some("C"));
            let err = crate::verify::verify_with(|class, ch| {
                guard.classify(class, ch) ^ (class == CharClass::Digit && ch.get() == 0x37)
            })
            .expect_err("reference diverges at '7'");
            assert_eq!(err.status_code(), -10);
        }
        assert_eq!(current_locale().as_deref(), Some(selected.as_str()));

        assert_eq!(select_locale(c"C").as_deref(), Some("C"));
    }

    // Reads LC_ALL without taking the lock, for use while a guard is live.
    fn current_locale_unlocked() -> Option<String> {
        // SAFETY: query-only call; the result is copied immediately.
        unsafe {
            let current = libc::setlocale(libc::LC_ALL, ptr::null());
            (!current.is_null()).then(|| CStr::from_ptr(current).to_string_lossy().into_owned())
        }
    }
}
