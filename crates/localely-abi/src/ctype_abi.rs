//! ABI layer for the `C_is*` classification and `C_to*` conversion exports.
//!
//! Pure compute: no pointers, no global state. Each export delegates to
//! `localely_core::ctype` and converts the result to a C truth value.

use std::ffi::c_int;

use localely_core::ctype;

#[inline]
#[track_caller]
fn classify(ch: c_int, f: fn(i32) -> bool) -> c_int {
    let r = c_int::from(f(ch));
    debug_assert!(r == 0 || r == 1, "classification produced {r}");
    r
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isascii(ch: c_int) -> c_int {
    classify(ch, ctype::is_ascii)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isspace(ch: c_int) -> c_int {
    classify(ch, ctype::is_space)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_iscntrl(ch: c_int) -> c_int {
    classify(ch, ctype::is_cntrl)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isprint(ch: c_int) -> c_int {
    classify(ch, ctype::is_print)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isblank(ch: c_int) -> c_int {
    classify(ch, ctype::is_blank)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isgraph(ch: c_int) -> c_int {
    classify(ch, ctype::is_graph)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isupper(ch: c_int) -> c_int {
    classify(ch, ctype::is_upper)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_islower(ch: c_int) -> c_int {
    classify(ch, ctype::is_lower)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isalpha(ch: c_int) -> c_int {
    classify(ch, ctype::is_alpha)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isdigit(ch: c_int) -> c_int {
    classify(ch, ctype::is_digit)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isalnum(ch: c_int) -> c_int {
    classify(ch, ctype::is_alnum)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_ispunct(ch: c_int) -> c_int {
    classify(ch, ctype::is_punct)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_isxdigit(ch: c_int) -> c_int {
    classify(ch, ctype::is_xdigit)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_toupper(ch: c_int) -> c_int {
    ctype::to_upper(ch)
}

#[unsafe(no_mangle)]
pub extern "C" fn C_tolower(ch: c_int) -> c_int {
    ctype::to_lower(ch)
}
