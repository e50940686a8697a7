//! C ABI DLL for winctl -- loadable by ctypes, C#, or any FFI consumer.
//!
//! All exported functions follow the convention:
//! - Return `i32` status code: `WINCTL_OK=0`, `WINCTL_ERROR=-1`
//! - Booleans cross the boundary as `i32` (0 or 1)
//! - String outputs allocated by Rust, freed via `winctl_free_string()`
//! - Last error retrievable via `winctl_last_error()`

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

pub const WINCTL_OK: i32 = 0;
pub const WINCTL_ERROR: i32 = -1;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Retrieve the last error message (thread-local).
///
/// Returns a pointer valid until the next winctl_* call on this thread.
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn winctl_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string previously allocated by a winctl_* function.
///
/// # Safety
///
/// `ptr` must be a pointer returned by a winctl_* function or null.
#[no_mangle]
pub unsafe extern "C" fn winctl_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

/// Set the master volume scalar (0.0 to 1.0).
#[no_mangle]
pub extern "C" fn winctl_set_master_volume(level: f32) -> i32 {
    match winctl_core::audio::set_master_volume(level) {
        Ok(()) => WINCTL_OK,
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

/// Read the master volume scalar into `*out_level`.
///
/// # Safety
///
/// `out_level` must be a valid pointer to an `f32`.
#[no_mangle]
pub unsafe extern "C" fn winctl_get_master_volume(out_level: *mut f32) -> i32 {
    if out_level.is_null() {
        set_last_error("out_level is null");
        return WINCTL_ERROR;
    }

    match winctl_core::audio::get_master_volume() {
        Ok(level) => {
            unsafe { *out_level = level };
            WINCTL_OK
        }
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

/// Set the device mute flag (`muted` non-zero mutes).
#[no_mangle]
pub extern "C" fn winctl_set_mute(muted: i32) -> i32 {
    match winctl_core::audio::set_mute(muted != 0) {
        Ok(()) => WINCTL_OK,
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

/// Read the device mute flag into `*out_muted` (0 or 1).
///
/// # Safety
///
/// `out_muted` must be a valid pointer to an `i32`.
#[no_mangle]
pub unsafe extern "C" fn winctl_get_mute(out_muted: *mut i32) -> i32 {
    if out_muted.is_null() {
        set_last_error("out_muted is null");
        return WINCTL_ERROR;
    }

    match winctl_core::audio::get_mute() {
        Ok(muted) => {
            unsafe { *out_muted = i32::from(muted) };
            WINCTL_OK
        }
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

/// Release the process-wide audio endpoint.  Idempotent.
#[no_mangle]
pub extern "C" fn winctl_reset_audio() -> i32 {
    winctl_core::audio::reset_endpoint();
    WINCTL_OK
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// Focus the first window whose title contains `title`.
///
/// `*out_focused` receives 1 if a window was focused, 0 otherwise; the
/// return value only reports call validity.
///
/// # Safety
///
/// `title` must be a valid null-terminated UTF-8 C string.
/// `out_focused` may be null if the caller does not need the outcome.
#[no_mangle]
pub unsafe extern "C" fn winctl_focus_window(
    title: *const c_char,
    case_sensitive: i32,
    out_focused: *mut i32,
) -> i32 {
    if title.is_null() {
        set_last_error("title is null");
        return WINCTL_ERROR;
    }

    let title_str = match unsafe { CStr::from_ptr(title) }.to_str() {
        Ok(s) => s,
        Err(e) => {
            set_last_error(&format!("Invalid UTF-8: {e}"));
            return WINCTL_ERROR;
        }
    };

    match winctl_core::window::focus_window_by_title(title_str, case_sensitive != 0) {
        Ok(focused) => {
            if !out_focused.is_null() {
                unsafe { *out_focused = i32::from(focused) };
            }
            WINCTL_OK
        }
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

/// List visible windows as a JSON array of
/// `{"title", "class_name", "is_visible"}` objects.
///
/// # Safety
///
/// `out_json` must be a valid pointer to a `*mut c_char`.
/// On success, `*out_json` is set to a heap-allocated JSON C string.
/// Caller must free with `winctl_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn winctl_enumerate_windows(out_json: *mut *mut c_char) -> i32 {
    if out_json.is_null() {
        set_last_error("out_json is null");
        return WINCTL_ERROR;
    }

    match winctl_core::window::enumerate_windows() {
        Ok(windows) => match serde_json::to_string(&windows) {
            Ok(json) => match CString::new(json) {
                Ok(cstr) => {
                    unsafe { *out_json = cstr.into_raw() };
                    WINCTL_OK
                }
                Err(e) => {
                    set_last_error(&format!("CString conversion failed: {e}"));
                    WINCTL_ERROR
                }
            },
            Err(e) => {
                set_last_error(&format!("JSON serialization failed: {e}"));
                WINCTL_ERROR
            }
        },
        Err(e) => {
            set_last_error(&e.to_string());
            WINCTL_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn last_error_string() -> String {
        LAST_ERROR.with(|e| {
            e.borrow()
                .as_ref()
                .map(|s| s.to_str().unwrap_or_default().to_owned())
                .unwrap_or_default()
        })
    }

    #[test]
    fn out_of_range_volume_sets_last_error() {
        assert_eq!(winctl_set_master_volume(1.5), WINCTL_ERROR);
        assert!(last_error_string().contains("InvalidArgument"));
    }

    #[test]
    fn null_out_pointers_are_rejected() {
        assert_eq!(
            unsafe { winctl_get_master_volume(ptr::null_mut()) },
            WINCTL_ERROR
        );
        assert_eq!(unsafe { winctl_get_mute(ptr::null_mut()) }, WINCTL_ERROR);
        assert_eq!(
            unsafe { winctl_enumerate_windows(ptr::null_mut()) },
            WINCTL_ERROR
        );
    }

    #[test]
    fn null_title_is_rejected() {
        let mut focused = 0;
        assert_eq!(
            unsafe { winctl_focus_window(ptr::null(), 0, &mut focused) },
            WINCTL_ERROR
        );
        assert!(last_error_string().contains("title is null"));
    }

    #[test]
    fn free_null_is_a_no_op() {
        unsafe { winctl_free_string(ptr::null_mut()) };
    }

    #[test]
    fn reset_audio_is_idempotent() {
        assert_eq!(winctl_reset_audio(), WINCTL_OK);
        assert_eq!(winctl_reset_audio(), WINCTL_OK);
    }
}
