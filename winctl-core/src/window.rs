//! Window enumeration and foreground control via the Win32 API.
//!
//! Callers receive owned [`WindowSnapshot`] values, never raw handles;
//! the handle field stays inside this crate and is excluded from
//! serialization.

use serde::Serialize;

use crate::errors::WinctlError;

/// Owned description of one top-level window at enumeration time.
///
/// A snapshot is a weak reference plus cached metadata: the underlying
/// window may change or disappear immediately after the query.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSnapshot {
    /// Raw `HWND`, kept process-local.
    #[serde(skip_serializing)]
    pub hwnd: isize,
    pub title: String,
    pub class_name: String,
    pub is_visible: bool,
}

/// Substring containment, optionally case-normalized.
///
/// Case-insensitive mode lowercases both sides before the containment
/// check.
pub fn title_matches(title: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        title.contains(needle)
    } else {
        title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Every visible, titled top-level window, in OS enumeration order.
///
/// Windows that are invisible or have an empty title are filtered out;
/// the rest are returned unsorted (z/creation order as the OS reports
/// them).
pub fn enumerate_windows() -> Result<Vec<WindowSnapshot>, WinctlError> {
    imp::enumerate_windows()
}

/// Snapshot of the window currently holding input focus.
///
/// Unlike enumeration, no visibility or title filter is applied.
pub fn foreground_window() -> Result<WindowSnapshot, WinctlError> {
    imp::foreground_window()
}

/// Bring a window to the foreground, restoring it first if minimized.
///
/// `Ok(false)` when the handle no longer refers to a live window or the
/// OS refuses the request; never an error on a supported platform.
pub fn set_foreground(handle: isize) -> Result<bool, WinctlError> {
    imp::set_foreground(handle)
}

/// Focus the first window (enumeration order) whose title contains
/// `needle`.
///
/// `Ok(false)` when nothing matches or the matching window's foreground
/// request fails.  No ranking among multiple candidates.
pub fn focus_window_by_title(needle: &str, case_sensitive: bool) -> Result<bool, WinctlError> {
    imp::focus_window_by_title(needle, case_sensitive)
}

// ---------------------------------------------------------------------------
// Windows implementation
// ---------------------------------------------------------------------------

#[cfg(windows)]
mod imp {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;

    use windows::Win32::Foundation::{BOOL, FALSE, HWND, LPARAM, TRUE};
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::Input::KeyboardAndMouse::AttachThreadInput;
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetClassNameW, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
        GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, SetForegroundWindow,
        ShowWindow, SW_RESTORE,
    };

    use super::{title_matches, WindowSnapshot};
    use crate::errors::WinctlError;

    /// Read the window title (UTF-16, converted lossily to UTF-8).
    fn read_title(hwnd: HWND) -> String {
        let len = unsafe { GetWindowTextLengthW(hwnd) };
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; (len + 1) as usize];
        let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
        if copied <= 0 {
            return String::new();
        }
        OsString::from_wide(&buf[..copied as usize])
            .to_string_lossy()
            .into_owned()
    }

    /// Read the window class name (up to 256 chars).
    fn read_class_name(hwnd: HWND) -> String {
        let mut buf = [0u16; 256];
        let len = unsafe { GetClassNameW(hwnd, &mut buf) };
        if len <= 0 {
            return String::new();
        }
        OsString::from_wide(&buf[..len as usize])
            .to_string_lossy()
            .into_owned()
    }

    fn snapshot(hwnd: HWND) -> WindowSnapshot {
        WindowSnapshot {
            hwnd: hwnd.0 as isize,
            title: read_title(hwnd),
            class_name: read_class_name(hwnd),
            is_visible: unsafe { IsWindowVisible(hwnd) }.as_bool(),
        }
    }

    /// Callback for `EnumWindows` collecting visible, titled windows.
    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let out = unsafe { &mut *(lparam.0 as *mut Vec<WindowSnapshot>) };

        if unsafe { IsWindowVisible(hwnd) }.as_bool()
            && unsafe { GetWindowTextLengthW(hwnd) } > 0
        {
            let snap = snapshot(hwnd);
            // The title can still come back empty if the window died
            // between the length query and the text read.
            if !snap.title.is_empty() {
                out.push(snap);
            }
        }

        TRUE // continue enumeration
    }

    pub fn enumerate_windows() -> Result<Vec<WindowSnapshot>, WinctlError> {
        let mut found: Vec<WindowSnapshot> = Vec::with_capacity(64);
        unsafe {
            EnumWindows(
                Some(enum_callback),
                LPARAM(&mut found as *mut Vec<WindowSnapshot> as isize),
            )
        }
        .map_err(|e| WinctlError::Operation(format!("EnumWindows failed: {e}")))?;
        Ok(found)
    }

    pub fn foreground_window() -> Result<WindowSnapshot, WinctlError> {
        let hwnd = unsafe { GetForegroundWindow() };
        Ok(snapshot(hwnd))
    }

    pub fn set_foreground(handle: isize) -> Result<bool, WinctlError> {
        let hwnd = HWND(handle as *mut core::ffi::c_void);

        if !unsafe { IsWindow(hwnd) }.as_bool() {
            return Ok(false);
        }

        if unsafe { IsIconic(hwnd) }.as_bool() {
            let _ = unsafe { ShowWindow(hwnd, SW_RESTORE) };
        }

        if !unsafe { SetForegroundWindow(hwnd) }.as_bool() {
            // The OS denies the request when another process owns the
            // foreground.  Attaching our input queue to the target's
            // thread lifts the restriction; the attachment is undone on
            // every path, whether or not the retry succeeds.
            let current = unsafe { GetCurrentThreadId() };
            let target = unsafe { GetWindowThreadProcessId(hwnd, None) };
            if target != 0 && target != current {
                let attached = unsafe { AttachThreadInput(current, target, TRUE) }.as_bool();
                if !unsafe { SetForegroundWindow(hwnd) }.as_bool() {
                    log::debug!("SetForegroundWindow still denied after thread-input attach");
                }
                if attached {
                    let _ = unsafe { AttachThreadInput(current, target, FALSE) };
                }
            }
        }

        Ok(unsafe { GetForegroundWindow() } == hwnd)
    }

    pub fn focus_window_by_title(needle: &str, case_sensitive: bool) -> Result<bool, WinctlError> {
        let windows = match enumerate_windows() {
            Ok(ws) => ws,
            Err(e) => {
                log::warn!("window enumeration failed during focus: {e}");
                return Ok(false);
            }
        };

        // Linear scan; the first match in enumeration order wins.
        for window in &windows {
            if title_matches(&window.title, needle, case_sensitive) {
                return set_foreground(window.hwnd);
            }
        }
        Ok(false)
    }
}

// ---------------------------------------------------------------------------
// Stubs for platforms without a native backend
// ---------------------------------------------------------------------------

#[cfg(not(windows))]
mod imp {
    use super::WindowSnapshot;
    use crate::errors::WinctlError;

    pub fn enumerate_windows() -> Result<Vec<WindowSnapshot>, WinctlError> {
        Err(WinctlError::Unsupported("enumerate_windows"))
    }

    pub fn foreground_window() -> Result<WindowSnapshot, WinctlError> {
        Err(WinctlError::Unsupported("foreground_window"))
    }

    pub fn set_foreground(_handle: isize) -> Result<bool, WinctlError> {
        Err(WinctlError::Unsupported("set_foreground"))
    }

    pub fn focus_window_by_title(
        _needle: &str,
        _case_sensitive: bool,
    ) -> Result<bool, WinctlError> {
        Err(WinctlError::Unsupported("focus_window"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignores_case_when_asked() {
        assert!(title_matches("My Editor", "my editor", false));
        assert!(title_matches("My Editor", "EDIT", false));
    }

    #[test]
    fn match_requires_exact_case_when_sensitive() {
        assert!(!title_matches("My Editor", "my editor", true));
        assert!(title_matches("My Editor", "My Edit", true));
    }

    #[test]
    fn match_is_substring_containment() {
        assert!(title_matches("Document - My Editor 2.1", "My Editor", true));
        assert!(!title_matches("My Editor", "NONEXISTENT_TITLE_XYZ", false));
    }

    #[test]
    fn empty_needle_matches_any_title() {
        assert!(title_matches("anything", "", true));
        assert!(title_matches("anything", "", false));
    }

    #[test]
    fn snapshot_serialization_omits_raw_handle() {
        let snap = WindowSnapshot {
            hwnd: 0x1234,
            title: "My Editor".into(),
            class_name: "Chrome_WidgetWin_1".into(),
            is_visible: true,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert!(!json.contains("hwnd"));
        assert!(json.contains("\"title\":\"My Editor\""));
        assert!(json.contains("\"class_name\":\"Chrome_WidgetWin_1\""));
        assert!(json.contains("\"is_visible\":true"));
    }

    #[cfg(not(windows))]
    #[test]
    fn stub_surface_is_uniform() {
        use crate::errors::WinctlError;

        assert!(matches!(
            enumerate_windows(),
            Err(WinctlError::Unsupported(_))
        ));
        assert!(matches!(
            foreground_window(),
            Err(WinctlError::Unsupported(_))
        ));
        assert!(matches!(set_foreground(1), Err(WinctlError::Unsupported(_))));
        assert!(matches!(
            focus_window_by_title("x", false),
            Err(WinctlError::Unsupported(_))
        ));
    }
}
