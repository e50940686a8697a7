//! Error types for `winctl_core`.
//!
//! All Rust-side failures are funnelled through [`WinctlError`], which
//! uses `thiserror` for `Display` and `Error` derives.  PyO3 conversion
//! is handled in the `winctl-pyo3` crate, keeping this crate PyO3-free.

use thiserror::Error;

/// Top-level error type for the `winctl_core` library.
///
/// Each variant corresponds to a distinct failure class; the variant
/// name is embedded in the `Display` output so FFI and Python callers
/// can classify errors from the message alone.
#[derive(Debug, Error)]
pub enum WinctlError {
    /// Caller-supplied value outside its contract (e.g. a volume level
    /// not in `[0.0, 1.0]`).  Detected before any OS call is made.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    /// The audio subsystem, default playback device, or volume-control
    /// interface could not be acquired.
    #[error("InitializationError: {0}")]
    Initialization(String),

    /// An individual OS call failed after successful initialization.
    /// Carries the OS diagnostic text.
    #[error("OperationError: {0}")]
    Operation(String),

    /// The operation has no native implementation on this platform.
    /// Raised rather than silently succeeding, so callers cannot mistake
    /// "unsupported" for "done".
    #[error("UnsupportedPlatform: {0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Convert a `windows::core::Error` (COM / Win32 HRESULT failure) into a
/// [`WinctlError::Operation`].
#[cfg(windows)]
impl From<windows::core::Error> for WinctlError {
    fn from(err: windows::core::Error) -> Self {
        WinctlError::Operation(format!("Windows COM error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_failure_class() {
        let e = WinctlError::InvalidArgument("volume level 1.5 outside [0.0, 1.0]".into());
        assert!(e.to_string().starts_with("InvalidArgument:"));

        let e = WinctlError::Initialization("no default playback device".into());
        assert!(e.to_string().starts_with("InitializationError:"));
    }

    #[test]
    fn operation_error_keeps_os_diagnostic() {
        let e = WinctlError::Operation("SetMute: 0x80070005 Access is denied".into());
        assert!(e.to_string().contains("0x80070005"));
    }

    #[test]
    fn unsupported_names_the_operation() {
        let e = WinctlError::Unsupported("set_master_volume");
        let msg = e.to_string();
        assert!(msg.contains("set_master_volume"));
        assert!(msg.contains("not supported on this platform"));
    }
}
