//! COM apartment RAII guard.
//!
//! [`ComApartment`] pairs `CoInitializeEx` with `CoUninitialize` so the
//! apartment is released on every exit path, including early error
//! returns from audio endpoint construction.

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_MULTITHREADED};

use crate::errors::WinctlError;

/// RAII wrapper that calls `CoUninitialize` on `Drop` when a balancing
/// call is owed.
///
/// Joins (or creates) the process MTA.  `RPC_E_CHANGED_MODE` means the
/// thread already holds an STA apartment: COM stays usable, but no
/// balancing `CoUninitialize` may be issued per MSDN.
#[must_use = "ComApartment must outlive every COM interface acquired under it"]
pub struct ComApartment {
    owes_uninit: bool,
}

impl ComApartment {
    /// Enter the MTA apartment on the calling thread.
    pub fn enter() -> Result<Self, WinctlError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };

        match hr.0 as u32 {
            // S_OK (newly initialised) or S_FALSE (already initialised).
            0x0 | 0x1 => Ok(Self { owes_uninit: true }),
            // RPC_E_CHANGED_MODE -- the thread already has an STA
            // apartment.  COM is usable through it, but we did not
            // initialise and must not uninitialise.
            0x8001_0106 => {
                log::warn!(
                    "CoInitializeEx: RPC_E_CHANGED_MODE -- using the thread's existing \
                     STA apartment instead of MTA"
                );
                Ok(Self { owes_uninit: false })
            }
            other => Err(WinctlError::Initialization(format!(
                "CoInitializeEx failed: HRESULT 0x{other:08X}"
            ))),
        }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owes_uninit {
            unsafe { CoUninitialize() };
        }
    }
}
