//! Master volume and mute control for the default playback device.
//!
//! [`AudioEndpoint`] owns the Core Audio interface chain (device
//! enumerator -> default render device -> `IAudioEndpointVolume`) and
//! releases it in reverse-acquisition order on teardown.  Bindings go
//! through the module-level functions, which lazily construct one
//! process-wide endpoint behind a mutex.
//!
//! Mute and the volume scalar are independent: toggling mute never
//! changes the value reported by [`get_master_volume`].

use crate::errors::WinctlError;

/// Reject volume levels outside the closed range `[0.0, 1.0]`.
///
/// Runs before any platform dispatch, so an out-of-range level reports
/// `InvalidArgument` even on builds without a native backend.  NaN fails
/// the range check.
fn validate_level(level: f32) -> Result<(), WinctlError> {
    if (0.0..=1.0).contains(&level) {
        Ok(())
    } else {
        Err(WinctlError::InvalidArgument(format!(
            "volume level {level} outside [0.0, 1.0]"
        )))
    }
}

/// Set the default playback device's master volume scalar.
pub fn set_master_volume(level: f32) -> Result<(), WinctlError> {
    validate_level(level)?;
    imp::set_master_volume(level)
}

/// Current master volume scalar in `[0.0, 1.0]`.
pub fn get_master_volume() -> Result<f32, WinctlError> {
    imp::get_master_volume()
}

/// Set the device mute flag.
pub fn set_mute(muted: bool) -> Result<(), WinctlError> {
    imp::set_mute(muted)
}

/// Current device mute flag.
pub fn get_mute() -> Result<bool, WinctlError> {
    imp::get_mute()
}

/// Tear down the process-wide endpoint, releasing all OS resources.
///
/// Idempotent; the next volume/mute call re-acquires the endpoint (e.g.
/// after the default playback device changed).
pub fn reset_endpoint() {
    imp::reset_endpoint()
}

#[cfg(windows)]
pub use imp::AudioEndpoint;

// ---------------------------------------------------------------------------
// Windows implementation
// ---------------------------------------------------------------------------

#[cfg(windows)]
mod imp {
    use std::ptr;

    use parking_lot::Mutex;
    use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
    use windows::Win32::Media::Audio::{
        eConsole, eRender, IMMDevice, IMMDeviceEnumerator, MMDeviceEnumerator,
    };
    use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_ALL};

    use crate::com::ComApartment;
    use crate::errors::WinctlError;

    /// Move-only owner of the default render device's volume interface.
    ///
    /// Fields are declared in reverse-acquisition order so both
    /// [`close`](Self::close) and the implicit drop of a partially built
    /// value release volume -> device -> enumerator -> COM.  The type
    /// deliberately has no `Clone`: interface refcounts are only touched
    /// through the interfaces' own AddRef/Release, never a bitwise copy.
    pub struct AudioEndpoint {
        volume: Option<IAudioEndpointVolume>,
        device: Option<IMMDevice>,
        enumerator: Option<IMMDeviceEnumerator>,
        com: Option<ComApartment>,
    }

    // SAFETY: every interface is acquired under the MTA, where COM
    // pointers may be used from any thread, and all access to the
    // process-wide endpoint is serialized by `ENDPOINT`'s mutex.
    unsafe impl Send for AudioEndpoint {}

    impl AudioEndpoint {
        /// Acquire the COM apartment, device enumerator, default render
        /// device, and endpoint-volume interface, in that order.
        ///
        /// On failure the already-acquired interfaces are released (field
        /// drop order) before the error propagates; no partial state
        /// survives.
        pub fn open() -> Result<Self, WinctlError> {
            let com = ComApartment::enter()?;

            let enumerator: IMMDeviceEnumerator =
                unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) }
                    .map_err(|e| WinctlError::Initialization(format!("MMDeviceEnumerator: {e}")))?;

            let device = unsafe { enumerator.GetDefaultAudioEndpoint(eRender, eConsole) }
                .map_err(|e| {
                    WinctlError::Initialization(format!("GetDefaultAudioEndpoint: {e}"))
                })?;

            let volume: IAudioEndpointVolume = unsafe { device.Activate(CLSCTX_ALL, None) }
                .map_err(|e| WinctlError::Initialization(format!("IAudioEndpointVolume: {e}")))?;

            Ok(Self {
                volume: Some(volume),
                device: Some(device),
                enumerator: Some(enumerator),
                com: Some(com),
            })
        }

        fn volume(&self) -> Result<&IAudioEndpointVolume, WinctlError> {
            self.volume
                .as_ref()
                .ok_or_else(|| WinctlError::Operation("audio endpoint is closed".into()))
        }

        /// Set the master volume scalar.  The range has already been
        /// validated by the caller.
        pub fn set_master_volume(&self, level: f32) -> Result<(), WinctlError> {
            unsafe { self.volume()?.SetMasterVolumeLevelScalar(level, ptr::null()) }
                .map_err(|e| WinctlError::Operation(format!("SetMasterVolumeLevelScalar: {e}")))
        }

        pub fn get_master_volume(&self) -> Result<f32, WinctlError> {
            unsafe { self.volume()?.GetMasterVolumeLevelScalar() }
                .map_err(|e| WinctlError::Operation(format!("GetMasterVolumeLevelScalar: {e}")))
        }

        pub fn set_mute(&self, muted: bool) -> Result<(), WinctlError> {
            unsafe { self.volume()?.SetMute(muted, ptr::null()) }
                .map_err(|e| WinctlError::Operation(format!("SetMute: {e}")))
        }

        pub fn get_mute(&self) -> Result<bool, WinctlError> {
            unsafe { self.volume()?.GetMute() }
                .map(|b| b.as_bool())
                .map_err(|e| WinctlError::Operation(format!("GetMute: {e}")))
        }

        /// Release every OS resource in reverse-acquisition order.
        ///
        /// Safe to call repeatedly; already-released slots are skipped.
        pub fn close(&mut self) {
            drop(self.volume.take());
            drop(self.device.take());
            drop(self.enumerator.take());
            drop(self.com.take());
        }
    }

    impl Drop for AudioEndpoint {
        fn drop(&mut self) {
            self.close();
        }
    }

    // -----------------------------------------------------------------------
    // Process-wide endpoint
    // -----------------------------------------------------------------------

    /// Lazily constructed on first use.  The mutex also serializes
    /// construction, so two simultaneous first calls cannot both build
    /// an endpoint.
    static ENDPOINT: Mutex<Option<AudioEndpoint>> = Mutex::new(None);

    fn with_endpoint<T>(
        f: impl FnOnce(&AudioEndpoint) -> Result<T, WinctlError>,
    ) -> Result<T, WinctlError> {
        let mut guard = ENDPOINT.lock();
        if guard.is_none() {
            *guard = Some(AudioEndpoint::open()?);
        }
        let Some(endpoint) = guard.as_ref() else {
            return Err(WinctlError::Operation("audio endpoint unavailable".into()));
        };
        f(endpoint)
    }

    pub fn set_master_volume(level: f32) -> Result<(), WinctlError> {
        with_endpoint(|ep| ep.set_master_volume(level))
    }

    pub fn get_master_volume() -> Result<f32, WinctlError> {
        with_endpoint(|ep| ep.get_master_volume())
    }

    pub fn set_mute(muted: bool) -> Result<(), WinctlError> {
        with_endpoint(|ep| ep.set_mute(muted))
    }

    pub fn get_mute() -> Result<bool, WinctlError> {
        with_endpoint(|ep| ep.get_mute())
    }

    pub fn reset_endpoint() {
        *ENDPOINT.lock() = None;
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn closed_endpoint() -> AudioEndpoint {
            AudioEndpoint {
                volume: None,
                device: None,
                enumerator: None,
                com: None,
            }
        }

        #[test]
        fn close_is_idempotent() {
            let mut ep = closed_endpoint();
            ep.close();
            ep.close();
        }

        #[test]
        fn closed_endpoint_reports_operation_error() {
            let ep = closed_endpoint();
            assert!(matches!(
                ep.get_master_volume(),
                Err(WinctlError::Operation(_))
            ));
            assert!(matches!(
                ep.set_master_volume(0.5),
                Err(WinctlError::Operation(_))
            ));
            assert!(matches!(ep.set_mute(true), Err(WinctlError::Operation(_))));
            assert!(matches!(ep.get_mute(), Err(WinctlError::Operation(_))));
        }
    }
}

// ---------------------------------------------------------------------------
// Stubs for platforms without a native backend
// ---------------------------------------------------------------------------

#[cfg(not(windows))]
mod imp {
    use crate::errors::WinctlError;

    pub fn set_master_volume(_level: f32) -> Result<(), WinctlError> {
        Err(WinctlError::Unsupported("set_master_volume"))
    }

    pub fn get_master_volume() -> Result<f32, WinctlError> {
        Err(WinctlError::Unsupported("get_master_volume"))
    }

    pub fn set_mute(_muted: bool) -> Result<(), WinctlError> {
        Err(WinctlError::Unsupported("set_mute"))
    }

    pub fn get_mute() -> Result<bool, WinctlError> {
        Err(WinctlError::Unsupported("get_mute"))
    }

    pub fn reset_endpoint() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_range_accepts_bounds_and_interior() {
        assert!(validate_level(0.0).is_ok());
        assert!(validate_level(0.5).is_ok());
        assert!(validate_level(1.0).is_ok());
    }

    #[test]
    fn level_range_rejects_out_of_range() {
        for level in [-0.1_f32, 1.5, -1.0, 2.0] {
            let err = validate_level(level).unwrap_err();
            assert!(matches!(err, WinctlError::InvalidArgument(_)));
            assert!(err.to_string().contains("outside [0.0, 1.0]"));
        }
    }

    #[test]
    fn level_range_rejects_nan() {
        assert!(matches!(
            validate_level(f32::NAN),
            Err(WinctlError::InvalidArgument(_))
        ));
    }

    #[test]
    fn out_of_range_wins_over_platform_dispatch() {
        // The range check runs before the OS layer is touched, so this
        // holds on every platform.
        let err = set_master_volume(1.5).unwrap_err();
        assert!(matches!(err, WinctlError::InvalidArgument(_)));
    }

    #[cfg(not(windows))]
    #[test]
    fn stub_surface_is_uniform() {
        assert!(matches!(
            set_master_volume(0.5),
            Err(WinctlError::Unsupported(_))
        ));
        assert!(matches!(
            get_master_volume(),
            Err(WinctlError::Unsupported(_))
        ));
        assert!(matches!(set_mute(true), Err(WinctlError::Unsupported(_))));
        assert!(matches!(get_mute(), Err(WinctlError::Unsupported(_))));

        // Teardown without an endpoint is a no-op, twice over.
        reset_endpoint();
        reset_endpoint();
    }
}
