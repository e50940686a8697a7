//! `winctl_core` -- Pure Rust core library for winctl.
//!
//! This crate contains all OS-facing logic with **no PyO3 dependency**.
//! It can be consumed by:
//! - `winctl-pyo3` (PyO3 Python extension `winctl_native`)
//! - `winctl-ffi` (C ABI DLL for ctypes / other languages)
//! - `winctl-cli` (standalone CLI tools)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `WinctlError` enum via `thiserror` |
//! | [`com`] | `ComApartment` RAII wrapper for COM init (Windows only) |
//! | [`audio`] | Master volume / mute on the default playback device |
//! | [`window`] | Top-level window enumeration and foreground control |
//!
//! On non-Windows platforms every operation is present but returns
//! [`errors::WinctlError::Unsupported`], so callers see a uniform
//! surface instead of missing symbols.

#[cfg(windows)]
pub mod com;

pub mod audio;
pub mod errors;
pub mod window;
