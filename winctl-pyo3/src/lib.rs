//! `winctl_native` -- Thin PyO3 wrappers around `winctl_core`.
//!
//! Each function releases the GIL via `py.allow_threads()` and converts
//! the Rust result to Python objects.  All OS logic lives in
//! `winctl_core`.

use pyo3::exceptions::{PyNotImplementedError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use winctl_core::errors::WinctlError;

#[cfg(windows)]
const PLATFORM: &str = "Windows";
#[cfg(not(windows))]
const PLATFORM: &str = "Unsupported";

// ---------------------------------------------------------------------------
// Error conversion helper
// ---------------------------------------------------------------------------

fn to_py_err(e: WinctlError) -> PyErr {
    match e {
        WinctlError::InvalidArgument(_) => PyValueError::new_err(e.to_string()),
        WinctlError::Unsupported(_) => PyNotImplementedError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Audio functions
// ---------------------------------------------------------------------------

/// Set the system master volume (0.0 to 1.0).
#[pyfunction]
#[pyo3(signature = (level,))]
fn set_master_volume(py: Python<'_>, level: f32) -> PyResult<()> {
    py.allow_threads(move || winctl_core::audio::set_master_volume(level))
        .map_err(to_py_err)
}

/// Get the system master volume (0.0 to 1.0).
#[pyfunction]
fn get_master_volume(py: Python<'_>) -> PyResult<f32> {
    py.allow_threads(winctl_core::audio::get_master_volume)
        .map_err(to_py_err)
}

/// Set the system mute state.
#[pyfunction]
#[pyo3(signature = (muted,))]
fn set_mute(py: Python<'_>, muted: bool) -> PyResult<()> {
    py.allow_threads(move || winctl_core::audio::set_mute(muted))
        .map_err(to_py_err)
}

/// Get the system mute state.
#[pyfunction]
fn get_mute(py: Python<'_>) -> PyResult<bool> {
    py.allow_threads(winctl_core::audio::get_mute)
        .map_err(to_py_err)
}

/// Release the audio endpoint.  The next volume/mute call re-acquires
/// it, so call this around default-device changes or at interpreter
/// shutdown.
#[pyfunction]
fn reset_audio(py: Python<'_>) -> PyResult<()> {
    py.allow_threads(winctl_core::audio::reset_endpoint);
    Ok(())
}

// ---------------------------------------------------------------------------
// Window functions
// ---------------------------------------------------------------------------

/// Focus a window by title substring.
///
/// Returns whether a matching window was found and brought to the
/// foreground; "not found" is an ordinary `False`, not an exception.
#[pyfunction]
#[pyo3(signature = (title, case_sensitive=false))]
fn focus_window(py: Python<'_>, title: &str, case_sensitive: bool) -> PyResult<bool> {
    let title_owned = title.to_owned();
    py.allow_threads(move || {
        winctl_core::window::focus_window_by_title(&title_owned, case_sensitive)
    })
    .map_err(to_py_err)
}

/// List all visible windows as dicts with `title`, `class_name`, and
/// `is_visible` keys.
///
/// Raw window handles are never exposed to Python.
#[pyfunction]
fn enumerate_windows(py: Python<'_>) -> PyResult<PyObject> {
    let windows = py
        .allow_threads(|| match winctl_core::window::enumerate_windows() {
            Ok(ws) => Ok(ws),
            Err(err @ WinctlError::Unsupported(_)) => Err(err),
            // Enumeration defines no failure mode beyond an empty result.
            Err(_) => Ok(Vec::new()),
        })
        .map_err(to_py_err)?;

    let result = PyList::empty(py);
    for window in &windows {
        let dict = PyDict::new(py);
        dict.set_item("title", &window.title)?;
        dict.set_item("class_name", &window.class_name)?;
        dict.set_item("is_visible", window.is_visible)?;
        result.append(dict)?;
    }
    Ok(result.into())
}

// ---------------------------------------------------------------------------
// Module registration
// ---------------------------------------------------------------------------

/// Register the `winctl_native` Python module.
#[pymodule]
fn winctl_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(set_master_volume, m)?)?;
    m.add_function(wrap_pyfunction!(get_master_volume, m)?)?;
    m.add_function(wrap_pyfunction!(set_mute, m)?)?;
    m.add_function(wrap_pyfunction!(get_mute, m)?)?;
    m.add_function(wrap_pyfunction!(reset_audio, m)?)?;
    m.add_function(wrap_pyfunction!(focus_window, m)?)?;
    m.add_function(wrap_pyfunction!(enumerate_windows, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("platform", PLATFORM)?;
    m.add(
        "__doc__",
        "Native system-control hooks: master volume and window focus.",
    )?;

    Ok(())
}
