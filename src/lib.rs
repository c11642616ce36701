//! chordsheet — lays out lyric sheets with inline chord markers and renders
//! them, with a legend of fretboard diagrams, to SVG.
//!
//! Recognized input: `{title:…}`, `{subtitle:…}`, `{comment:…}`,
//! `{chord-definitions}` and inline `[NAME]` / `[NAME*]` chord markers.
//!
//! # Example
//! ```no_run
//! use chordsheet::{render_file_to_svg, ChordLibrary, RenderOptions};
//!
//! let svg = render_file_to_svg(
//!     "songs/amazing-grace.cho",
//!     ChordLibrary::builtin(),
//!     &RenderOptions::default(),
//! )
//! .unwrap();
//! std::fs::write("amazing-grace.svg", svg).unwrap();
//! ```

pub mod chords;
pub mod error;
pub mod model;
pub mod parser;
pub mod renderer;
pub mod scanner;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

pub use chords::ChordLibrary;
pub use error::{Error, Result};
pub use model::*;
pub use parser::{parse_line, tokenize};
pub use renderer::{
    layout_diagram, layout_line, render_sheet, render_sheet_to_svg, sheet_to_svg,
    EstimatedTextMeasurer, PageSetup, RenderOptions, TextMeasurer,
};
pub use scanner::{chord_name, scan_chord_references};

/// Read a chord sheet from a file path.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(std::str::from_utf8(&data)?.to_string())
}

/// Load a JSON chord table and lay it over the built-in shapes.
pub fn load_chord_library<P: AsRef<Path>>(path: P) -> Result<ChordLibrary> {
    let json = read_file(path)?;
    let mut library = ChordLibrary::builtin().clone();
    library.extend(ChordLibrary::from_json(&json)?);
    Ok(library)
}

/// Lay out a chord sheet held in memory.
pub fn render_str(
    text: &str,
    library: &ChordLibrary,
    options: &RenderOptions,
) -> Result<RenderedSheet> {
    render_sheet(text, library, options)
}

/// Convert a chord sheet held in memory to SVG.
pub fn render_str_to_svg(
    text: &str,
    library: &ChordLibrary,
    options: &RenderOptions,
) -> Result<String> {
    render_sheet_to_svg(text, library, options)
}

/// Read a chord sheet file and convert it to SVG.
pub fn render_file_to_svg<P: AsRef<Path>>(
    path: P,
    library: &ChordLibrary,
    options: &RenderOptions,
) -> Result<String> {
    let text = read_file(path)?;
    render_sheet_to_svg(&text, library, options)
}

/// Convert a rendered sheet to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn sheet_to_json(sheet: &RenderedSheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(sheet)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(err) => {
            log::error!("chordsheet render failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Render a chord sheet file with the built-in chord library and return SVG
/// as a C string. The caller must free the returned string with
/// `chordsheet_free_string`.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chordsheet_render_file(path: *const c_char) -> *mut c_char {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(path) };
    let path_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    into_c_string(render_file_to_svg(
        path_str,
        ChordLibrary::builtin(),
        &RenderOptions::default(),
    ))
}

/// Render chord sheet text and return SVG as a C string.
/// The caller must free the returned string with `chordsheet_free_string`.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chordsheet_render_text(text: *const c_char) -> *mut c_char {
    if text.is_null() {
        return std::ptr::null_mut();
    }
    let text = match unsafe { CStr::from_ptr(text) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    into_c_string(render_str_to_svg(
        text,
        ChordLibrary::builtin(),
        &RenderOptions::default(),
    ))
}

/// Free a string previously returned by chordsheet functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chordsheet function, or null.
#[no_mangle]
pub unsafe extern "C" fn chordsheet_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ffi_round_trip() {
        let input = CString::new("{title: FFI}\n[G]la").unwrap();
        let out = unsafe { chordsheet_render_text(input.as_ptr()) };
        assert!(!out.is_null());
        let svg = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        unsafe { chordsheet_free_string(out) };
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("FFI"));
    }

    #[test]
    fn ffi_null_input() {
        assert!(unsafe { chordsheet_render_text(std::ptr::null()) }.is_null());
        assert!(unsafe { chordsheet_render_file(std::ptr::null()) }.is_null());
    }

    #[test]
    fn missing_file_is_io_error() {
        match read_file("does/not/exist.cho") {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("exist.cho")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
