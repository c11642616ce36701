//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{render_file_to_svg, render_str_to_svg, ChordLibrary, RenderOptions, Result};

fn to_java_string(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(err) => {
            log::error!("chordsheet render failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Render a chord sheet file at the given path to SVG.
///
/// Called from Kotlin as:
///   external fun renderFile(path: String): String?
#[no_mangle]
pub extern "system" fn Java_com_chordsheet_app_ChordSheet_renderFile(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
) -> jstring {
    let path_str: String = match env.get_string(&path) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_file_to_svg(&path_str, ChordLibrary::builtin(), &RenderOptions::default());
    to_java_string(&mut env, result)
}

/// Render chord sheet text to SVG.
///
/// Called from Kotlin as:
///   external fun renderText(text: String): String?
#[no_mangle]
pub extern "system" fn Java_com_chordsheet_app_ChordSheet_renderText(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
) -> jstring {
    let text: String = match env.get_string(&text) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_str_to_svg(&text, ChordLibrary::builtin(), &RenderOptions::default());
    to_java_string(&mut env, result)
}
