//! Script name validation
//!
//! Names are bundle keys: relative, `/`-separated, used verbatim. Anything
//! that could escape the bundle root is rejected before a lookup happens.

use super::ScriptError;

/// Separator used by every bundle key regardless of host platform
pub const KEY_SEPARATOR: char = '/';

/// Reject names that cannot be bundle keys
pub fn validate_script_name(name: &str) -> Result<(), ScriptError> {
    match invalid_reason(name) {
        Some(reason) => Err(ScriptError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn invalid_reason(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name is empty");
    }
    if name.starts_with(KEY_SEPARATOR) {
        return Some("absolute paths are not allowed");
    }
    if name.contains('\\') {
        return Some("backslash separators are not allowed");
    }
    if name.contains('\0') {
        return Some("name contains a NUL byte");
    }
    if has_drive_prefix(name) {
        return Some("drive prefixes are not allowed");
    }

    for segment in name.split(KEY_SEPARATOR) {
        match segment {
            "" => return Some("empty path segment"),
            "." | ".." => return Some("relative segments ('.' or '..') are not allowed"),
            _ => {}
        }
    }

    None
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
