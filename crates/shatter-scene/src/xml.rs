//! Permissive attribute readers shared by the descriptor parsers

use quick_xml::events::BytesStart;
use shatter_core::Vec3;

/// Read an attribute as an owned string. Missing or undecodable → None.
pub(crate) fn attr(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Attribute as a string, empty when missing
pub(crate) fn attr_or_empty(element: &BytesStart<'_>, name: &str) -> String {
    attr(element, name).unwrap_or_default()
}

/// Attribute parsed as an integer. Missing or malformed → `default`.
pub(crate) fn attr_int(element: &BytesStart<'_>, name: &str, default: i32) -> i32 {
    attr(element, name)
        .map(|v| parse_int(&v))
        .unwrap_or(default)
}

/// Attribute parsed as "x y z". Missing or wrong token count → None.
pub(crate) fn attr_vec3(element: &BytesStart<'_>, name: &str) -> Option<Vec3> {
    attr(element, name).and_then(|v| parse_vec3(&v))
}

/// Parse three whitespace-separated floats.
///
/// Exactly three tokens are required; an unparsable token reads as 0.
pub fn parse_vec3(value: &str) -> Option<Vec3> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    Some(Vec3::new(
        parse_float(parts[0]),
        parse_float(parts[1]),
        parse_float(parts[2]),
    ))
}

pub(crate) fn parse_float(token: &str) -> f32 {
    token.trim().parse().unwrap_or(0.0)
}

pub(crate) fn parse_int(token: &str) -> i32 {
    token.trim().parse().unwrap_or(0)
}

/// Format a vector the way descriptors store it
pub(crate) fn format_vec3(v: &Vec3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}
