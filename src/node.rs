//! Typed access to the configuration document tree
//!
//! The document itself is parsed by `serde_yaml`; this module is the thin
//! seam between that tree and the schema-aware parsers. It offers exactly
//! two things: iteration over a mapping's labeled children, and scalar
//! extraction that fails with an error naming the element and its context.

use serde_yaml::Value;

use crate::error::{ParseError, Result};

/// Iterate the labeled children of a mapping node.
///
/// Fails when the node is not a mapping or when a key is not a plain string
/// (anchors resolving to non-string keys have no meaning in this schema).
pub(crate) fn children<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<Vec<(&'a str, &'a Value)>> {
    let map = value
        .as_mapping()
        .ok_or(ParseError::NotAMapping { context })?;

    let mut entries = Vec::with_capacity(map.len());
    for (key, child) in map {
        let tag = key.as_str().ok_or(ParseError::NotAMapping { context })?;
        entries.push((tag, child));
    }
    Ok(entries)
}

/// View a node as a sequence of items.
pub(crate) fn sequence<'a>(value: &'a Value, context: &'static str) -> Result<&'a [Value]> {
    value
        .as_sequence()
        .map(Vec::as_slice)
        .ok_or(ParseError::NotASequence { context })
}

/// Extract a string scalar.
pub(crate) fn string<'a>(
    value: &'a Value,
    element: &'static str,
    context: &'static str,
) -> Result<&'a str> {
    value.as_str().ok_or(ParseError::WrongType {
        element,
        context,
        expected: "string",
    })
}

/// Extract an unsigned integer scalar. Negative numbers are a type error.
pub(crate) fn uint(value: &Value, element: &'static str, context: &'static str) -> Result<u64> {
    value.as_u64().ok_or(ParseError::WrongType {
        element,
        context,
        expected: "non-negative integer",
    })
}

/// Extract a boolean scalar.
pub(crate) fn boolean(value: &Value, element: &'static str, context: &'static str) -> Result<bool> {
    value.as_bool().ok_or(ParseError::WrongType {
        element,
        context,
        expected: "boolean",
    })
}

/// Extract a port number. Ports are 1..=65535; 0 is rejected explicitly.
pub(crate) fn port(
    value: &Value,
    element: &'static str,
    context: &'static str,
    port_context: &'static str,
) -> Result<u16> {
    let raw = uint(value, element, context)?;
    if raw == 0 || raw > u64::from(u16::MAX) {
        return Err(ParseError::InvalidPort {
            context: port_context,
        });
    }
    Ok(raw as u16)
}
