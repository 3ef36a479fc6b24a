//! Stateless primitive validators
//!
//! Pure functions shared by the per-output parsers. They know nothing about
//! the document tree; everything here takes plain values and returns either
//! the validated value or a labeled [`ParseError`].

use std::net::IpAddr;

use crate::error::ParseError;

/// Check whether a string is an IPv4 or IPv6 literal.
///
/// No DNS resolution is attempted; `"localhost"` is not a literal.
pub fn is_ip_literal(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Parse a two-word choice element, e.g. `formatted`/`raw`.
///
/// Matching is ASCII-case-insensitive. `accept` maps to `true`, `reject`
/// to `false`; anything else is an error naming the element and both words.
pub fn choose_two(element: &str, value: &str, accept: &str, reject: &str) -> Result<bool, ParseError> {
    if value.eq_ignore_ascii_case(accept) {
        return Ok(true);
    }
    if value.eq_ignore_ascii_case(reject) {
        return Ok(false);
    }

    Err(ParseError::InvalidChoice {
        element: element.to_string(),
        value: value.to_string(),
        accept: accept.to_string(),
        reject: reject.to_string(),
    })
}

/// Check that every character is in the RFC 5424 printable range [33, 126].
///
/// The range excludes space and DEL, so an empty string is trivially valid
/// while any whitespace is not.
pub fn is_syslog_ascii(s: &str) -> bool {
    s.chars().all(|ch| (33..=126).contains(&(ch as u32)))
}

/// Parse a dotted version string such as `0.9.0.1` into four fields.
///
/// Between 2 and 4 dot-separated unsigned decimal fields are accepted;
/// fields beyond those supplied default to 0. Empty fields, non-numeric
/// characters, and anything outside the 2..=4 field count fail.
pub fn parse_dotted_version(s: &str) -> Result<[u32; 4], ParseError> {
    const FIELDS_MIN: usize = 2;
    const FIELDS_MAX: usize = 4;

    let malformed = || ParseError::InvalidVersion(s.to_string());

    let fields: Vec<&str> = s.split('.').collect();
    if fields.len() < FIELDS_MIN || fields.len() > FIELDS_MAX {
        return Err(malformed());
    }

    let mut version = [0u32; 4];
    for (idx, field) in fields.iter().enumerate() {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        version[idx] = field.parse().map_err(|_| malformed())?;
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("10.0.0.1", true)]
    #[case("::1", true)]
    #[case("fe80::1%eth0", false)]
    #[case("999.999.999.999", false)]
    #[case("example.com", false)]
    #[case("", false)]
    fn test_ip_literal(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_ip_literal(input), expected);
    }

    #[rstest]
    #[case("UDP", true)]
    #[case("udp", true)]
    #[case("Tcp", false)]
    fn test_choose_two_case_insensitive(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(choose_two("protocol", value, "UDP", "TCP").unwrap(), expected);
    }

    #[test]
    fn test_choose_two_rejects_third_option() {
        let err = choose_two("protocol", "sctp", "UDP", "TCP").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected value 'sctp' of the element 'protocol' (expected 'UDP' or 'TCP')"
        );
    }

    #[rstest]
    #[case("flowexport", true)]
    #[case("flow-export_1.2", true)]
    #[case("", true)] // nothing to violate the range
    #[case("flow export", false)] // space is 32
    #[case("flow\texport", false)]
    #[case("flow\u{7f}", false)] // DEL is 127
    #[case("průtok", false)]
    fn test_syslog_ascii(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_syslog_ascii(input), expected);
    }

    #[rstest]
    #[case("1.2", [1, 2, 0, 0])]
    #[case("1.2.3", [1, 2, 3, 0])]
    #[case("1.2.3.4", [1, 2, 3, 4])]
    #[case("0.9.0.1", [0, 9, 0, 1])]
    fn test_dotted_version_ok(#[case] input: &str, #[case] expected: [u32; 4]) {
        assert_eq!(parse_dotted_version(input).unwrap(), expected);
    }

    #[rstest]
    #[case("1")] // fewer than 2 fields
    #[case("1.2.3.4.5")]
    #[case("abc")]
    #[case("1.a")]
    #[case("1.2.")] // trailing separator leaves an empty field
    #[case(".1.2")]
    #[case("1..2")]
    #[case("1.2 ")]
    #[case("-1.2")]
    #[case("")]
    fn test_dotted_version_malformed(#[case] input: &str) {
        assert!(parse_dotted_version(input).is_err());
    }
}
