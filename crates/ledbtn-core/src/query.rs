//! Request parameter parsing
//!
//! Query strings are taken as-is (no percent-decoding). Pairs are split on
//! `&`, key and value on the first `=`, and the first occurrence of a key
//! wins. Values are read like C `atoi`: leading whitespace, an optional
//! sign, then digits up to the first non-digit. A value with no digits
//! reads as `0`. A missing key or an out-of-range number yields `None`;
//! callers treat that as "leave the outputs alone".

use crate::channel::Channel;

/// Look up the raw value of `key` in a query string.
pub fn query_value<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(k, v)| (k == key).then_some(v))
}

/// Leading integer of `value`, saturating at the `i32` bounds.
pub fn leading_int(value: &str) -> i32 {
    let bytes = value
        .trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c'])
        .as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
        });
    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed).unwrap_or(i32::MAX)
}

/// Parse an output level: `0` (off) or `1` (on).
fn parse_state(value: &str) -> Option<bool> {
    match leading_int(value) {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

fn parse_channel(value: &str) -> Option<Channel> {
    u8::try_from(leading_int(value)).ok().and_then(Channel::new)
}

/// Parameters of `/set?led=N&state=0|1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOutputParams {
    pub channel: Channel,
    pub on: bool,
}

impl SetOutputParams {
    pub fn parse(query: Option<&str>) -> Option<Self> {
        let query = query?;
        let channel = query_value(query, "led").and_then(parse_channel)?;
        let on = query_value(query, "state").and_then(parse_state)?;
        Some(Self { channel, on })
    }
}

/// Parameters of `/all?state=0|1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAllParams {
    pub on: bool,
}

impl SetAllParams {
    pub fn parse(query: Option<&str>) -> Option<Self> {
        let on = query.and_then(|q| query_value(q, "state")).and_then(parse_state)?;
        Some(Self { on })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_values_by_key() {
        let query = "led=2&state=1";
        assert_eq!(query_value(query, "led"), Some("2"));
        assert_eq!(query_value(query, "state"), Some("1"));
        assert_eq!(query_value(query, "missing"), None);
        assert_eq!(query_value("flag&led=3", "led"), Some("3"));
        assert_eq!(query_value("led=1&led=4", "led"), Some("1"));
        assert_eq!(query_value("led=", "led"), Some(""));
    }

    #[test]
    fn parses_set_output() {
        let params = SetOutputParams::parse(Some("led=2&state=1")).unwrap();
        assert_eq!(params.channel.index(), 2);
        assert!(params.on);

        let params = SetOutputParams::parse(Some("state=0&led=4")).unwrap();
        assert_eq!(params.channel.index(), 4);
        assert!(!params.on);
    }

    #[test]
    fn rejects_bad_set_output() {
        for query in [
            "led=5&state=1",
            "led=0&state=1",
            "led=-1&state=1",
            "led=2&state=2",
            "led=2&state=-1",
            "led=2",
            "state=1",
            "led=two&state=1",
            "led=&state=1",
            "led=99999999999&state=1",
            "",
        ] {
            assert_eq!(SetOutputParams::parse(Some(query)), None, "{query}");
        }
        assert_eq!(SetOutputParams::parse(None), None);
    }

    #[test]
    fn values_are_read_like_atoi() {
        let parse = |query| SetOutputParams::parse(Some(query)).map(|p| (p.channel.index(), p.on));

        assert_eq!(parse("led=2abc&state=1"), Some((2, true)));
        assert_eq!(parse("led=2&state=1x"), Some((2, true)));
        assert_eq!(parse("led= 3&state=+1"), Some((3, true)));
        assert_eq!(parse("led=04&state=00"), Some((4, false)));
        // No digits reads as 0, which is a valid level
        assert_eq!(parse("led=2&state="), Some((2, false)));
        assert_eq!(parse("led=2&state=on"), Some((2, false)));
    }

    #[test]
    fn leading_int_edges() {
        assert_eq!(leading_int("42"), 42);
        assert_eq!(leading_int("\t\n 7z"), 7);
        assert_eq!(leading_int("-12"), -12);
        assert_eq!(leading_int("+"), 0);
        assert_eq!(leading_int("x1"), 0);
        assert_eq!(leading_int(""), 0);
        assert_eq!(leading_int("99999999999"), i32::MAX);
        assert_eq!(leading_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn parses_set_all() {
        assert_eq!(SetAllParams::parse(Some("state=1")), Some(SetAllParams { on: true }));
        assert_eq!(SetAllParams::parse(Some("state=0")), Some(SetAllParams { on: false }));
        assert_eq!(SetAllParams::parse(Some("state=2")), None);
        assert_eq!(SetAllParams::parse(Some("state=1;")), Some(SetAllParams { on: true }));
        assert_eq!(SetAllParams::parse(Some("led=1")), None);
        assert_eq!(SetAllParams::parse(None), None);
    }
}
