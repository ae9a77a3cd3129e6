use crate::protocol::request::Headers;
use std::collections::BTreeMap;

/// Cookie name to value, as sent by the client.
pub type Cookies = BTreeMap<String, String>;

const COOKIE: &str = "Cookie";

/// Collects the cookies of every `Cookie` header.
///
/// Each header value is split on `;` and every pair on its first `=`. Pairs are
/// trimmed, empty segments are skipped and a segment without `=` is kept as a
/// cookie with an empty value. A later pair overwrites an earlier one with the
/// same name.
pub fn extract_cookies(headers: &Headers) -> Cookies {
    headers
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(COOKIE))
        .flat_map(|(_, value)| value.split(';'))
        .filter_map(parse_pair)
        .collect()
}

fn parse_pair(segment: &str) -> Option<(String, String)> {
    let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_owned(), value.trim().to_owned()))
}
