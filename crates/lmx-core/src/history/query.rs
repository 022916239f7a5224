use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const TEXT_PARAM: &str = "text";

/// Characters left unescaped by ECMAScript `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build `?text=<percent-encoded text + chosen_token>`.
pub fn encode_query(text: &str, chosen_token: Option<&str>) -> String {
    let full = format!("{text}{}", chosen_token.unwrap_or(""));
    format!("?{TEXT_PARAM}={}", utf8_percent_encode(&full, COMPONENT))
}

/// Extract the sentence from a query string.
///
/// The first `&`-separated pair whose key is `text` decides: it must be
/// exactly `key=value` and the value must percent-decode to valid UTF-8.
/// An empty value counts as no deep link.
pub fn parse_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pair = query
        .split('&')
        .map(|p| p.split('=').collect::<Vec<_>>())
        .find(|parts| parts[0] == TEXT_PARAM)?;
    let [_, value] = pair.as_slice() else {
        return None;
    };
    if !escapes_well_formed(value) {
        return None;
    }
    let decoded = percent_decode_str(value).decode_utf8().ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(decoded.into_owned())
}

/// Every `%` must introduce two hex digits.
fn escapes_well_formed(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !matches!(hex, Some(h) if h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
