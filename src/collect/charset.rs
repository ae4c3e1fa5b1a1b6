//! Turning a fetched page into text using its declared character encoding

use encoding_rs::{Encoding, UTF_8};

use super::fetch::Fetched;

/// How far into the body a `<meta charset>` declaration is looked for
const SNIFF_LIMIT: usize = 1024;

/// Decode a page body
///
/// The encoding comes from the `Content-Type` charset, then from a
/// `<meta charset>` or `<meta http-equiv>` declaration near the top of the
/// document, and is UTF-8 otherwise. A byte order mark wins over all of them.
/// Undecodable bytes become U+FFFD.
pub fn decode_page(fetched: &Fetched) -> String {
    let declared = fetched
        .content_type
        .as_deref()
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(&fetched.body));
    let encoding = declared.unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(&fetched.body);
    if had_errors {
        tracing::debug!("Page is not valid {}, some characters replaced", used.name());
    }
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches(|c| c == '"' || c == '\''))
            } else {
                None
            }
        })
        .find_map(|label| Encoding::for_label(label.as_bytes()))
}

fn charset_from_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = body[..body.len().min(SNIFF_LIMIT)].to_ascii_lowercase();
    let mut rest = &head[..];

    while let Some(start) = find(rest, b"<meta") {
        let tag = &rest[start..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        if let Some(label) = charset_label(&tag[..end]) {
            if let Some(encoding) = Encoding::for_label(label) {
                return Some(encoding);
            }
        }
        rest = &tag[end..];
    }
    None
}

/// Value following `charset=` inside one tag, quotes stripped
fn charset_label(tag: &[u8]) -> Option<&[u8]> {
    let pos = find(tag, b"charset")?;
    let after = skip_spaces(&tag[pos + b"charset".len()..]);
    let after = skip_spaces(after.strip_prefix(b"=")?);
    let after = after
        .strip_prefix(b"\"")
        .or_else(|| after.strip_prefix(b"'"))
        .unwrap_or(after);
    let len = after
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
        .count();
    (len > 0).then(|| &after[..len])
}

fn skip_spaces(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
