//! Left-to-right scanner for raw path strings.
//!
//! The grammar has three constructs:
//!
//! - an unescaped `.` delimits map keys and is not part of any token;
//! - `[<optional '-'><digits>]` is a complete list-index token and delimits
//!   on its own, no surrounding dots required;
//! - inside a key segment, `\.` and `\\` unescape to `.` and `\`; any other
//!   backslash is an ordinary character.
//!
//! Empty segments produced by delimiters (leading/trailing/doubled dots,
//! dots adjacent to brackets) are dropped. Brackets that do not form a
//! valid integer index are ordinary characters.

use crate::token::PathToken;

/// Parse a raw string that contains path syntax (`.` or `[`).
pub(crate) fn parse_raw(raw: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut segment = String::new();
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if matches!(bytes.get(i + 1), Some(b'.' | b'\\')) => {
                segment.push(char::from(bytes[i + 1]));
                i += 2;
            }
            b'.' => {
                flush_segment(&mut segment, &mut tokens);
                i += 1;
            }
            b'[' => {
                if let Some((index, consumed)) = scan_bracket(&raw[i..]) {
                    flush_segment(&mut segment, &mut tokens);
                    tokens.push(PathToken::index(index));
                    i += consumed;
                } else {
                    segment.push('[');
                    i += 1;
                }
            }
            _ => {
                // Copy one full character; all structural bytes are ASCII,
                // so multi-byte characters always land here.
                let rest = &raw[i..];
                let width = rest.chars().next().map_or(1, char::len_utf8);
                segment.push_str(&rest[..width]);
                i += width;
            }
        }
    }
    flush_segment(&mut segment, &mut tokens);
    tokens
}

/// Try to read `[-?digits]` at the start of `s` (which begins with `[`).
///
/// Returns the parsed index and the number of bytes consumed, or `None`
/// when the brackets do not form an index and must be treated literally.
fn scan_bracket(s: &str) -> Option<(i64, usize)> {
    let close = s.find(']')?;
    let body = &s[1..close];
    let digits = body.strip_prefix('-').unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = body.parse().ok()?;
    Some((index, close + 1))
}

fn flush_segment(segment: &mut String, tokens: &mut Vec<PathToken>) {
    if !segment.is_empty() {
        tokens.push(PathToken::name(std::mem::take(segment)));
    }
}
