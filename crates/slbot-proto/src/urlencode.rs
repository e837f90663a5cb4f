//! Percent-encoding for search links.
//!
//! ASCII letters, digits and the pass-through set `+ / & =` are copied as
//! is; every other byte (space included) becomes `%xx` with lowercase hex.
//! Encoding works against a byte budget and fails outright when the budget
//! runs out: a half-encoded link is never returned.
//!
//! ```
//! use slbot_proto::urlencode::{percent_encode, query_url};
//!
//! assert_eq!(percent_encode("a b+c", 64).unwrap(), "a%20b+c");
//! assert_eq!(
//!     query_url("https://www.google.com/search?q=", "rust lang", 64).unwrap(),
//!     "https://www.google.com/search?q=rust%20lang"
//! );
//! ```

use crate::error::EncodeError;

/// Bytes copied unencoded besides ASCII alphanumerics.
pub const PASS_THROUGH: &[u8] = b"+/&=";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[inline]
fn passes_through(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || PASS_THROUGH.contains(&byte)
}

/// Percent-encode `src` into at most `budget` output bytes.
///
/// # Errors
///
/// [`EncodeError::BudgetExhausted`] if the encoded form does not fit.
pub fn percent_encode(src: &str, budget: usize) -> Result<String, EncodeError> {
    let mut out = String::with_capacity(budget.min(src.len() * 3));
    for (consumed, &byte) in src.as_bytes().iter().enumerate() {
        let needed = if passes_through(byte) { 1 } else { 3 };
        if out.len() + needed > budget {
            return Err(EncodeError::BudgetExhausted { budget, consumed });
        }
        if needed == 1 {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
    }
    Ok(out)
}

/// Build `template` + percent-encoded `query`, the query limited to `budget`
/// encoded bytes.
///
/// # Errors
///
/// Propagates [`EncodeError::BudgetExhausted`] from [`percent_encode`].
pub fn query_url(template: &str, query: &str, budget: usize) -> Result<String, EncodeError> {
    let encoded = percent_encode(query, budget)?;
    let mut url = String::with_capacity(template.len() + encoded.len());
    url.push_str(template);
    url.push_str(&encoded);
    Ok(url)
}

/// Reverse [`percent_encode`]: every `%XX` with two hex digits becomes the
/// byte it names; anything else is copied unchanged.
pub fn percent_decode(src: &str) -> Vec<u8> {
    let bytes = src.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
