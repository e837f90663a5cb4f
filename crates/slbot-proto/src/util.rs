//! Small string helpers shared by the parser and the command handlers.

/// Truncate `s` to at most `max` bytes without splitting a UTF-8 sequence.
///
/// # Examples
///
/// ```
/// use slbot_proto::util::truncate_bytes;
///
/// assert_eq!(truncate_bytes("hello", 3), "hel");
/// assert_eq!(truncate_bytes("héllo", 2), "h"); // 'é' is two bytes
/// assert_eq!(truncate_bytes("hi", 10), "hi");
/// ```
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
