//! Control-character escaping for free-text record fields.

/// Substitute written for a line feed.
pub const NEWLINE_SUBSTITUTE: char = '|';
/// Substitute written for a carriage return.
pub const CARRIAGE_RETURN_SUBSTITUTE: char = '<';
/// Substitute written for any other control character.
pub const CONTROL_SUBSTITUTE: char = '?';

/// Append `text` to `out`, replacing control characters when `escape` is set.
///
/// ```
/// use framesink::diagnostics::escape::push_escaped;
///
/// let mut out = String::new();
/// push_escaped(&mut out, "a\nb\rc\u{7}", true);
/// assert_eq!(out, "a|b<c?");
/// ```
pub fn push_escaped(out: &mut String, text: &str, escape: bool) {
    if !escape {
        out.push_str(text);
        return;
    }
    out.extend(text.chars().map(|c| match c {
        '\n' => NEWLINE_SUBSTITUTE,
        '\r' => CARRIAGE_RETURN_SUBSTITUTE,
        c if c.is_control() => CONTROL_SUBSTITUTE,
        c => c,
    }));
}
