//! POSIX single-quote escaping.

/// Wrap a string in single quotes for embedding in a POSIX shell command.
///
/// Inside single quotes the shell expands nothing, so the only byte that
/// needs handling is the quote itself: each `'` becomes `'"'"'` (close the
/// quoted region, emit a double-quoted literal quote, reopen). Expanding
/// the result as a single word yields exactly the input, for any input.
pub fn single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str(r#"'"'"'"#);
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
