//! Regex operator execution

use regex::Regex;

/// Compile a condition value as a regular expression.
///
/// Values written in delimited form (`/pattern/flags`) are unwrapped and
/// their trailing flags (`i`, `m`, `s`, `x`, `U`, `u`) turned into inline
/// flags; anything else is compiled as-is. Returns `None` for an invalid pattern.
pub(crate) fn compile_pattern(raw: &str) -> Option<Regex> {
    let source = match split_delimited(raw) {
        Some((body, flags)) if flags.is_empty() => body.to_string(),
        Some((body, flags)) => format!("(?{}){}", flags, body),
        None => raw.to_string(),
    };

    match Regex::new(&source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Invalid regex pattern {:?}: {}", raw, e);
            None
        }
    }
}

fn split_delimited(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let (body, flags) = (&rest[..end], &rest[end + 1..]);
    if flags.chars().all(|c| matches!(c, 'i' | 'm' | 's' | 'x' | 'U' | 'u')) {
        return Some((body, flags));
    }

    if !flags.is_empty() && flags.chars().all(is_pcre_modifier) {
        tracing::warn!(
            "Regex {:?} uses modifiers {:?} with no equivalent; matching it as a plain pattern",
            raw,
            flags
        );
    }
    None
}

fn is_pcre_modifier(c: char) -> bool {
    matches!(
        c,
        'i' | 'm' | 's' | 'x' | 'u' | 'A' | 'D' | 'S' | 'U' | 'X' | 'J' | 'n'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_matches(raw: &str, value: &str) -> bool {
        compile_pattern(raw).is_some_and(|regex| regex.is_match(value))
    }

    #[test]
    fn test_plain_pattern() {
        assert!(regex_matches(r"^.*@example\.com$", "a@example.com"));
        assert!(!regex_matches(r"^.*@example\.com$", "a@example.org"));
    }

    #[test]
    fn test_delimited_pattern() {
        assert!(regex_matches("/^abc/", "abcdef"));
        assert!(!regex_matches("/^abc/", "xabc"));
    }

    #[test]
    fn test_delimited_pattern_with_flags() {
        assert!(regex_matches("/^ABC$/i", "abc"));
        assert!(!regex_matches("/^ABC$/", "abc"));
    }

    #[test]
    fn test_delimited_pattern_with_unicode_flag() {
        assert!(regex_matches("/^abc/u", "abcdef"));
        assert!(regex_matches("/^ÄBC$/iu", "äbc"));
        assert!(!regex_matches("/^abc/u", "/^abc/u"));
    }

    #[test]
    fn test_unsupported_modifiers_fall_back_to_plain_pattern() {
        assert!(split_delimited("/^abc/D").is_none());
        assert!(compile_pattern("/^abc/D").is_some());
        assert!(!regex_matches("/^abc/D", "abc"));
    }

    #[test]
    fn test_slash_in_undelimited_pattern() {
        // Trailing text after the last slash is not a flag set
        assert!(regex_matches("/api/v1", "/api/v1/users"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(compile_pattern("(unclosed").is_none());
        assert!(!regex_matches("(unclosed", "(unclosed"));
        assert!(!regex_matches("/[a-/", "a"));
    }
}
