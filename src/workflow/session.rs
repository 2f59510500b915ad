pub const DEFAULT_SESSION_KEY: &str = "default";
pub const SESSION_ENV_VAR: &str = "CLAUDE_SESSION_ID";

/// Longest key we will embed in a state file name.
const MAX_SESSION_KEY_LEN: usize = 64;

/// Derive a filesystem-safe key for the current conversation.
///
/// Pure and total: absent, empty, or whitespace-only input maps to
/// [`DEFAULT_SESSION_KEY`]; every other character outside
/// `[A-Za-z0-9_-]` is replaced with `_`, so the key can never smuggle a path
/// separator or `..` segment into the state directory.
pub fn resolve_session_key(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return DEFAULT_SESSION_KEY.to_string(),
    };
    raw.chars()
        .take(MAX_SESSION_KEY_LEN)
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// All hooks that lack a distinct session id share the default-keyed state
/// file; that is deliberate, not a fallback bug.
pub fn session_key_from_env() -> String {
    let raw = std::env::var(SESSION_ENV_VAR).ok();
    resolve_session_key(raw.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_input_maps_to_default() {
        assert_eq!(resolve_session_key(None), DEFAULT_SESSION_KEY);
        assert_eq!(resolve_session_key(Some("")), DEFAULT_SESSION_KEY);
        assert_eq!(resolve_session_key(Some("   ")), DEFAULT_SESSION_KEY);
    }

    #[test]
    fn path_unsafe_characters_are_neutralized() {
        assert_eq!(resolve_session_key(Some("abc/def")), "abc_def");
        assert_eq!(resolve_session_key(Some("a\\b:c")), "a_b_c");
        assert_eq!(resolve_session_key(Some("../../etc/passwd")), "______etc_passwd");
        assert_eq!(resolve_session_key(Some("/etc/passwd")), "_etc_passwd");
    }

    #[test]
    fn safe_keys_pass_through_unchanged() {
        assert_eq!(resolve_session_key(Some("session-42_a")), "session-42_a");
    }

    #[test]
    fn oversized_keys_are_truncated() {
        let raw = "x".repeat(500);
        assert_eq!(resolve_session_key(Some(&raw)).len(), 64);
    }
}
