//! Shell-style environment substitution for configuration text.
//!
//! Supports `${VAR}` and `${VAR:-default}`. A `${VAR}` reference to an
//! unset variable is left intact so the failure is visible downstream; the
//! `:-` form falls back to the default when the variable is unset or empty.

/// Expand `${VAR}` / `${VAR:-default}` references in `input` against the
/// process environment.
pub fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expansion against an arbitrary lookup, so the substitution logic is
/// testable without mutating the process environment.
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            // Unterminated reference: emit the remainder verbatim.
            out.push_str(&rest[start..]);
            return out;
        };

        let body = &after[..end];
        let (name, default) = match body.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            // Not a variable reference we understand; keep it verbatim.
            out.push_str(&rest[start..start + 2 + end + 1]);
        } else {
            match lookup(name).filter(|v| !v.is_empty()) {
                Some(value) => out.push_str(&value),
                None => match default {
                    Some(default) => out.push_str(default),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                },
            }
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn expands_set_variable() {
        let vars = env(&[("STORE_PATH", "/data/store.xml")]);
        let out = expand_with("path = \"${STORE_PATH}\"", |n| vars.get(n).cloned());
        assert_eq!(out, "path = \"/data/store.xml\"");
    }

    #[test]
    fn unset_without_default_is_left_intact() {
        let out = expand_with("key = \"${MISSING}\"", |_| None);
        assert_eq!(out, "key = \"${MISSING}\"");
    }

    #[test]
    fn unset_with_default_uses_default() {
        let out = expand_with("port = ${PORT:-8080}", |_| None);
        assert_eq!(out, "port = 8080");
    }

    #[test]
    fn empty_value_falls_back_to_default() {
        let vars = env(&[("LEVEL", "")]);
        let out = expand_with("level = \"${LEVEL:-info}\"", |n| vars.get(n).cloned());
        assert_eq!(out, "level = \"info\"");
    }

    #[test]
    fn set_variable_wins_over_default() {
        let vars = env(&[("LEVEL", "debug")]);
        let out = expand_with("level = \"${LEVEL:-info}\"", |n| vars.get(n).cloned());
        assert_eq!(out, "level = \"debug\"");
    }

    #[test]
    fn multiple_references_in_one_line() {
        let vars = env(&[("A", "1"), ("B", "2")]);
        let out = expand_with("${A} and ${B} and ${C:-3}", |n| vars.get(n).cloned());
        assert_eq!(out, "1 and 2 and 3");
    }

    #[test]
    fn unterminated_reference_is_verbatim() {
        let out = expand_with("broken ${OOPS", |_| Some("x".into()));
        assert_eq!(out, "broken ${OOPS");
    }

    #[test]
    fn non_identifier_body_is_verbatim() {
        let out = expand_with("${not a var}", |_| Some("x".into()));
        assert_eq!(out, "${not a var}");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        let out = expand_with("plain text, no refs", |_| None);
        assert_eq!(out, "plain text, no refs");
    }
}
