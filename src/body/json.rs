//! JSON tree construction with an optional relaxed mode.
//!
//! Relaxed mode accepts unquoted object keys (`{id: 7, name: "x"}`), which
//! hand-written payloads use often. Strict parsing is always tried first, so
//! well-formed bodies never pay for the rewrite.

use crate::error::BodyFault;
use serde_json::Value;
use std::borrow::Cow;

/// Parse a request body into a JSON tree.
pub fn parse(text: &str, relaxed: bool) -> Result<Value, BodyFault> {
    if text.trim().is_empty() {
        return Err(BodyFault::Empty);
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(strict) if relaxed => match quote_bare_keys(text) {
            Cow::Owned(quoted) => serde_json::from_str(&quoted)
                .map_err(|_| BodyFault::Syntax(strict.to_string())),
            Cow::Borrowed(_) => Err(BodyFault::Syntax(strict.to_string())),
        },
        Err(e) => Err(BodyFault::Syntax(e.to_string())),
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Quote identifiers that sit in object-key position.
///
/// An identifier is a key when it directly follows `{` or `,` and is followed
/// by `:`. String contents are copied through untouched.
pub(crate) fn quote_bare_keys(text: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(text.len() + 16);
    let mut changed = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut last_significant: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                last_significant = Some('"');
            }
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }

        if is_ident_start(c) && matches!(last_significant, Some('{') | Some(',')) {
            let mut end = start + c.len_utf8();
            while let Some(&(idx, next)) = chars.peek() {
                if !is_ident_continue(next) {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            let ident = &text[start..end];
            if text[end..].trim_start().starts_with(':') {
                out.push('"');
                out.push_str(ident);
                out.push('"');
                changed = true;
            } else {
                out.push_str(ident);
            }
            last_significant = Some('a');
            continue;
        }

        if !c.is_whitespace() {
            last_significant = Some(c);
        }
        out.push(c);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json() {
        assert_eq!(parse(r#"{"a": 1}"#, false).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_unquoted_keys_in_relaxed_mode() {
        let v = parse(r#"{id: 7, name: "x", pojo: {ids: [1, 2]}}"#, true).unwrap();
        assert_eq!(v, json!({"id": 7, "name": "x", "pojo": {"ids": [1, 2]}}));
    }

    #[test]
    fn test_unquoted_keys_rejected_in_strict_mode() {
        assert!(matches!(parse("{id: 7}", false), Err(BodyFault::Syntax(_))));
    }

    #[test]
    fn test_literals_and_strings_untouched() {
        let quoted = quote_bare_keys(r#"{flag: true, list: [false, null], s: "a, b: c"}"#);
        assert_eq!(
            quoted,
            r#"{"flag": true, "list": [false, null], "s": "a, b: c"}"#
        );
    }

    #[test]
    fn test_literals_after_commas_in_arrays_untouched() {
        let quoted = quote_bare_keys(r#"{flags: [true, false, null, true], n: 1}"#);
        assert_eq!(quoted, r#"{"flags": [true, false, null, true], "n": 1}"#);
    }

    #[test]
    fn test_relaxed_objects_nested_in_arrays() {
        let v = parse(r#"[{a: 1}, {b: 2,c:[{d : true}]}]"#, true).unwrap();
        assert_eq!(v, json!([{"a": 1}, {"b": 2, "c": [{"d": true}]}]));

        let v = parse(r#"{items: [{id: 1, tags: [x]}]}"#, true);
        assert!(matches!(v, Err(BodyFault::Syntax(_))));
    }

    #[test]
    fn test_empty_and_broken_bodies() {
        assert_eq!(parse("", true), Err(BodyFault::Empty));
        assert_eq!(parse("  \n", true), Err(BodyFault::Empty));
        assert!(matches!(parse("{\"a\": ", true), Err(BodyFault::Syntax(_))));
    }
}
