use crate::binding::ParameterDescriptor;
use serde_json::Value;

/// JSON key a parameter reads from: the explicit key if one is set and not
/// blank, otherwise the parameter's own name.
pub fn resolve_key(descriptor: &ParameterDescriptor) -> &str {
    descriptor
        .explicit_key()
        .unwrap_or_else(|| descriptor.source_name())
}

/// Look `key` up in the root object. A non-object root, an absent key and an
/// explicit `null` are all "not found".
pub fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    tree.as_object()?.get(key).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::TypeKind;
    use serde_json::json;

    #[test]
    fn test_explicit_key_wins() {
        let d = ParameterDescriptor::new("bar", TypeKind::String).key("foo");
        assert_eq!(resolve_key(&d), "foo");
    }

    #[test]
    fn test_name_inference() {
        let d = ParameterDescriptor::new("age", TypeKind::String);
        assert_eq!(resolve_key(&d), "age");
        assert_eq!(resolve_key(&d.key("  ")), "age");
    }

    #[test]
    fn test_lookup_not_found_cases() {
        let tree = json!({"a": 1, "n": null});
        assert_eq!(lookup(&tree, "a"), Some(&json!(1)));
        assert_eq!(lookup(&tree, "n"), None);
        assert_eq!(lookup(&tree, "missing"), None);
        assert_eq!(lookup(&json!([1, 2]), "a"), None);
        assert_eq!(lookup(&json!("a"), "a"), None);
    }
}
