//! Recursive removal of empty noise from output payloads

use serde_json::{Map, Value};

/// Removes nulls, whitespace-only strings, and containers left empty
///
/// Numbers and booleans always survive, including `0` and `false`. Strings
/// are tested trimmed but kept verbatim. A payload that prunes away
/// entirely comes back as `{}` so there is always something to print.
pub fn prune(value: Value) -> Value {
    prune_inner(value).unwrap_or_else(|| Value::Object(Map::new()))
}

fn prune_inner(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(Value::String(s))
            }
        }
        Value::Bool(_) | Value::Number(_) => Some(value),
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune_inner).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune_inner(v).map(|v| (k, v)))
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value as Json};

    #[test]
    fn removes_null_and_empty_containers() {
        let pruned = prune(json!({"id": "x", "lead": null, "tags": []}));
        assert_eq!(pruned, json!({"id": "x"}));
    }

    #[test]
    fn keeps_zero_and_false() {
        let pruned = prune(json!({"progress": 0, "archived": false, "nested": {"n": 0.0}}));
        assert_eq!(pruned, json!({"progress": 0, "archived": false, "nested": {"n": 0.0}}));
    }

    #[test]
    fn whitespace_strings_removed_but_others_kept_verbatim() {
        let pruned = prune(json!({"a": "   ", "b": "\n\t", "c": "  padded  "}));
        assert_eq!(pruned, json!({"c": "  padded  "}));
    }

    #[test]
    fn nested_empties_collapse() {
        let pruned = prune(json!({
            "owner": {"id": null, "name": ""},
            "labels": [[], {}, null, " "],
            "keep": [{"x": 1}, {"y": null}]
        }));
        assert_eq!(pruned, json!({"keep": [{"x": 1}]}));
    }

    #[test]
    fn top_level_never_disappears() {
        assert_eq!(prune(json!({})), json!({}));
        assert_eq!(prune(json!({"a": null})), json!({}));
        assert_eq!(prune(Json::Null), json!({}));
        assert_eq!(prune(json!([null, ""])), json!({}));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(prune(json!(42)), json!(42));
        assert_eq!(prune(json!(false)), json!(false));
        assert_eq!(prune(json!("hi")), json!("hi"));
    }

    fn arb_json() -> impl Strategy<Value = Json> {
        let leaf = prop_oneof![
            Just(Json::Null),
            any::<bool>().prop_map(Json::Bool),
            (-3i64..3).prop_map(Json::from),
            "[ a-c]{0,3}".prop_map(Json::String),
        ];
        leaf.prop_recursive(4, 48, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
                prop::collection::btree_map("[a-d]{1,2}", inner, 0..4)
                    .prop_map(|m| Json::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prune_is_idempotent(value in arb_json()) {
            let once = prune(value);
            let twice = prune(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prune_keeps_falsy_scalars_at_any_depth(value in arb_json(), depth in 0usize..4) {
            let mut wrapped = json!({"zero": 0, "no": false, "noise": value});
            for _ in 0..depth {
                wrapped = json!({"inner": [wrapped]});
            }

            let mut pruned = prune(wrapped);
            for _ in 0..depth {
                pruned = pruned["inner"][0].clone();
            }
            prop_assert_eq!(&pruned["zero"], &json!(0));
            prop_assert_eq!(&pruned["no"], &json!(false));
        }
    }
}
