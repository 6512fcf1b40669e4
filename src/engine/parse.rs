// ABOUTME: Lenient typed accessors over engine JSON documents.
// ABOUTME: Every helper returns None on a missing key or wrong type instead of failing.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub fn as_str(value: &Value) -> Option<&str> {
    value.as_str()
}

pub fn object_field<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

pub fn array_field<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}

pub fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(as_str).map(str::to_string)
}

/// Integer field; floats with no fractional part are accepted too.
pub fn i64_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(|v| {
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        })
    })
}

pub fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

/// String entries of an array field; non-string entries are skipped.
pub fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    array_field(value, key).map(|items| {
        items
            .iter()
            .filter_map(as_str)
            .map(str::to_string)
            .collect()
    })
}

/// String-valued entries of an object field; other values are skipped.
pub fn string_map(value: &Value, key: &str) -> Option<BTreeMap<String, String>> {
    object_field(value, key).map(|map| {
        map.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()
    })
}

/// Strip exactly one leading `/` from an engine container name.
pub fn display_name(name: &str) -> String {
    name.strip_prefix('/').unwrap_or(name).to_string()
}

/// `None` for an empty list, so serialized shapes stay minimal.
pub fn non_empty_vec<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

pub fn non_empty_map<V>(map: BTreeMap<String, V>) -> Option<BTreeMap<String, V>> {
    if map.is_empty() { None } else { Some(map) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_types_are_none() {
        let doc = json!({"Name": 5, "Count": "3", "Flag": "true", "List": {}, "Map": []});
        assert_eq!(str_field(&doc, "Name"), None);
        assert_eq!(i64_field(&doc, "Count"), None);
        assert_eq!(bool_field(&doc, "Flag"), None);
        assert_eq!(string_list(&doc, "List"), None);
        assert_eq!(string_map(&doc, "Map"), None);
    }

    #[test]
    fn missing_keys_are_none() {
        let doc = json!({});
        assert_eq!(str_field(&doc, "Id"), None);
        assert!(object_field(&doc, "State").is_none());
        assert!(array_field(&doc, "Mounts").is_none());
    }

    #[test]
    fn integer_valued_floats_are_accepted() {
        let doc = json!({"Created": 1700000000.0, "Ratio": 1.5});
        assert_eq!(i64_field(&doc, "Created"), Some(1_700_000_000));
        assert_eq!(i64_field(&doc, "Ratio"), None);
    }

    #[test]
    fn string_list_skips_non_strings() {
        let doc = json!({"Env": ["A=1", 2, null, "B=2"]});
        assert_eq!(
            string_list(&doc, "Env"),
            Some(vec!["A=1".to_string(), "B=2".to_string()])
        );
    }

    #[test]
    fn string_map_keeps_string_values_only() {
        let doc = json!({"Labels": {"a": "1", "b": 2, "c": null, "d": "x"}});
        let labels = string_map(&doc, "Labels").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("a").map(String::as_str), Some("1"));
        assert_eq!(labels.get("d").map(String::as_str), Some("x"));
    }

    #[test]
    fn display_name_strips_one_slash() {
        assert_eq!(display_name("/puppy"), "puppy");
        assert_eq!(display_name("//odd"), "/odd");
        assert_eq!(display_name("plain"), "plain");
    }

    #[test]
    fn non_empty_filters_empty_collections() {
        assert_eq!(non_empty_vec(Vec::<u8>::new()), None);
        assert_eq!(non_empty_vec(vec![1]), Some(vec![1]));
        assert_eq!(non_empty_map(BTreeMap::<String, String>::new()), None);
    }
}
