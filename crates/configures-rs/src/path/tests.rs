//! Tests for JSON and YAML path queries.

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn yaml(text: &str) -> serde_yaml::Value {
    serde_yaml::from_str(text).expect("yaml")
}

#[test]
fn json_dotted_paths_select_nested_values() {
    let doc = json!({"http": {"port": 80, "hosts": ["a", "b"]}});
    assert_eq!(query_json(&doc, "http.port"), Some(json!(80)));
    assert_eq!(query_json(&doc, "http.hosts.1"), Some(json!("b")));
    assert_eq!(query_json(&doc, ""), Some(doc.clone()));
}

#[test]
fn json_missing_paths_are_none() {
    let doc = json!({"http": {"port": 80, "hosts": ["a"]}});
    assert_eq!(query_json(&doc, "http.host"), None);
    assert_eq!(query_json(&doc, "http.hosts.3"), None);
    assert_eq!(query_json(&doc, "http.port.value"), None);
    assert_eq!(query_json(&doc, "http.hosts.x"), None);
}

#[test]
fn json_escaped_dots_match_literal_keys() {
    let doc = json!({"a.b": 1, "a": {"b": 2}, "#": 3});
    assert_eq!(query_json(&doc, r"a\.b"), Some(json!(1)));
    assert_eq!(query_json(&doc, "a.b"), Some(json!(2)));
    assert_eq!(query_json(&doc, r"\#"), Some(json!(3)));
}

#[test]
fn json_hash_counts_and_fans_out() {
    let doc = json!({"servers": [{"host": "a"}, {"port": 1}, {"host": "c"}]});
    assert_eq!(query_json(&doc, "servers.#"), Some(json!(3)));
    assert_eq!(query_json(&doc, "servers.#.host"), Some(json!(["a", "c"])));
    assert_eq!(query_json(&doc, "servers.0.#"), None);
}

#[test]
fn yaml_paths_select_children_and_indexes() {
    let doc = yaml("http:\n  port: 80\n  hosts: [a, b]\n'odd key': 1\n");
    assert_eq!(query_yaml(&doc, "$.http.port"), Some(yaml("80")));
    assert_eq!(query_yaml(&doc, "$.http.hosts[1]"), Some(yaml("b")));
    assert_eq!(query_yaml(&doc, "$.'odd key'"), Some(yaml("1")));
    assert_eq!(query_yaml(&doc, "$['http'].port"), Some(yaml("80")));
    assert_eq!(query_yaml(&doc, "$"), Some(doc.clone()));
}

#[test]
fn yaml_wildcards_and_recursive_descent() {
    let doc = yaml("servers:\n  - host: a\n  - host: b\nnested:\n  deep:\n    port: 9\n");
    assert_eq!(query_yaml(&doc, "$.servers[*].host"), Some(yaml("[a, b]")));
    assert_eq!(query_yaml(&doc, "$..port"), Some(yaml("9")));
    assert_eq!(query_yaml(&doc, "$..missing"), None);
}

#[test]
fn yaml_malformed_paths_match_nothing() {
    let doc = yaml("a: 1\n");
    for path in ["a", "", "$.", "$[x]", "$[0", "$.'a"] {
        assert_eq!(query_yaml(&doc, path), None, "{path}");
    }
}
