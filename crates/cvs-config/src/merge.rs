// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON merging functionality

use serde_json::Value as J;

/// Merge `layer` into `base`.
///
/// Objects are merged recursively, scalars and arrays replace the left value,
/// and a null on the right keeps the left value.
pub fn merge_two_json(base: &mut J, layer: J) {
    match (base, layer) {
        (J::Object(a), J::Object(b)) => {
            for (k, v) in b {
                merge_two_json(a.entry(k).or_insert(J::Null), v);
            }
        }
        (a @ J::Array(_), J::Array(b)) => *a = J::Array(b),
        (_, J::Null) => {}
        (a, b) => *a = b,
    }
}

/// Insert a value at a dotted path, creating intermediate objects.
///
/// Host names contain dots, so a segment may be wrapped in double quotes to
/// keep it whole: `http-basic."cvs.example.org".username`.
pub fn insert_dotted(root: &mut J, dotted: &str, v: J) {
    let parts = split_dotted(dotted);
    let Some((last, parents)) = parts.split_last() else {
        return;
    };

    let mut cur = root;
    for p in parents {
        if !cur.is_object() {
            *cur = J::Object(Default::default());
        }
        let J::Object(map) = cur else { unreachable!() };
        cur = map.entry(p.clone()).or_insert_with(|| J::Object(Default::default()));
    }

    match cur {
        J::Object(map) => {
            map.insert(last.clone(), v);
        }
        other => {
            let mut map = serde_json::Map::new();
            map.insert(last.clone(), v);
            *other = J::Object(map);
        }
    }
}

/// Split a dotted key path, honouring double-quoted segments
pub fn split_dotted(dotted: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in dotted.chars() {
        match c {
            '"' => quoted = !quoted,
            '.' if !quoted => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_deep_objects() {
        let mut base = json!({"http-basic": {"a.org": {"username": "a"}}});
        let layer = json!({"http-basic": {"b.org": {"username": "b"}}});

        merge_two_json(&mut base, layer);
        assert_eq!(base["http-basic"]["a.org"]["username"], "a");
        assert_eq!(base["http-basic"]["b.org"]["username"], "b");
    }

    #[test]
    fn test_merge_scalar_replaces_and_null_keeps() {
        let mut base = json!({"cache-credentials": true, "other": 1});
        merge_two_json(&mut base, json!({"cache-credentials": false, "other": null}));

        assert_eq!(base["cache-credentials"], false);
        assert_eq!(base["other"], 1);
    }

    #[test]
    fn test_merge_arrays_replace() {
        let mut base = json!({"arr": [1, 2]});
        merge_two_json(&mut base, json!({"arr": [3]}));
        assert_eq!(base["arr"], json!([3]));
    }

    #[test]
    fn test_insert_dotted_with_quoted_host() {
        let mut root = json!({});
        insert_dotted(
            &mut root,
            r#"http-basic."cvs.example.org".username"#,
            json!("foo"),
        );
        assert_eq!(root["http-basic"]["cvs.example.org"]["username"], "foo");
    }

    #[test]
    fn test_split_dotted() {
        assert_eq!(split_dotted("a.b"), vec!["a", "b"]);
        assert_eq!(split_dotted(r#"a."b.c".d"#), vec!["a", "b.c", "d"]);
        assert_eq!(split_dotted("single"), vec!["single"]);
    }
}
