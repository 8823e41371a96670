// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON merging functionality

use serde_json::Value as J;

/// Merge two JSON values with deep object merging
///
/// Objects are merged recursively, scalars and arrays replace the left value.
pub fn merge_two_json(base: &mut J, layer: J) {
    match (base, layer) {
        (J::Object(a), J::Object(b)) => {
            for (k, v) in b {
                merge_two_json(a.entry(k).or_insert(J::Null), v);
            }
        }
        (_, J::Null) => { /* keep left if right is null */ }
        (a, b) => *a = b,
    }
}

/// Insert a value at a dotted path in JSON
pub fn insert_dotted(root: &mut J, dotted: &str, v: J) {
    let mut parts: Vec<&str> = dotted.split('.').collect();
    let Some(final_key) = parts.pop() else {
        return;
    };

    let mut cur = root;
    for p in parts {
        if !cur.is_object() {
            *cur = J::Object(Default::default());
        }
        let J::Object(map) = cur else { unreachable!() };
        cur = map.entry(p).or_insert_with(|| J::Object(Default::default()));
    }

    if let J::Object(map) = cur {
        map.insert(final_key.into(), v);
    } else {
        *cur = serde_json::json!({ final_key: v });
    }
}
