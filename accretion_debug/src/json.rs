// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON shape export.
//!
//! [`tree_shape`] renders a tree's structure (not its payloads) as a
//! [`serde_json::Value`], suitable for snapshot tests and for feeding
//! external inspectors. Sparse array gaps appear as absent slot keys under
//! an explicit `size`.

use serde_json::{Map, Value, json};

use accretion_core::{Node, UniformTree};

/// The tree's structure as a JSON value.
///
/// Leaves carry their family label and element count; arrays carry their
/// declared size plus a map of occupied slots keyed by index.
#[must_use]
pub fn tree_shape(tree: &UniformTree) -> Value {
    let mut root = Map::new();
    for (name, node) in tree.root().iter() {
        root.insert(name.to_string(), node_shape(node));
    }
    json!({
        "label": tree.label(),
        "root": Value::Object(root),
    })
}

fn node_shape(node: &Node) -> Value {
    match node {
        Node::Struct(s) => {
            let mut fields = Map::new();
            for (name, child) in s.iter() {
                fields.insert(name.to_string(), node_shape(child));
            }
            json!({ "struct": Value::Object(fields) })
        }
        Node::Array(a) => {
            let mut slots = Map::new();
            for (index, child) in a.iter() {
                slots.insert(index.to_string(), node_shape(child));
            }
            json!({
                "array": {
                    "size": a.size(),
                    "slots": Value::Object(slots),
                }
            })
        }
        Node::Leaf(v) => json!({
            "kind": v.kind().label(),
            "count": v.count(),
        }),
    }
}
