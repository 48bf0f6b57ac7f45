// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree construction from the active-uniform list.
//!
//! The builder enumerates the program's active uniforms once and grows the
//! tree in place, one descriptor at a time:
//!
//! 1. Parse the name into segments.
//! 2. Walk from the root. At the last segment, bind a leaf built by the leaf
//!    factory (first encounter only). At a non-last segment, bind an array
//!    node (segment carries an index) or a struct node (it does not), then
//!    descend — through the named field, or through the indexed array slot,
//!    synthesizing an empty struct placeholder for slots never seen before.
//! 3. Construction only fires on the first encounter of each identifier at
//!    each depth, so re-running the builder over the same descriptor list is
//!    a no-op on an already-correct tree.

use alloc::string::ToString;

use crate::path::parse_path;
use crate::program::{UniformDesc, UniformProgram};
use crate::value::{ReflectError, UniformKind, UniformValue};

use super::UniformTree;
use super::node::{ArrayNode, Node, StructNode};

impl UniformTree {
    /// Builds the uniform tree for a linked program.
    ///
    /// Enumerates every active uniform and grows the tree so that each name's
    /// full path exists, with a factory-built leaf at the terminal segment.
    /// The returned tree is the guarded handle the application keeps for the
    /// program's lifetime; `label` names it in guard diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::UnknownType`] if any active uniform's type id
    /// falls outside the supported family set — an unsupported shader feature
    /// is surfaced, not skipped.
    pub fn reflect<P: UniformProgram>(program: &P, label: &str) -> Result<Self, ReflectError> {
        let mut tree = Self {
            root: StructNode::new(),
            label: label.to_string(),
        };
        for index in 0..program.active_uniform_count() {
            let Some(desc) = program.active_uniform(index) else {
                continue;
            };
            tree.insert_uniform(&desc)?;
        }
        Ok(tree)
    }

    /// Grows the tree so that `desc`'s path exists, binding a leaf at the
    /// terminal segment. Idempotent: an already-present path is left alone.
    pub(crate) fn insert_uniform(&mut self, desc: &UniformDesc) -> Result<(), ReflectError> {
        let kind = UniformKind::from_type_id(desc.type_id).ok_or_else(|| {
            ReflectError::UnknownType {
                name: desc.name.clone(),
                type_id: desc.type_id,
            }
        })?;

        let segs = parse_path(&desc.name);
        let last = segs.len() - 1;
        let mut cur: &mut StructNode = &mut self.root;

        for (i, seg) in segs.iter().enumerate() {
            if i == last {
                if !cur.contains(&seg.name) {
                    let leaf = UniformValue::new(kind, desc.count);
                    cur.fields.insert(seg.name.clone(), Node::Leaf(leaf));
                }
                return Ok(());
            }

            // Non-last segment: bind the container on first encounter, then
            // descend into a struct attachment point.
            let holder = cur;
            let child = match seg.index {
                Some(idx) => {
                    let node = holder
                        .fields
                        .entry(seg.name.clone())
                        .or_insert_with(|| Node::Array(ArrayNode::new()));
                    let Node::Array(arr) = node else {
                        log::warn!(
                            "uniform `{}`: segment `{}` is {} in the tree, expected array; skipping",
                            desc.name,
                            seg.name,
                            node.kind_label(),
                        );
                        return Ok(());
                    };
                    arr.ensure(idx)
                }
                None => holder
                    .fields
                    .entry(seg.name.clone())
                    .or_insert_with(|| Node::Struct(StructNode::new())),
            };

            let Node::Struct(next) = child else {
                log::warn!(
                    "uniform `{}`: segment `{}` is {} in the tree, expected struct; skipping",
                    desc.name,
                    seg.name,
                    child.kind_label(),
                );
                return Ok(());
            };
            cur = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testprog::ListProgram;
    use super::*;

    #[test]
    fn flat_names_build_leaves_at_root() {
        let program = ListProgram::new()
            .with("mvp", UniformKind::Mat4, 1)
            .with("exposure", UniformKind::Float, 1);
        let tree = UniformTree::reflect(&program, "pbr").unwrap();

        assert_eq!(tree.root().len(), 2);
        assert!(matches!(tree.root().get("mvp"), Some(Node::Leaf(_))));
        assert!(matches!(tree.root().get("exposure"), Some(Node::Leaf(_))));
    }

    #[test]
    fn dotted_names_build_nested_structs() {
        let program = ListProgram::new().with("material.diffuse.color", UniformKind::Vec4, 1);
        let tree = UniformTree::reflect(&program, "pbr").unwrap();

        let Some(Node::Struct(material)) = tree.root().get("material") else {
            panic!("material should be a struct");
        };
        let Some(Node::Struct(diffuse)) = material.get("diffuse") else {
            panic!("diffuse should be a struct");
        };
        assert!(matches!(diffuse.get("color"), Some(Node::Leaf(_))));
    }

    #[test]
    fn sparse_indices_grow_size_without_backfill() {
        let program = ListProgram::new()
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("lights[2].color", UniformKind::Vec3, 1);
        let tree = UniformTree::reflect(&program, "lit").unwrap();

        let Some(Node::Array(lights)) = tree.root().get("lights") else {
            panic!("lights should be an array");
        };
        assert_eq!(lights.size(), 3);
        assert_eq!(lights.occupied(), 2);
        assert!(lights.at(1).is_none());
        assert!(matches!(lights.at(0), Some(Node::Struct(_))));
        assert!(matches!(lights.at(2), Some(Node::Struct(_))));
    }

    #[test]
    fn terminal_index_binds_whole_array_leaf() {
        // `samplers[0]` is the device's name for the whole sampler array; the
        // leaf lands under `samplers` with the declared element count.
        let program = ListProgram::new().with("samplers[0]", UniformKind::Sampler2d, 4);
        let tree = UniformTree::reflect(&program, "post").unwrap();

        let Some(Node::Leaf(leaf)) = tree.root().get("samplers") else {
            panic!("samplers should be a leaf");
        };
        assert_eq!(leaf.count(), 4);
    }

    #[test]
    fn reflect_is_idempotent() {
        let program = ListProgram::new()
            .with("mvp", UniformKind::Mat4, 1)
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("lights[2].color", UniformKind::Vec3, 1);

        let once = UniformTree::reflect(&program, "lit").unwrap();
        let mut twice = UniformTree::reflect(&program, "lit").unwrap();
        // Re-inserting the same descriptors mutates nothing.
        for i in 0..program.active_uniform_count() {
            let desc = program.active_uniform(i).unwrap();
            twice.insert_uniform(&desc).unwrap();
        }
        assert_eq!(once.root(), twice.root());
    }

    #[test]
    fn unknown_type_fails_loudly() {
        let program = ListProgram::new().with_raw("weird", 0x8B5B, 1);
        let err = UniformTree::reflect(&program, "bad").unwrap_err();
        assert_eq!(
            err,
            ReflectError::UnknownType {
                name: "weird".to_string(),
                type_id: 0x8B5B,
            }
        );
    }

    #[test]
    fn zero_count_builds_scalar_leaf() {
        let program = ListProgram::new().with_raw("t", UniformKind::Float.type_id(), 0);
        let tree = UniformTree::reflect(&program, "t").unwrap();
        let Some(Node::Leaf(leaf)) = tree.root().get("t") else {
            panic!("t should be a leaf");
        };
        assert_eq!(leaf.count(), 1);
    }

    #[test]
    fn depth_matches_dot_count() {
        let program = ListProgram::new()
            .with("a.b.c.d", UniformKind::Float, 1)
            .with("a.b.e", UniformKind::Float, 1);
        let tree = UniformTree::reflect(&program, "deep").unwrap();

        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 1,
                Node::Struct(s) => 1 + s.iter().map(|(_, n)| depth(n)).max().unwrap_or(0),
                Node::Array(a) => 1 + a.iter().map(|(_, n)| depth(n)).max().unwrap_or(0),
            }
        }
        let max = tree.root().iter().map(|(_, n)| depth(n)).max().unwrap();
        // `a.b.c.d` has three dots: three structs above the leaf.
        assert_eq!(max, 4);
    }
}
