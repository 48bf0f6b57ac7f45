// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree node kinds.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::value::UniformValue;

/// A node in a uniform tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Named grouping of child nodes.
    Struct(StructNode),
    /// Sparse indexed collection of child nodes.
    Array(ArrayNode),
    /// Terminal uploadable value.
    Leaf(UniformValue),
}

impl Node {
    /// Short label for diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Array(_) => "array",
            Self::Leaf(_) => "leaf",
        }
    }
}

/// A named, unindexed grouping of child nodes.
///
/// Fields are bound during the build pass and form a closed world afterwards:
/// lookups of unbound names are answered by the guard with a warning and an
/// absent slot, never by growing the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructNode {
    pub(crate) fields: BTreeMap<String, Node>,
}

impl StructNode {
    /// Creates an empty struct node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.fields.get(name)
    }

    /// Looks up a field by name, mutably.
    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.fields.get_mut(name)
    }

    /// Whether a field with this name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates bound fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A sparse indexed collection of child nodes.
///
/// `size` is maintained as one past the greatest index ever inserted,
/// independent of how many slots are actually present. Gaps stay gaps:
/// inserting index 2 into an empty array yields size 3 with slots 0 and 1
/// absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayNode {
    pub(crate) slots: BTreeMap<u32, Node>,
    pub(crate) size: u32,
}

impl ArrayNode {
    /// Creates an empty array node of size 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One past the greatest inserted index.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of slots actually present.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.len()
    }

    /// Looks up the slot at `index`; absent slots (gaps) return `None`.
    #[must_use]
    pub fn at(&self, index: u32) -> Option<&Node> {
        self.slots.get(&index)
    }

    /// Looks up the slot at `index`, mutably.
    #[must_use]
    pub fn at_mut(&mut self, index: u32) -> Option<&mut Node> {
        self.slots.get_mut(&index)
    }

    /// Iterates present slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Node)> {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    /// Records `index` as present, growing `size` as needed, and returns the
    /// slot — synthesizing an empty struct placeholder if the slot was a gap.
    pub(crate) fn ensure(&mut self, index: u32) -> &mut Node {
        self.size = self.size.max(index + 1);
        self.slots
            .entry(index)
            .or_insert_with(|| Node::Struct(StructNode::new()))
    }
}
