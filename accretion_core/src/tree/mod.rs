// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The uniform tree: node model, builder, guarded access, and commit.
//!
//! A reflected program is a tree of three node kinds:
//!
//! - [`StructNode`] — a named, unindexed grouping, mirroring a shader struct.
//! - [`ArrayNode`] — a sparse, explicitly sized indexed collection, mirroring
//!   a shader array. `size` is always one past the greatest inserted index;
//!   gaps are preserved and never backfilled.
//! - Leaf — a [`UniformValue`](crate::value::UniformValue) holding one
//!   uploadable payload.
//!
//! [`UniformTree`] owns the root struct and is the guarded handle the
//! application sees: [`slot`](UniformTree::slot) / [`probe`](UniformTree::probe)
//! lookups that miss log a warning and return an absorbing null cursor
//! instead of failing, so application code written against a richer shader
//! variant degrades to no-ops rather than crashing.
//!
//! # Shape identity
//!
//! The builder ([`UniformTree::reflect`]) and the commit pass
//! ([`UniformTree::commit`]) derive each uniform's path from the same name
//! string with the same parser, so the commit walk revisits exactly the shape
//! the builder produced. A disagreement (a node of the wrong kind, a missing
//! array slot) means the device list and the tree are out of sync for that
//! uniform; the commit pass skips it and moves on.

mod build;
mod commit;
mod guard;
mod node;

#[cfg(test)]
pub(crate) mod testprog;

pub use commit::CommitReport;
pub use guard::{Slot, SlotMut};
pub use node::{ArrayNode, Node, StructNode};

use alloc::string::String;

/// A reflected program's uniform tree, wrapped in the access guard.
///
/// Created once per linked program by [`reflect`](Self::reflect), read and
/// written by the application between frames, and pushed to the device by
/// [`commit`](Self::commit). Rebuild after a relink; the tree is only valid
/// for the uniform list it was reflected from.
#[derive(Clone, Debug)]
pub struct UniformTree {
    pub(crate) root: StructNode,
    pub(crate) label: String,
}

impl UniformTree {
    /// The guard's label, used in diagnostics for missed lookups.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The root struct node (read-only; for tooling and tests).
    #[must_use]
    pub const fn root(&self) -> &StructNode {
        &self.root
    }
}
