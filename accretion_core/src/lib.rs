// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform reflection tree for GL shader programs.
//!
//! `accretion_core` turns a linked program's flat active-uniform list — names
//! like `lights[2].color` — into a nested, navigable value tree that
//! application code reads and writes through guarded slots, and that a second
//! pass pushes back to the device in one sweep. It is `no_std` compatible
//! (with `alloc`) and talks to the graphics device only through the
//! [`UniformProgram`](program::UniformProgram) capability trait.
//!
//! # Architecture
//!
//! Two passes share one tree:
//!
//! ```text
//!   UniformProgram (active uniform list)
//!       │
//!       ▼  enumerate once
//!   UniformTree::reflect() ──► guarded tree
//!                                   │
//!       application writes ─────────┤  slot("lights").at(2).field("color")
//!                                   ▼
//!       ▼  enumerate again
//!   UniformTree::commit() ──► uploads + CommitReport
//! ```
//!
//! **[`path`]** — Splits a dotted/bracketed uniform name into
//! [`PathSeg`](path::PathSeg) segments. Both passes derive paths identically,
//! which is what makes the commit walk line up with the built tree.
//!
//! **[`value`]** — [`UniformKind`](value::UniformKind) decodes the closed GL
//! type-id family; [`UniformValue`](value::UniformValue) holds a leaf's
//! payload (scalar or contiguous array) with its shape fixed at construction.
//!
//! **[`tree`]** — The node model ([`Node`](tree::Node) /
//! [`StructNode`](tree::StructNode) / [`ArrayNode`](tree::ArrayNode)), the
//! builder, the guarded slot cursors, and the commit engine.
//!
//! **[`program`]** — The [`UniformProgram`](program::UniformProgram) trait
//! that device backends implement: uniform enumeration, location lookup, and
//! per-family upload operations.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod path;
pub mod program;
pub mod tree;
pub mod value;

pub use program::{UniformDesc, UniformProgram};
pub use tree::{ArrayNode, CommitReport, Node, Slot, SlotMut, StructNode, UniformTree};
pub use value::{ReflectError, TextureId, UniformKind, UniformValue};
