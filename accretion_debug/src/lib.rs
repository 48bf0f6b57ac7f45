// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON shape export for accretion diagnostics.
//!
//! Tooling over a reflected [`UniformTree`](accretion_core::UniformTree):
//!
//! - [`pretty::dump_tree`] — human-readable one-line-per-node output.
//! - [`json::tree_shape`] — the tree's structure as a [`serde_json::Value`],
//!   for snapshotting and external inspection.

pub mod json;
pub mod pretty;
