// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable tree output.
//!
//! [`dump_tree`] writes one line per node to a [`Write`](std::io::Write)
//! destination, indented by depth. Struct fields print in name order and
//! array slots in index order, so two observably identical trees produce
//! byte-identical dumps.

use std::io::{self, Write};

use accretion_core::{Node, UniformTree};

/// Writes a one-line-per-node dump of the tree to the given destination.
///
/// Array slot lines use `[index]` labels; gaps in a sparse array simply
/// produce no line, so a dump of `size=3` with two slot lines shows the gap.
pub fn dump_tree<W: Write>(tree: &UniformTree, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "uniform tree `{}`", tree.label())?;
    for (name, node) in tree.root().iter() {
        dump_node(name, node, 1, writer)?;
    }
    Ok(())
}

fn dump_node<W: Write>(label: &str, node: &Node, depth: usize, writer: &mut W) -> io::Result<()> {
    let pad = "  ".repeat(depth);
    match node {
        Node::Struct(s) => {
            writeln!(writer, "{pad}{label}: struct")?;
            for (name, child) in s.iter() {
                dump_node(name, child, depth + 1, writer)?;
            }
        }
        Node::Array(a) => {
            writeln!(
                writer,
                "{pad}{label}: array size={} occupied={}",
                a.size(),
                a.occupied(),
            )?;
            for (index, child) in a.iter() {
                dump_node(&format!("[{index}]"), child, depth + 1, writer)?;
            }
        }
        Node::Leaf(v) => {
            if v.count() > 1 {
                writeln!(writer, "{pad}{label}: {}[{}]", v.kind().label(), v.count())?;
            } else {
                writeln!(writer, "{pad}{label}: {}", v.kind().label())?;
            }
        }
    }
    Ok(())
}
