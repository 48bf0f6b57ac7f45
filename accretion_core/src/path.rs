// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform name parsing.
//!
//! Active uniform names arrive from the device as flat dotted/bracketed
//! strings (`"lights[2].color"`, `"mvp"`, `"samplers[0]"`). [`parse_path`]
//! splits one into ordered [`PathSeg`] segments. The build and commit passes
//! both go through this function, so a given name always derives the same
//! path — the invariant the commit walk relies on.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// One segment of a uniform path: a base identifier plus an optional bracket
/// index.
///
/// `"lights[2]"` parses to `{ name: "lights", index: Some(2) }`; `"color"`
/// parses to `{ name: "color", index: None }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSeg {
    /// Base identifier of the segment.
    pub name: String,
    /// Bracket index, if the segment carried one.
    pub index: Option<u32>,
}

/// Splits a raw uniform name into path segments.
///
/// The name is split on `.`; each piece is then split on `[`, with a trailing
/// `]` stripped before the index is parsed. An index that does not parse as a
/// `u32` is dropped (the segment is treated as unindexed) — malformed names
/// are a configuration error upstream of this crate and get no further
/// validation here.
#[must_use]
pub fn parse_path(name: &str) -> Vec<PathSeg> {
    name.split('.')
        .map(|part| match part.split_once('[') {
            Some((base, rest)) => PathSeg {
                name: base.to_string(),
                index: rest.strip_suffix(']').unwrap_or(rest).parse().ok(),
            },
            None => PathSeg {
                name: part.to_string(),
                index: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, index: Option<u32>) -> PathSeg {
        PathSeg {
            name: name.to_string(),
            index,
        }
    }

    #[test]
    fn plain_name_is_one_segment() {
        assert_eq!(parse_path("mvp"), [seg("mvp", None)]);
    }

    #[test]
    fn dotted_name_splits_into_segments() {
        assert_eq!(
            parse_path("material.diffuse.color"),
            [
                seg("material", None),
                seg("diffuse", None),
                seg("color", None)
            ]
        );
    }

    #[test]
    fn bracket_index_is_parsed() {
        assert_eq!(
            parse_path("lights[2].color"),
            [seg("lights", Some(2)), seg("color", None)]
        );
    }

    #[test]
    fn terminal_index_is_kept_on_segment() {
        assert_eq!(parse_path("samplers[0]"), [seg("samplers", Some(0))]);
    }

    #[test]
    fn unparseable_index_is_dropped() {
        assert_eq!(parse_path("a[x].b"), [seg("a", None), seg("b", None)]);
    }
}
