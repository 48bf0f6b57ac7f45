// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The commit pass: pushing every leaf back to the device.
//!
//! Commit enumerates the same active-uniform list the builder consumed and,
//! for each descriptor, re-derives the path and walks the existing tree —
//! creating nothing. Reaching the leaf, it resolves the device location by
//! exact name and invokes the leaf's upload with the location and the running
//! texture-unit marker.
//!
//! # Texture units
//!
//! One counter spans the whole pass. A 2D- or cube-sampler uniform advances
//! it by its element count *before* the post-increment value becomes that
//! uniform's marker, so sampler uniforms in declaration order reserve
//! disjoint contiguous unit ranges. All elements of one uniform share the
//! single marker.
//!
//! # Failure semantics
//!
//! Per-uniform and recoverable, by design: shader variants routinely declare
//! uniforms the application never populated. A kind mismatch, a missing
//! field, a gap where an array slot was expected, or an absent device
//! location each skip that one uniform (counted in the report) and the pass
//! continues.

use crate::path::parse_path;
use crate::program::{UniformDesc, UniformProgram};
use crate::value::UniformKind;

use super::UniformTree;
use super::node::{Node, StructNode};

/// Summary of one commit pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Uniforms whose leaf was uploaded.
    pub committed: u32,
    /// Uniforms skipped over a structural disagreement, a missing slot, an
    /// absent device location, or an undecodable type id.
    pub skipped: u32,
    /// Final value of the texture-unit counter (total units reserved).
    pub sampler_units: u32,
}

impl UniformTree {
    /// Pushes every leaf's current payload to the device.
    ///
    /// Enumerates `program`'s active uniforms in declaration order and
    /// uploads each one's leaf. Skips are per-uniform and never abort the
    /// pass; the returned [`CommitReport`] counts both outcomes. Committing
    /// twice without intervening writes uploads identical payloads.
    pub fn commit<P: UniformProgram>(&self, program: &mut P) -> CommitReport {
        let mut report = CommitReport::default();
        let mut units: u32 = 0;

        for index in 0..program.active_uniform_count() {
            let Some(desc) = program.active_uniform(index) else {
                continue;
            };

            let Some(kind) = UniformKind::from_type_id(desc.type_id) else {
                log::debug!(
                    "commit `{}` ({}): undecodable type id {:#06x}; skipping",
                    desc.name,
                    self.label,
                    desc.type_id,
                );
                report.skipped += 1;
                continue;
            };

            // Reserve the unit block before the marker is taken.
            if kind.reserves_units() {
                units += desc.count.max(1);
            }

            if self.commit_one(program, &desc, kind, units) {
                report.committed += 1;
            } else {
                log::debug!(
                    "commit `{}` ({}): path missing or shape mismatch; skipping",
                    desc.name,
                    self.label,
                );
                report.skipped += 1;
            }
        }

        report.sampler_units = units;
        report
    }

    /// Walks the tree along `desc`'s path and uploads the leaf. Returns
    /// `false` (no upload) on any disagreement with the built shape.
    fn commit_one<P: UniformProgram>(
        &self,
        program: &mut P,
        desc: &UniformDesc,
        kind: UniformKind,
        unit_marker: u32,
    ) -> bool {
        let segs = parse_path(&desc.name);
        let last = segs.len() - 1;
        let mut cur: &StructNode = &self.root;

        for (i, seg) in segs.iter().enumerate() {
            if i == last {
                let Some(Node::Leaf(leaf)) = cur.get(&seg.name) else {
                    return false;
                };
                if leaf.kind() != kind {
                    return false;
                }
                let Some(loc) = program.uniform_location(&desc.name) else {
                    return false;
                };
                leaf.upload(program, &loc, unit_marker);
                return true;
            }

            let next = match (seg.index, cur.get(&seg.name)) {
                (Some(idx), Some(Node::Array(arr))) => arr.at(idx),
                (None, Some(node @ Node::Struct(_))) => Some(node),
                _ => None,
            };
            let Some(Node::Struct(child)) = next else {
                return false;
            };
            cur = child;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use glam::Vec3;

    use super::super::testprog::{ListProgram, Upload};
    use super::*;
    use crate::value::TextureId;

    #[test]
    fn commits_every_reflected_leaf() {
        let mut program = ListProgram::new()
            .with("mvp", UniformKind::Mat4, 1)
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("lights[2].color", UniformKind::Vec3, 1);
        let tree = UniformTree::reflect(&program, "lit").unwrap();

        let report = tree.commit(&mut program);
        assert_eq!(report.committed, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(program.log.len(), 3);
    }

    #[test]
    fn sampler_units_accumulate_in_declaration_order() {
        // Element counts [2, 1, 3] must yield markers 2, 3, 6.
        let mut program = ListProgram::new()
            .with("shadow[0]", UniformKind::Sampler2d, 2)
            .with("env", UniformKind::SamplerCube, 1)
            .with("layers[0]", UniformKind::Sampler2d, 3);
        let tree = UniformTree::reflect(&program, "samplers").unwrap();

        let report = tree.commit(&mut program);
        assert_eq!(report.sampler_units, 6);

        let markers: vec::Vec<u32> = program
            .log
            .iter()
            .map(|u| match u {
                Upload::Samplers(_, marker, _) => *marker,
                Upload::Floats(..) => panic!("expected sampler uploads"),
            })
            .collect();
        assert_eq!(markers, [2, 3, 6]);
    }

    #[test]
    fn sampler_3d_does_not_reserve_units() {
        let mut program = ListProgram::new()
            .with("volume", UniformKind::Sampler3d, 1)
            .with("albedo", UniformKind::Sampler2d, 1);
        let tree = UniformTree::reflect(&program, "vol").unwrap();

        let report = tree.commit(&mut program);
        assert_eq!(report.sampler_units, 1);
        // The 3D sampler uploads with the counter still at zero.
        assert_eq!(
            program.log[0],
            Upload::Samplers(0, 0, vec![None])
        );
        assert_eq!(
            program.log[1],
            Upload::Samplers(1, 1, vec![None])
        );
    }

    #[test]
    fn commit_is_deterministic_without_writes() {
        let mut program = ListProgram::new()
            .with("mvp", UniformKind::Mat4, 1)
            .with("tint", UniformKind::Vec4, 1)
            .with("tex", UniformKind::Sampler2d, 1);
        let mut tree = UniformTree::reflect(&program, "pass").unwrap();
        assert!(tree.slot("tint").set_vec4(glam::Vec4::splat(0.5)));

        let _ = tree.commit(&mut program);
        let first: vec::Vec<Upload> = program.log.drain(..).collect();
        let _ = tree.commit(&mut program);
        assert_eq!(program.log, first);
    }

    #[test]
    fn unreflected_uniform_is_skipped_not_fatal() {
        // Build from a narrower list than the one committed: the device
        // declares `lights[1].color` that the tree never grew a slot for.
        let build_program = ListProgram::new()
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("lights[2].color", UniformKind::Vec3, 1);
        let tree = UniformTree::reflect(&build_program, "lit").unwrap();

        let mut commit_program = ListProgram::new()
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("lights[1].color", UniformKind::Vec3, 1)
            .with("lights[2].color", UniformKind::Vec3, 1);
        let report = tree.commit(&mut commit_program);

        assert_eq!(report.committed, 2);
        assert_eq!(report.skipped, 1);
        // Locations 0 and 2 were written; the gap produced no upload.
        let locs: vec::Vec<u32> = commit_program
            .log
            .iter()
            .map(|u| match u {
                Upload::Floats(loc, _) => *loc,
                Upload::Samplers(loc, _, _) => *loc,
            })
            .collect();
        assert_eq!(locs, [0, 2]);
    }

    #[test]
    fn kind_mismatch_skips_that_uniform() {
        let build_program = ListProgram::new().with("p", UniformKind::Vec3, 1);
        let tree = UniformTree::reflect(&build_program, "m").unwrap();

        // Same name, different family on the committing device.
        let mut commit_program = ListProgram::new().with("p", UniformKind::Vec4, 1);
        let report = tree.commit(&mut commit_program);
        assert_eq!(report.committed, 0);
        assert_eq!(report.skipped, 1);
        assert!(commit_program.log.is_empty());
    }

    #[test]
    fn written_payload_reaches_the_device() {
        let mut program = ListProgram::new()
            .with("lights[0].color", UniformKind::Vec3, 1)
            .with("tex", UniformKind::Sampler2d, 1);
        let mut tree = UniformTree::reflect(&program, "lit").unwrap();

        assert!(
            tree.slot("lights")
                .at(0)
                .field("color")
                .set_vec3(Vec3::new(1.0, 0.5, 0.25))
        );
        assert!(tree.slot("tex").set_texture(Some(TextureId(9))));

        let _ = tree.commit(&mut program);
        assert_eq!(
            program.log[0],
            Upload::Floats(0, vec![1.0, 0.5, 0.25])
        );
        assert_eq!(
            program.log[1],
            Upload::Samplers(1, 1, vec![Some(TextureId(9))])
        );
    }
}
