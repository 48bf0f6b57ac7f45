// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable mock program and upload recording for tests and demos.
//!
//! [`MockProgram`] is a scriptable [`UniformProgram`] double: descriptors are
//! declared with [`with_uniform`](MockProgram::with_uniform) in the order a
//! device would enumerate them, locations are handed out per name, and every
//! upload is recorded as an [`UploadRecord`] in call order. Tests reflect and
//! commit against it, then assert on the exact `(location, payload, unit)`
//! sequence a real device would have seen.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use glam::{Mat4, Vec2, Vec3, Vec4};

use accretion_core::{TextureId, UniformDesc, UniformKind, UniformProgram};

/// A recorded upload payload, flattened the way a GL backend would flatten it.
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadLog {
    /// Numeric payload as a flat float slice (vectors and matrices are
    /// column-major flattened).
    Floats(Vec<f32>),
    /// Sampler payload: the bound texture references.
    Textures(Vec<Option<TextureId>>),
}

/// One recorded upload call.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRecord {
    /// The location handle the upload targeted.
    pub location: u32,
    /// The texture-unit marker, for sampler uploads only.
    pub unit: Option<u32>,
    /// The uploaded payload.
    pub payload: PayloadLog,
}

/// Scriptable [`UniformProgram`] double with upload recording.
///
/// Locations are the descriptor's position in declaration order; a name that
/// matches no scripted descriptor has no location, which exercises the commit
/// pass's skip path.
#[derive(Clone, Debug, Default)]
pub struct MockProgram {
    descs: Vec<UniformDesc>,
    uploads: Vec<UploadRecord>,
}

impl MockProgram {
    /// Creates an empty mock with no active uniforms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts one active uniform of a known family.
    #[must_use]
    pub fn with_uniform(self, name: &str, kind: UniformKind, count: u32) -> Self {
        self.with_type_id(name, kind.type_id(), count)
    }

    /// Scripts one active uniform with a raw GL type id (for unknown-type
    /// scenarios).
    #[must_use]
    pub fn with_type_id(mut self, name: &str, type_id: u32, count: u32) -> Self {
        self.descs.push(UniformDesc {
            name: name.to_string(),
            type_id,
            count,
        });
        self
    }

    /// The recorded uploads, in call order.
    #[must_use]
    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    /// Drains and returns the recorded uploads, leaving the log empty.
    pub fn take_uploads(&mut self) -> Vec<UploadRecord> {
        core::mem::take(&mut self.uploads)
    }

    /// The scripted name for a location handle (for diagnostics in tests).
    #[must_use]
    pub fn name_of(&self, location: u32) -> Option<&str> {
        self.descs.get(location as usize).map(|d| d.name.as_str())
    }

    fn record(&mut self, location: u32, unit: Option<u32>, payload: PayloadLog) {
        self.uploads.push(UploadRecord {
            location,
            unit,
            payload,
        });
    }

    fn record_floats(&mut self, location: u32, flat: Vec<f32>) {
        self.record(location, None, PayloadLog::Floats(flat));
    }
}

impl UniformProgram for MockProgram {
    type Location = u32;

    fn active_uniform_count(&self) -> u32 {
        self.descs.len() as u32
    }

    fn active_uniform(&self, index: u32) -> Option<UniformDesc> {
        self.descs.get(index as usize).cloned()
    }

    fn uniform_location(&self, name: &str) -> Option<u32> {
        self.descs
            .iter()
            .position(|d| d.name == name)
            .map(|i| i as u32)
    }

    fn set_floats(&mut self, loc: &u32, values: &[f32]) {
        self.record_floats(*loc, values.to_vec());
    }

    fn set_vec2s(&mut self, loc: &u32, values: &[Vec2]) {
        self.record_floats(*loc, values.iter().flat_map(Vec2::to_array).collect());
    }

    fn set_vec3s(&mut self, loc: &u32, values: &[Vec3]) {
        self.record_floats(*loc, values.iter().flat_map(Vec3::to_array).collect());
    }

    fn set_vec4s(&mut self, loc: &u32, values: &[Vec4]) {
        self.record_floats(*loc, values.iter().flat_map(Vec4::to_array).collect());
    }

    fn set_mat4s(&mut self, loc: &u32, values: &[Mat4]) {
        self.record_floats(*loc, values.iter().flat_map(Mat4::to_cols_array).collect());
    }

    fn set_samplers(&mut self, loc: &u32, unit_marker: u32, textures: &[Option<TextureId>]) {
        self.record(
            *loc,
            Some(unit_marker),
            PayloadLog::Textures(textures.to_vec()),
        );
    }
}

/// Convenience: the scripted descriptor names in declaration order.
#[must_use]
pub fn declared_names(program: &MockProgram) -> Vec<String> {
    (0..program.active_uniform_count())
        .filter_map(|i| program.active_uniform(i))
        .map(|d| d.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use accretion_core::UniformTree;

    use super::*;

    #[test]
    fn locations_follow_declaration_order() {
        let program = MockProgram::new()
            .with_uniform("a", UniformKind::Float, 1)
            .with_uniform("b.c", UniformKind::Vec2, 1);
        assert_eq!(program.uniform_location("a"), Some(0));
        assert_eq!(program.uniform_location("b.c"), Some(1));
        assert_eq!(program.uniform_location("missing"), None);
        assert_eq!(program.name_of(1), Some("b.c"));
    }

    #[test]
    fn uploads_record_in_call_order() {
        let mut program = MockProgram::new()
            .with_uniform("x", UniformKind::Float, 1)
            .with_uniform("t", UniformKind::Sampler2d, 1);
        let tree = UniformTree::reflect(&program, "rec").unwrap();
        let report = tree.commit(&mut program);

        assert_eq!(report.committed, 2);
        assert_eq!(
            program.uploads(),
            [
                UploadRecord {
                    location: 0,
                    unit: None,
                    payload: PayloadLog::Floats(vec![0.0]),
                },
                UploadRecord {
                    location: 1,
                    unit: Some(1),
                    payload: PayloadLog::Textures(vec![None]),
                },
            ]
        );
    }

    #[test]
    fn take_uploads_drains_the_log() {
        let mut program = MockProgram::new().with_uniform("x", UniformKind::Float, 1);
        let tree = UniformTree::reflect(&program, "drain").unwrap();
        let _ = tree.commit(&mut program);

        assert_eq!(program.take_uploads().len(), 1);
        assert!(program.uploads().is_empty());
    }
}
