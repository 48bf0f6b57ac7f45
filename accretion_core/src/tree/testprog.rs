// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-crate test double for [`UniformProgram`].
//!
//! A scripted descriptor list with recording uploads, just enough for the
//! tree tests. The `accretion_harness` crate carries the richer, reusable
//! mock for downstream tests and demos.

use alloc::string::ToString;
use alloc::vec::Vec;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::program::{UniformDesc, UniformProgram};
use crate::value::{TextureId, UniformKind};

/// One recorded upload: location, unit marker (samplers only), payload
/// flattened to floats or texture references.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Upload {
    Floats(u32, Vec<f32>),
    Samplers(u32, u32, Vec<Option<TextureId>>),
}

/// Scripted [`UniformProgram`] with upload recording.
#[derive(Debug, Default)]
pub(crate) struct ListProgram {
    descs: Vec<UniformDesc>,
    pub(crate) log: Vec<Upload>,
}

impl ListProgram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor with a known kind.
    pub(crate) fn with(self, name: &str, kind: UniformKind, count: u32) -> Self {
        self.with_raw(name, kind.type_id(), count)
    }

    /// Appends a descriptor with a raw type id (for unknown-type tests).
    pub(crate) fn with_raw(mut self, name: &str, type_id: u32, count: u32) -> Self {
        self.descs.push(UniformDesc {
            name: name.to_string(),
            type_id,
            count,
        });
        self
    }

    fn record_floats(&mut self, loc: &u32, values: &[f32]) {
        self.log.push(Upload::Floats(*loc, values.to_vec()));
    }
}

impl UniformProgram for ListProgram {
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
        self.record_floats(loc, values);
    }

    fn set_vec2s(&mut self, loc: &u32, values: &[Vec2]) {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.record_floats(loc, &flat);
    }

    fn set_vec3s(&mut self, loc: &u32, values: &[Vec3]) {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.record_floats(loc, &flat);
    }

    fn set_vec4s(&mut self, loc: &u32, values: &[Vec4]) {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.record_floats(loc, &flat);
    }

    fn set_mat4s(&mut self, loc: &u32, values: &[Mat4]) {
        let flat: Vec<f32> = values.iter().flat_map(|m| m.to_cols_array()).collect();
        self.record_floats(loc, &flat);
    }

    fn set_samplers(&mut self, loc: &u32, unit_marker: u32, textures: &[Option<TextureId>]) {
        self.log
            .push(Upload::Samplers(*loc, unit_marker, textures.to_vec()));
    }
}
