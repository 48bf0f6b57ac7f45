// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device contract for program backends.
//!
//! Accretion splits device-specific work into *backend* crates. A backend
//! wraps a graphics context plus one linked program object and exposes it
//! through [`UniformProgram`]:
//!
//! - **Enumeration** — [`active_uniform_count`](UniformProgram::active_uniform_count)
//!   and [`active_uniform`](UniformProgram::active_uniform) walk the linked
//!   program's active-uniform list. Both the build and commit passes iterate
//!   this list in declaration order; the list must be stable between the two
//!   for a given link.
//!
//! - **Location lookup** — [`uniform_location`](UniformProgram::uniform_location)
//!   resolves an exact uniform name to a device location handle. Only the
//!   commit pass asks for locations.
//!
//! - **Upload** — One operation per leaf family. Slices cover both the scalar
//!   shape (length 1) and the array shape. Sampler uploads additionally
//!   receive the commit pass's texture-unit marker; the backend decides how
//!   to bind texture objects to units.
//!
//! # Crate boundaries
//!
//! `accretion_core` owns the name parsing, the tree, and the two passes.
//! Backend crates depend on `accretion_core` and provide device glue; shader
//! compilation, linking, and texture lifetime stay entirely on the backend's
//! side of this trait.

use alloc::string::String;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::value::TextureId;

/// One entry of a program's active-uniform list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniformDesc {
    /// Dotted/bracketed uniform name as reported by the device.
    pub name: String,
    /// GL uniform type id (e.g. `GL_FLOAT_VEC3`).
    pub type_id: u32,
    /// Declared element count; 1 for scalars (0 is treated as 1).
    pub count: u32,
}

/// Capability surface of a graphics context plus one linked program.
///
/// Both GL backends and test doubles implement this trait, enabling generic
/// reflect/commit passes over real and mock devices alike.
pub trait UniformProgram {
    /// Device-specific uniform location handle.
    type Location: Clone;

    /// Number of active uniforms in the linked program.
    fn active_uniform_count(&self) -> u32;

    /// Returns the descriptor at `index`, or `None` past the end.
    fn active_uniform(&self, index: u32) -> Option<UniformDesc>;

    /// Resolves an exact uniform name to its device location.
    ///
    /// Returns `None` when the device has no location for the name (the
    /// commit pass then skips that uniform).
    fn uniform_location(&self, name: &str) -> Option<Self::Location>;

    /// Uploads a float payload (scalar or array).
    fn set_floats(&mut self, loc: &Self::Location, values: &[f32]);

    /// Uploads a `vec2` payload (scalar or array).
    fn set_vec2s(&mut self, loc: &Self::Location, values: &[Vec2]);

    /// Uploads a `vec3` payload (scalar or array).
    fn set_vec3s(&mut self, loc: &Self::Location, values: &[Vec3]);

    /// Uploads a `vec4` payload (scalar or array).
    fn set_vec4s(&mut self, loc: &Self::Location, values: &[Vec4]);

    /// Uploads a `mat4` payload (scalar or array).
    fn set_mat4s(&mut self, loc: &Self::Location, values: &[Mat4]);

    /// Uploads a sampler payload.
    ///
    /// `unit_marker` is the running texture-unit counter after this uniform's
    /// reservation (shared by all elements of the payload); `textures` holds
    /// the application-bound texture references, one per element.
    fn set_samplers(
        &mut self,
        loc: &Self::Location,
        unit_marker: u32,
        textures: &[Option<TextureId>],
    );
}
