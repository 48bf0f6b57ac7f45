// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf kinds, payloads, and the leaf factory.
//!
//! Every terminal node of a reflected tree is a [`UniformValue`]: a payload
//! of one of the supported GL uniform families, either a single element or a
//! contiguous array of them. The shape (family and element count) is fixed
//! when the builder constructs the leaf from a device descriptor; only the
//! payload contents are mutable afterwards.
//!
//! The family set is closed: float, 2/3/4-component float vector, 4×4 float
//! matrix, and 2D/cube/3D samplers. A type id outside this set is surfaced
//! as [`ReflectError::UnknownType`] — an unsupported shader feature must fail
//! loudly rather than be skipped.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::program::UniformProgram;

/// An opaque reference to a texture object.
///
/// Textures are created and managed externally (by the rendering backend); a
/// sampler leaf only carries the reference that the backend resolves at
/// upload time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl fmt::Debug for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureId({})", self.0)
    }
}

/// The supported uniform families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    /// `float`.
    Float,
    /// `vec2`.
    Vec2,
    /// `vec3`.
    Vec3,
    /// `vec4`.
    Vec4,
    /// `mat4`.
    Mat4,
    /// `sampler2D`.
    Sampler2d,
    /// `samplerCube`.
    SamplerCube,
    /// `sampler3D`.
    Sampler3d,
}

impl UniformKind {
    /// Decodes a GL uniform type id. Returns `None` for ids outside the
    /// supported family set.
    #[must_use]
    pub const fn from_type_id(type_id: u32) -> Option<Self> {
        match type_id {
            0x1406 => Some(Self::Float),
            0x8B50 => Some(Self::Vec2),
            0x8B51 => Some(Self::Vec3),
            0x8B52 => Some(Self::Vec4),
            0x8B5C => Some(Self::Mat4),
            0x8B5E => Some(Self::Sampler2d),
            0x8B5F => Some(Self::Sampler3d),
            0x8B60 => Some(Self::SamplerCube),
            _ => None,
        }
    }

    /// Returns the GL type id for this family.
    #[must_use]
    pub const fn type_id(self) -> u32 {
        match self {
            Self::Float => 0x1406,
            Self::Vec2 => 0x8B50,
            Self::Vec3 => 0x8B51,
            Self::Vec4 => 0x8B52,
            Self::Mat4 => 0x8B5C,
            Self::Sampler2d => 0x8B5E,
            Self::Sampler3d => 0x8B5F,
            Self::SamplerCube => 0x8B60,
        }
    }

    /// Whether this family carries a texture reference.
    #[must_use]
    pub const fn is_sampler(self) -> bool {
        matches!(self, Self::Sampler2d | Self::SamplerCube | Self::Sampler3d)
    }

    /// Whether this family advances the texture-unit counter during a commit
    /// pass. Only the 2D and cube families reserve units.
    #[must_use]
    pub const fn reserves_units(self) -> bool {
        matches!(self, Self::Sampler2d | Self::SamplerCube)
    }

    /// Short lowercase label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat4 => "mat4",
            Self::Sampler2d => "sampler2D",
            Self::SamplerCube => "samplerCube",
            Self::Sampler3d => "sampler3D",
        }
    }
}

/// Error surfaced while reflecting a program's uniforms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReflectError {
    /// An active uniform's type id is outside the supported family set.
    UnknownType {
        /// Name of the offending uniform.
        name: String,
        /// The unrecognized GL type id.
        type_id: u32,
    },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { name, type_id } => {
                write!(f, "uniform `{name}` has unsupported type id {type_id:#06x}")
            }
        }
    }
}

impl core::error::Error for ReflectError {}

/// Payload storage, one vector per family. Element count 1 is the scalar
/// shape; larger counts are the contiguous array shape.
#[derive(Clone, Debug, PartialEq)]
enum Payload {
    Floats(Vec<f32>),
    Vec2s(Vec<Vec2>),
    Vec3s(Vec<Vec3>),
    Vec4s(Vec<Vec4>),
    Mat4s(Vec<Mat4>),
    Textures(Vec<Option<TextureId>>),
}

/// A leaf value: one uniform's payload with shape fixed at construction.
///
/// Constructed by the builder (the leaf factory) from a device descriptor's
/// type id and element count. Numeric payloads zero-initialize; matrices
/// start as identity; samplers start unbound. The element count never changes
/// after construction, matching the declared shape on the device.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformValue {
    kind: UniformKind,
    payload: Payload,
}

impl UniformValue {
    /// The leaf factory: allocates a payload of `count` elements for the
    /// given family. A count of 0 is treated as 1 (scalar).
    #[must_use]
    pub fn new(kind: UniformKind, count: u32) -> Self {
        let n = count.max(1) as usize;
        let payload = match kind {
            UniformKind::Float => Payload::Floats(vec![0.0; n]),
            UniformKind::Vec2 => Payload::Vec2s(vec![Vec2::ZERO; n]),
            UniformKind::Vec3 => Payload::Vec3s(vec![Vec3::ZERO; n]),
            UniformKind::Vec4 => Payload::Vec4s(vec![Vec4::ZERO; n]),
            UniformKind::Mat4 => Payload::Mat4s(vec![Mat4::IDENTITY; n]),
            UniformKind::Sampler2d | UniformKind::SamplerCube | UniformKind::Sampler3d => {
                Payload::Textures(vec![None; n])
            }
        };
        Self { kind, payload }
    }

    /// The leaf's family.
    #[must_use]
    pub const fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Number of elements in the payload (1 for the scalar shape).
    #[must_use]
    pub fn count(&self) -> u32 {
        let n = match &self.payload {
            Payload::Floats(v) => v.len(),
            Payload::Vec2s(v) => v.len(),
            Payload::Vec3s(v) => v.len(),
            Payload::Vec4s(v) => v.len(),
            Payload::Mat4s(v) => v.len(),
            Payload::Textures(v) => v.len(),
        };
        n as u32
    }

    // -- Read access --

    /// Float payload, if this is a float leaf.
    #[must_use]
    pub fn floats(&self) -> Option<&[f32]> {
        match &self.payload {
            Payload::Floats(v) => Some(v),
            _ => None,
        }
    }

    /// `vec2` payload, if this is a vec2 leaf.
    #[must_use]
    pub fn vec2s(&self) -> Option<&[Vec2]> {
        match &self.payload {
            Payload::Vec2s(v) => Some(v),
            _ => None,
        }
    }

    /// `vec3` payload, if this is a vec3 leaf.
    #[must_use]
    pub fn vec3s(&self) -> Option<&[Vec3]> {
        match &self.payload {
            Payload::Vec3s(v) => Some(v),
            _ => None,
        }
    }

    /// `vec4` payload, if this is a vec4 leaf.
    #[must_use]
    pub fn vec4s(&self) -> Option<&[Vec4]> {
        match &self.payload {
            Payload::Vec4s(v) => Some(v),
            _ => None,
        }
    }

    /// `mat4` payload, if this is a mat4 leaf.
    #[must_use]
    pub fn mat4s(&self) -> Option<&[Mat4]> {
        match &self.payload {
            Payload::Mat4s(v) => Some(v),
            _ => None,
        }
    }

    /// Sampler payload, if this is a sampler leaf.
    #[must_use]
    pub fn textures(&self) -> Option<&[Option<TextureId>]> {
        match &self.payload {
            Payload::Textures(v) => Some(v),
            _ => None,
        }
    }

    // -- Write access --
    //
    // Every setter checks family and element count and reports whether the
    // write happened. Shape never changes; a slice of the wrong length is
    // rejected rather than resized.

    /// Writes a scalar float. Requires a float leaf with count 1.
    pub fn set_float(&mut self, v: f32) -> bool {
        match &mut self.payload {
            Payload::Floats(d) if d.len() == 1 => {
                d[0] = v;
                true
            }
            _ => false,
        }
    }

    /// Writes the full float payload. The slice length must match the count.
    pub fn set_floats(&mut self, v: &[f32]) -> bool {
        match &mut self.payload {
            Payload::Floats(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    /// Writes a scalar `vec2`. Requires a vec2 leaf with count 1.
    pub fn set_vec2(&mut self, v: Vec2) -> bool {
        match &mut self.payload {
            Payload::Vec2s(d) if d.len() == 1 => {
                d[0] = v;
                true
            }
            _ => false,
        }
    }

    /// Writes the full `vec2` payload. The slice length must match the count.
    pub fn set_vec2s(&mut self, v: &[Vec2]) -> bool {
        match &mut self.payload {
            Payload::Vec2s(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    /// Writes a scalar `vec3`. Requires a vec3 leaf with count 1.
    pub fn set_vec3(&mut self, v: Vec3) -> bool {
        match &mut self.payload {
            Payload::Vec3s(d) if d.len() == 1 => {
                d[0] = v;
                true
            }
            _ => false,
        }
    }

    /// Writes the full `vec3` payload. The slice length must match the count.
    pub fn set_vec3s(&mut self, v: &[Vec3]) -> bool {
        match &mut self.payload {
            Payload::Vec3s(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    /// Writes a scalar `vec4`. Requires a vec4 leaf with count 1.
    pub fn set_vec4(&mut self, v: Vec4) -> bool {
        match &mut self.payload {
            Payload::Vec4s(d) if d.len() == 1 => {
                d[0] = v;
                true
            }
            _ => false,
        }
    }

    /// Writes the full `vec4` payload. The slice length must match the count.
    pub fn set_vec4s(&mut self, v: &[Vec4]) -> bool {
        match &mut self.payload {
            Payload::Vec4s(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    /// Writes a scalar `mat4`. Requires a mat4 leaf with count 1.
    pub fn set_mat4(&mut self, v: Mat4) -> bool {
        match &mut self.payload {
            Payload::Mat4s(d) if d.len() == 1 => {
                d[0] = v;
                true
            }
            _ => false,
        }
    }

    /// Writes the full `mat4` payload. The slice length must match the count.
    pub fn set_mat4s(&mut self, v: &[Mat4]) -> bool {
        match &mut self.payload {
            Payload::Mat4s(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    /// Binds (or unbinds) the texture of a scalar sampler leaf.
    pub fn set_texture(&mut self, tex: Option<TextureId>) -> bool {
        match &mut self.payload {
            Payload::Textures(d) if d.len() == 1 => {
                d[0] = tex;
                true
            }
            _ => false,
        }
    }

    /// Binds the texture at element `index` of a sampler leaf.
    pub fn set_texture_at(&mut self, index: u32, tex: Option<TextureId>) -> bool {
        match &mut self.payload {
            Payload::Textures(d) if (index as usize) < d.len() => {
                d[index as usize] = tex;
                true
            }
            _ => false,
        }
    }

    /// Writes the full sampler payload. The slice length must match the count.
    pub fn set_textures(&mut self, v: &[Option<TextureId>]) -> bool {
        match &mut self.payload {
            Payload::Textures(d) if d.len() == v.len() => {
                d.copy_from_slice(v);
                true
            }
            _ => false,
        }
    }

    // -- Upload --

    /// Pushes the current payload to the device at `loc`.
    ///
    /// `unit_marker` is the commit pass's running texture-unit counter after
    /// this uniform's reservation; non-sampler leaves ignore it.
    pub fn upload<P: UniformProgram>(&self, program: &mut P, loc: &P::Location, unit_marker: u32) {
        match &self.payload {
            Payload::Floats(v) => program.set_floats(loc, v),
            Payload::Vec2s(v) => program.set_vec2s(loc, v),
            Payload::Vec3s(v) => program.set_vec3s(loc, v),
            Payload::Vec4s(v) => program.set_vec4s(loc, v),
            Payload::Mat4s(v) => program.set_mat4s(loc, v),
            Payload::Textures(v) => program.set_samplers(loc, unit_marker, v),
        }
    }
}
