// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guarded slot access.
//!
//! Applications are routinely written against a richer shader interface than
//! the variant currently linked (optional material slots, debug-only
//! uniforms). Reads of names the reflection never produced must degrade, not
//! crash: a root lookup that misses logs one warning naming the tree's label
//! and hands back an *absent* cursor, and every further [`field`](Slot::field)
//! / [`at`](Slot::at) / setter on an absent cursor is an absorbing no-op that
//! yields absent again.
//!
//! Guarding is shallow: only the root lookup warns. Chained misses below the
//! root absorb silently (at debug level), matching the one-guard-at-the-root
//! shape of the tree.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::value::{TextureId, UniformValue};

use super::UniformTree;
use super::node::Node;

impl UniformTree {
    /// Guarded mutable root lookup.
    ///
    /// A hit returns a live cursor; a miss logs a warning with the guard's
    /// label and returns the absent cursor.
    pub fn slot(&mut self, name: &str) -> SlotMut<'_> {
        match self.root.get_mut(name) {
            Some(node) => SlotMut(Some(node)),
            None => {
                log::warn!("uniform tree `{}`: no uniform `{name}`", self.label);
                SlotMut(None)
            }
        }
    }

    /// Guarded read-only root lookup; same miss behavior as [`slot`](Self::slot).
    pub fn probe(&self, name: &str) -> Slot<'_> {
        match self.root.get(name) {
            Some(node) => Slot(Some(node)),
            None => {
                log::warn!("uniform tree `{}`: no uniform `{name}`", self.label);
                Slot(None)
            }
        }
    }

    /// Unguarded root lookup: no logging, plain optional result.
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<&Node> {
        self.root.get(name)
    }
}

/// Read-only cursor over a tree node, or the absorbing absent sentinel.
#[derive(Clone, Copy, Debug)]
pub struct Slot<'a>(Option<&'a Node>);

impl<'a> Slot<'a> {
    /// Whether this cursor is the absent sentinel.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Descends into a struct field; absent or non-struct absorbs.
    #[must_use]
    pub fn field(self, name: &str) -> Self {
        match self.0 {
            Some(Node::Struct(s)) => Slot(s.get(name)),
            _ => Slot(None),
        }
    }

    /// Descends into an array slot; absent, gaps, and non-arrays absorb.
    #[must_use]
    pub fn at(self, index: u32) -> Self {
        match self.0 {
            Some(Node::Array(a)) => Slot(a.at(index)),
            _ => Slot(None),
        }
    }

    /// The array size at this cursor, if it is an array node.
    #[must_use]
    pub fn array_size(&self) -> Option<u32> {
        match self.0 {
            Some(Node::Array(a)) => Some(a.size()),
            _ => None,
        }
    }

    /// The leaf value at this cursor, if it is a leaf.
    #[must_use]
    pub fn leaf(self) -> Option<&'a UniformValue> {
        match self.0 {
            Some(Node::Leaf(v)) => Some(v),
            _ => None,
        }
    }
}

/// Mutable cursor over a tree node, or the absorbing absent sentinel.
///
/// Setters report whether the write landed; on the absent sentinel, on a
/// non-leaf node, or on a leaf of the wrong shape they are no-ops returning
/// `false` (with a debug-level note), never a panic.
#[derive(Debug)]
pub struct SlotMut<'a>(Option<&'a mut Node>);

impl<'a> SlotMut<'a> {
    /// Whether this cursor is the absent sentinel.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Descends into a struct field; absent or non-struct absorbs.
    #[must_use]
    pub fn field(self, name: &str) -> Self {
        match self.0 {
            Some(Node::Struct(s)) => SlotMut(s.get_mut(name)),
            _ => SlotMut(None),
        }
    }

    /// Descends into an array slot; absent, gaps, and non-arrays absorb.
    #[must_use]
    pub fn at(self, index: u32) -> Self {
        match self.0 {
            Some(Node::Array(a)) => SlotMut(a.at_mut(index)),
            _ => SlotMut(None),
        }
    }

    fn write(self, op: impl FnOnce(&mut UniformValue) -> bool) -> bool {
        match self.0 {
            Some(Node::Leaf(v)) => {
                let wrote = op(v);
                if !wrote {
                    log::debug!("uniform write rejected: shape mismatch on {} leaf", v.kind().label());
                }
                wrote
            }
            _ => false,
        }
    }

    /// Writes a scalar float leaf.
    pub fn set_float(self, v: f32) -> bool {
        self.write(|leaf| leaf.set_float(v))
    }

    /// Writes a float array leaf (length must match).
    pub fn set_floats(self, v: &[f32]) -> bool {
        self.write(|leaf| leaf.set_floats(v))
    }

    /// Writes a scalar `vec2` leaf.
    pub fn set_vec2(self, v: Vec2) -> bool {
        self.write(|leaf| leaf.set_vec2(v))
    }

    /// Writes a `vec2` array leaf (length must match).
    pub fn set_vec2s(self, v: &[Vec2]) -> bool {
        self.write(|leaf| leaf.set_vec2s(v))
    }

    /// Writes a scalar `vec3` leaf.
    pub fn set_vec3(self, v: Vec3) -> bool {
        self.write(|leaf| leaf.set_vec3(v))
    }

    /// Writes a `vec3` array leaf (length must match).
    pub fn set_vec3s(self, v: &[Vec3]) -> bool {
        self.write(|leaf| leaf.set_vec3s(v))
    }

    /// Writes a scalar `vec4` leaf.
    pub fn set_vec4(self, v: Vec4) -> bool {
        self.write(|leaf| leaf.set_vec4(v))
    }

    /// Writes a `vec4` array leaf (length must match).
    pub fn set_vec4s(self, v: &[Vec4]) -> bool {
        self.write(|leaf| leaf.set_vec4s(v))
    }

    /// Writes a scalar `mat4` leaf.
    pub fn set_mat4(self, v: Mat4) -> bool {
        self.write(|leaf| leaf.set_mat4(v))
    }

    /// Writes a `mat4` array leaf (length must match).
    pub fn set_mat4s(self, v: &[Mat4]) -> bool {
        self.write(|leaf| leaf.set_mat4s(v))
    }

    /// Binds the texture of a scalar sampler leaf.
    pub fn set_texture(self, tex: Option<TextureId>) -> bool {
        self.write(|leaf| leaf.set_texture(tex))
    }

    /// Binds the texture at one element of a sampler leaf.
    pub fn set_texture_at(self, index: u32, tex: Option<TextureId>) -> bool {
        self.write(|leaf| leaf.set_texture_at(index, tex))
    }

    /// Writes the full sampler payload (length must match).
    pub fn set_textures(self, v: &[Option<TextureId>]) -> bool {
        self.write(|leaf| leaf.set_textures(v))
    }

    /// Downgrades to a read-only cursor.
    #[must_use]
    pub fn as_slot(&'a self) -> Slot<'a> {
        match &self.0 {
            Some(node) => Slot(Some(node)),
            None => Slot(None),
        }
    }
}
