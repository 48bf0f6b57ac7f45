// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenGL backend for accretion uniform trees, via [`glow`].
//!
//! [`GlowProgram`] wraps a linked GL program and implements
//! [`UniformProgram`], so a [`UniformTree`](accretion_core::UniformTree) can
//! be reflected from and committed to a real device:
//!
//! - enumeration goes through `glGetActiveUniform`, yielding the driver's
//!   name strings (arrays come back as `name[0]`) and raw type ids;
//! - numeric uploads go through the `glUniform*fv` slice entry points;
//! - sampler uploads write the unit marker with `glUniform1iv` and bind the
//!   referenced textures to that unit.
//!
//! Texture references are opaque [`TextureId`]s on the core side; the backend
//! keeps the registry that maps them to GL texture objects, filled by
//! [`GlowProgram::register_texture`].
//!
//! [`link_program`] is a convenience for demos and tests that compiles and
//! links a vertex/fragment pair.

#![expect(
    unsafe_code,
    reason = "every glow entry point is unsafe; uploads and enumeration go through the raw GL API"
)]

use std::collections::HashMap;
use std::fmt;

use bytemuck::cast_slice;
use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use accretion_core::{TextureId, UniformDesc, UniformProgram};

type GlProgram = <glow::Context as HasContext>::Program;
type GlShader = <glow::Context as HasContext>::Shader;
type GlLocation = <glow::Context as HasContext>::UniformLocation;
type GlTexture = <glow::Context as HasContext>::Texture;

/// Error from compiling or linking a shader program.
#[derive(Clone, Debug)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program object.
    Allocate(String),
    /// A stage failed to compile; carries the driver's info log.
    Compile {
        /// The GL stage enum (`glow::VERTEX_SHADER` or `glow::FRAGMENT_SHADER`).
        stage: u32,
        /// The driver's info log.
        log: String,
    },
    /// The program failed to link; carries the driver's info log.
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocate(what) => write!(f, "GL object allocation failed: {what}"),
            Self::Compile { stage, log } => {
                let name = match *stage {
                    glow::VERTEX_SHADER => "vertex",
                    glow::FRAGMENT_SHADER => "fragment",
                    _ => "shader",
                };
                write!(f, "{name} stage failed to compile: {log}")
            }
            Self::Link(log) => write!(f, "program failed to link: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compiles a vertex/fragment pair and links it into a program.
///
/// On any failure every object created so far is deleted before the error is
/// returned, so a failed link leaks nothing.
pub fn link_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<GlProgram, ShaderError> {
    let stages = [
        (glow::VERTEX_SHADER, vertex_src),
        (glow::FRAGMENT_SHADER, fragment_src),
    ];

    unsafe {
        let program = gl.create_program().map_err(ShaderError::Allocate)?;
        let mut compiled: Vec<GlShader> = Vec::new();

        let cleanup = |gl: &glow::Context, program: GlProgram, shaders: &[GlShader]| {
            for &shader in shaders {
                gl.delete_shader(shader);
            }
            gl.delete_program(program);
        };

        for (stage, source) in stages {
            let shader = match gl.create_shader(stage) {
                Ok(shader) => shader,
                Err(e) => {
                    cleanup(gl, program, &compiled);
                    return Err(ShaderError::Allocate(e));
                }
            };
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                cleanup(gl, program, &compiled);
                return Err(ShaderError::Compile { stage, log });
            }
            gl.attach_shader(program, shader);
            compiled.push(shader);
        }

        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            cleanup(gl, program, &compiled);
            return Err(ShaderError::Link(log));
        }

        for shader in compiled {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        Ok(program)
    }
}

/// Which GL target a registered texture binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureTarget {
    /// `GL_TEXTURE_2D`.
    D2,
    /// `GL_TEXTURE_3D`.
    D3,
    /// `GL_TEXTURE_CUBE_MAP`.
    Cube,
}

impl TextureTarget {
    const fn gl_enum(self) -> u32 {
        match self {
            Self::D2 => glow::TEXTURE_2D,
            Self::D3 => glow::TEXTURE_3D,
            Self::Cube => glow::TEXTURE_CUBE_MAP,
        }
    }
}

/// A linked GL program driven through [`UniformProgram`].
///
/// Borrows the context; the caller owns the program object and deletes it.
/// The wrapped program must be the one currently in use when uploads happen —
/// [`bind`](Self::bind) makes it current.
pub struct GlowProgram<'gl> {
    gl: &'gl glow::Context,
    program: GlProgram,
    textures: HashMap<TextureId, (TextureTarget, GlTexture)>,
}

impl fmt::Debug for GlowProgram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowProgram")
            .field("program", &self.program)
            .field("textures", &self.textures.len())
            .finish_non_exhaustive()
    }
}

impl<'gl> GlowProgram<'gl> {
    /// Wraps an already linked program.
    #[must_use]
    pub fn new(gl: &'gl glow::Context, program: GlProgram) -> Self {
        Self {
            gl,
            program,
            textures: HashMap::new(),
        }
    }

    /// The wrapped program object.
    #[must_use]
    pub fn raw(&self) -> GlProgram {
        self.program
    }

    /// Makes the wrapped program current.
    pub fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
    }

    /// Registers (or replaces) the texture object behind a [`TextureId`].
    pub fn register_texture(&mut self, id: TextureId, target: TextureTarget, texture: GlTexture) {
        self.textures.insert(id, (target, texture));
    }

    /// Drops the registry entry for a [`TextureId`], if present. The texture
    /// object itself is untouched.
    pub fn forget_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
    }

    fn bind_to_unit(&self, unit: u32, id: TextureId) {
        let Some(&(target, texture)) = self.textures.get(&id) else {
            log::debug!("sampler upload references unregistered {id:?}; leaving unit {unit} as-is");
            return;
        };
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(target.gl_enum(), Some(texture));
        }
    }
}

impl UniformProgram for GlowProgram<'_> {
    type Location = GlLocation;

    fn active_uniform_count(&self) -> u32 {
        unsafe { self.gl.get_active_uniforms(self.program) }
    }

    fn active_uniform(&self, index: u32) -> Option<UniformDesc> {
        let active = unsafe { self.gl.get_active_uniform(self.program, index) }?;
        Some(UniformDesc {
            name: active.name,
            type_id: active.utype,
            count: u32::try_from(active.size).unwrap_or(0),
        })
    }

    fn uniform_location(&self, name: &str) -> Option<Self::Location> {
        unsafe { self.gl.get_uniform_location(self.program, name) }
    }

    fn set_floats(&mut self, loc: &Self::Location, values: &[f32]) {
        unsafe {
            self.gl.uniform_1_f32_slice(Some(loc), values);
        }
    }

    fn set_vec2s(&mut self, loc: &Self::Location, values: &[Vec2]) {
        unsafe {
            self.gl.uniform_2_f32_slice(Some(loc), cast_slice(values));
        }
    }

    fn set_vec3s(&mut self, loc: &Self::Location, values: &[Vec3]) {
        unsafe {
            self.gl.uniform_3_f32_slice(Some(loc), cast_slice(values));
        }
    }

    fn set_vec4s(&mut self, loc: &Self::Location, values: &[Vec4]) {
        unsafe {
            self.gl.uniform_4_f32_slice(Some(loc), cast_slice(values));
        }
    }

    fn set_mat4s(&mut self, loc: &Self::Location, values: &[Mat4]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(loc), false, cast_slice(values));
        }
    }

    fn set_samplers(&mut self, loc: &Self::Location, unit_marker: u32, textures: &[Option<TextureId>]) {
        // Every element of the uniform shares the one marker; with several
        // bound textures the last bind to that unit wins.
        let units = vec![unit_marker as i32; textures.len()];
        unsafe {
            self.gl.uniform_1_i32_slice(Some(loc), &units);
        }
        for id in textures.iter().flatten() {
            self.bind_to_unit(unit_marker, *id);
        }
    }
}
