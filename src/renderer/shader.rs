//=========================================================================
// Shader Program
//
// Compiles every present stage, links them into one program and uploads
// uniforms by name.
//
// Construction:
// ```text
//  ShaderSources ─▶ validate stages ─▶ compile each ─▶ link ─▶ Shader
//                         │                 │            │
//                   MissingStage     ShaderCompile   ShaderLink
// ```
// Any failure releases every object created so far and returns the
// typed error; a `Shader` value always holds a linked program.
//
//=========================================================================

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, error, trace};

use crate::renderer::{
    RenderDevice, RenderError, RenderId, ShaderSources, ShaderStage, UniformValue,
};

//=== Shader ==============================================================

pub struct Shader {
    device: Rc<dyn RenderDevice>,
    id: RenderId,
}

impl Shader {
    //--- Construction -----------------------------------------------------

    /// Compiles and links `sources`.
    ///
    /// Vertex and fragment stages are required unless the sources hold a
    /// compute stage only.
    pub fn from_sources(
        device: &Rc<dyn RenderDevice>,
        sources: &ShaderSources,
    ) -> Result<Self, RenderError> {
        if !sources.is_compute_only() {
            for required in [ShaderStage::Vertex, ShaderStage::Fragment] {
                if !sources.has(required) {
                    error!(target: "renderer::shader", "Shader has no {:?} stage", required);
                    return Err(RenderError::MissingStage(required));
                }
            }
        }

        let id = compile_and_link(device.as_ref(), sources)?;
        debug!(
            target: "renderer::shader",
            "Shader program {} linked ({} stages)",
            id,
            sources.stages().count()
        );

        Ok(Self {
            device: Rc::clone(device),
            id,
        })
    }

    /// Builds a program from one file sectioned by `#region <Stage>` markers.
    pub fn from_file(
        device: &Rc<dyn RenderDevice>,
        path: impl AsRef<Path>,
    ) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let sources = ShaderSources::from_file(path).inspect_err(|e| {
            error!(target: "renderer::shader", "Could not open shader source {}: {}", path.display(), e);
        })?;
        Self::from_sources(device, &sources)
    }

    /// Builds a program from a vertex file and a fragment file.
    pub fn from_files(
        device: &Rc<dyn RenderDevice>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, RenderError> {
        let sources = ShaderSources::from_files(vertex_path, fragment_path).inspect_err(|e| {
            error!(target: "renderer::shader", "Could not open shader source: {}", e);
        })?;
        Self::from_sources(device, &sources)
    }

    //--- Binding ----------------------------------------------------------

    pub fn bind(&self) {
        self.device.use_program(Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.use_program(None);
    }

    pub fn id(&self) -> RenderId {
        self.id
    }

    //=====================================================================
    // Uniform Uploads
    //=====================================================================
    //
    // Each upload makes this program current first. A name the linker
    // optimised away (or never declared) is skipped.
    //

    pub fn upload(&self, name: &str, value: UniformValue) {
        self.bind();
        match self.device.uniform_location(self.id, name) {
            Some(location) => self.device.set_uniform(location, value),
            None => trace!(
                target: "renderer::shader",
                "Uniform '{}' not found in program {}",
                name,
                self.id
            ),
        }
    }

    pub fn upload_int(&self, name: &str, value: i32) {
        self.upload(name, UniformValue::Int(value));
    }

    pub fn upload_float(&self, name: &str, value: f32) {
        self.upload(name, UniformValue::Float(value));
    }

    pub fn upload_float2(&self, name: &str, value: Vec2) {
        self.upload(name, UniformValue::Float2(value));
    }

    pub fn upload_float3(&self, name: &str, value: Vec3) {
        self.upload(name, UniformValue::Float3(value));
    }

    pub fn upload_float4(&self, name: &str, value: Vec4) {
        self.upload(name, UniformValue::Float4(value));
    }

    pub fn upload_mat4(&self, name: &str, value: &Mat4) {
        self.upload(name, UniformValue::Mat4(*value));
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.device.delete_program(self.id);
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader").field("id", &self.id).finish()
    }
}

//=== Compile & Link ======================================================

fn compile_and_link(
    device: &dyn RenderDevice,
    sources: &ShaderSources,
) -> Result<RenderId, RenderError> {
    //--- 1. Compile every present stage ----------------------------------
    let mut shaders: Vec<RenderId> = Vec::new();

    for (stage, source) in sources.stages() {
        let shader = match device.create_shader(stage) {
            Ok(shader) => shader,
            Err(e) => {
                release_shaders(device, &shaders);
                return Err(e);
            }
        };

        if let Err(log) = device.compile_shader(shader, source) {
            error!(target: "renderer::shader", "{:?} shader compile error: {}", stage, log);
            device.delete_shader(shader);
            release_shaders(device, &shaders);
            return Err(RenderError::ShaderCompile { stage, log });
        }

        shaders.push(shader);
    }

    //--- 2. Link ---------------------------------------------------------
    let program = match device.create_program() {
        Ok(program) => program,
        Err(e) => {
            release_shaders(device, &shaders);
            return Err(e);
        }
    };

    for &shader in &shaders {
        device.attach_shader(program, shader);
    }

    if let Err(log) = device.link_program(program) {
        error!(target: "renderer::shader", "Shader linking error: {}", log);
        device.delete_program(program);
        release_shaders(device, &shaders);
        return Err(RenderError::ShaderLink(log));
    }

    //--- 3. Stage objects are no longer needed ---------------------------
    for &shader in &shaders {
        device.detach_shader(program, shader);
    }
    release_shaders(device, &shaders);

    Ok(program)
}

fn release_shaders(device: &dyn RenderDevice, shaders: &[RenderId]) {
    for &shader in shaders {
        device.delete_shader(shader);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
