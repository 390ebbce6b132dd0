//=========================================================================
// Recording Device (test double)
//
// A `RenderDevice` that needs no GPU: hands out ids 1, 2, 3, ... and
// records every call so tests can assert on the exact backend traffic.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::renderer::{
    BufferTarget, BufferUsage, RenderDevice, RenderError, RenderId, ShaderStage, TextureFormat,
    UniformLocation, UniformValue, VertexAttribute,
};

//=== Call ================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer {
        id: RenderId,
        target: BufferTarget,
        len: usize,
        usage: BufferUsage,
    },
    UpdateBuffer {
        id: RenderId,
        offset: usize,
        data: Vec<u8>,
    },
    BindBuffer(BufferTarget, Option<RenderId>),
    DeleteBuffer(RenderId),
    CreateVertexArray(RenderId),
    BindVertexArray(Option<RenderId>),
    EnableVertexAttribute(VertexAttribute),
    DeleteVertexArray(RenderId),
    CreateShader(RenderId, ShaderStage),
    CompileShader(RenderId, String),
    DeleteShader(RenderId),
    CreateProgram(RenderId),
    AttachShader(RenderId, RenderId),
    DetachShader(RenderId, RenderId),
    LinkProgram(RenderId),
    UseProgram(Option<RenderId>),
    DeleteProgram(RenderId),
    SetUniform(UniformLocation, UniformValue),
    CreateTexture {
        id: RenderId,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Vec<u8>,
    },
    UpdateTexture {
        id: RenderId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    BindTexture(u32, Option<RenderId>),
    DeleteTexture(RenderId),
}

//=== RecordingDevice =====================================================

#[derive(Default)]
pub(crate) struct RecordingDevice {
    next_id: Cell<RenderId>,
    calls: RefCell<Vec<Call>>,
    shader_stages: RefCell<HashMap<RenderId, ShaderStage>>,
    failing_stages: RefCell<HashSet<ShaderStage>>,
    fail_link: Cell<bool>,
    uniforms: RefCell<Vec<String>>,
}

impl RecordingDevice {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    //--- Scripting --------------------------------------------------------

    /// Makes every compile of `stage` fail with a canned log.
    pub fn fail_compile(&self, stage: ShaderStage) {
        self.failing_stages.borrow_mut().insert(stage);
    }

    pub fn fail_link(&self) {
        self.fail_link.set(true);
    }

    /// Declares a uniform name every linked program exposes.
    pub fn declare_uniform(&self, name: &str) {
        self.uniforms.borrow_mut().push(name.to_string());
    }

    //--- Inspection -------------------------------------------------------

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn attributes(&self) -> Vec<VertexAttribute> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::EnableVertexAttribute(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| matches(c)).count()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.calls.borrow().contains(call)
    }

    //--- Internal Helpers -------------------------------------------------

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> RenderId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

//=== RenderDevice ========================================================

impl RenderDevice for RecordingDevice {
    fn create_buffer(
        &self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<RenderId, RenderError> {
        let id = self.allocate();
        self.record(Call::CreateBuffer {
            id,
            target,
            len: data.len(),
            usage,
        });
        Ok(id)
    }

    fn update_buffer(&self, _target: BufferTarget, id: RenderId, offset: usize, data: &[u8]) {
        self.record(Call::UpdateBuffer {
            id,
            offset,
            data: data.to_vec(),
        });
    }

    fn bind_buffer(&self, target: BufferTarget, id: Option<RenderId>) {
        self.record(Call::BindBuffer(target, id));
    }

    fn delete_buffer(&self, id: RenderId) {
        self.record(Call::DeleteBuffer(id));
    }

    fn create_vertex_array(&self) -> Result<RenderId, RenderError> {
        let id = self.allocate();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, id: Option<RenderId>) {
        self.record(Call::BindVertexArray(id));
    }

    fn enable_vertex_attribute(&self, attribute: &VertexAttribute) {
        self.record(Call::EnableVertexAttribute(*attribute));
    }

    fn delete_vertex_array(&self, id: RenderId) {
        self.record(Call::DeleteVertexArray(id));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<RenderId, RenderError> {
        let id = self.allocate();
        self.shader_stages.borrow_mut().insert(id, stage);
        self.record(Call::CreateShader(id, stage));
        Ok(id)
    }

    fn compile_shader(&self, id: RenderId, source: &str) -> Result<(), String> {
        self.record(Call::CompileShader(id, source.to_string()));

        let stage = self.shader_stages.borrow().get(&id).copied();
        match stage {
            Some(stage) if self.failing_stages.borrow().contains(&stage) => {
                Err(format!("0:1(1): error: {:?} stage rejected", stage))
            }
            _ => Ok(()),
        }
    }

    fn delete_shader(&self, id: RenderId) {
        self.record(Call::DeleteShader(id));
    }

    fn create_program(&self) -> Result<RenderId, RenderError> {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: RenderId, shader: RenderId) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: RenderId, shader: RenderId) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: RenderId) -> Result<(), String> {
        self.record(Call::LinkProgram(program));
        if self.fail_link.get() {
            Err("error: unresolved varying".to_string())
        } else {
            Ok(())
        }
    }

    fn use_program(&self, program: Option<RenderId>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: RenderId) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, _program: RenderId, name: &str) -> Option<UniformLocation> {
        self.uniforms
            .borrow()
            .iter()
            .position(|n| n == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        self.record(Call::SetUniform(location, value));
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) -> Result<RenderId, RenderError> {
        let id = self.allocate();
        self.record(Call::CreateTexture {
            id,
            width,
            height,
            format,
            data: data.to_vec(),
        });
        Ok(id)
    }

    fn update_texture(
        &self,
        id: RenderId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        _format: TextureFormat,
        _data: &[u8],
    ) {
        self.record(Call::UpdateTexture {
            id,
            x,
            y,
            width,
            height,
        });
    }

    fn bind_texture(&self, slot: u32, id: Option<RenderId>) {
        self.record(Call::BindTexture(slot, id));
    }

    fn delete_texture(&self, id: RenderId) {
        self.record(Call::DeleteTexture(id));
    }
}
