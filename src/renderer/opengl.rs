//=========================================================================
// OpenGL Device
//
// `RenderDevice` over a loaded `glow` context.
//
// Responsibilities:
// - Translate engine descriptors (targets, scalar types, formats) to GL enums
// - Convert between engine `RenderId`s and glow's native handle types
// - Route driver debug output into `log`
//
// Safety:
// Every GL call is `unsafe` in glow. The device is created right after
// its context was made current on this thread and is only used from that
// thread, which is the invariant glow requires.
//
// Context Loss:
// Resources hold the device through an `Rc` and may outlive the context
// (e.g. a buffer still owned by the caller after the window closed). The
// owning context marks the device lost before it is destroyed; from then
// on releases and binds are logged no-ops and creations fail.
//
//=========================================================================

use std::cell::Cell;
use std::num::NonZeroU32;

use glow::HasContext;
use log::{debug, error, info, trace, warn};

use crate::renderer::{
    BufferTarget, BufferUsage, RenderDevice, RenderError, RenderId, ScalarType, ShaderStage,
    TextureFormat, UniformLocation, UniformValue, VertexAttribute,
};

//=== OpenGlDevice ========================================================

//--- ContextLiveness ----------------------------------------------------

/// Whether the context behind a device still exists.
#[derive(Debug)]
struct ContextLiveness {
    alive: Cell<bool>,
}

impl ContextLiveness {
    fn new() -> Self {
        Self {
            alive: Cell::new(true),
        }
    }

    fn mark_lost(&self) {
        if self.alive.replace(false) {
            debug!(target: "renderer", "OpenGL context lost; GL calls are now skipped");
        }
    }

    /// `true` while calls may reach the driver; logs the skipped `op` otherwise.
    fn check(&self, op: &str) -> bool {
        let alive = self.alive.get();
        if !alive {
            trace!(target: "renderer", "{} skipped: context lost", op);
        }
        alive
    }
}

//--- OpenGlDevice --------------------------------------------------------

pub struct OpenGlDevice {
    gl: glow::Context,
    liveness: ContextLiveness,
}

impl OpenGlDevice {
    /// Wraps a loaded context and enables driver debug output.
    ///
    /// # Safety
    ///
    /// The context `gl` was loaded from must be current on this thread for
    /// the whole lifetime of the device.
    pub unsafe fn new(mut gl: glow::Context) -> Self {
        let version = gl.version();
        info!(
            target: "renderer",
            "OpenGL {}.{} ({})",
            version.major,
            version.minor,
            version.vendor_info
        );

        if gl.supports_debug() {
            gl.enable(glow::DEBUG_OUTPUT);
            gl.debug_message_callback(|_source, _kind, id, severity, message| {
                log_debug_message(id, severity, message);
            });
            debug!(target: "renderer", "OpenGL debug output enabled");
        } else {
            debug!(target: "renderer", "OpenGL debug output unavailable");
        }

        Self {
            gl,
            liveness: ContextLiveness::new(),
        }
    }

    /// The raw context, or `None` once it was destroyed.
    pub fn gl(&self) -> Option<&glow::Context> {
        self.live("gl")
    }

    /// Called by the owning context right before it is destroyed.
    pub(crate) fn mark_context_lost(&self) {
        self.liveness.mark_lost();
    }

    fn live(&self, op: &str) -> Option<&glow::Context> {
        self.liveness.check(op).then_some(&self.gl)
    }
}

//--- log_debug_message() -------------------------------------------------
//
// Driver severity → log level: HIGH → error, MEDIUM → warn, LOW → info,
// NOTIFICATION → trace.
//
fn log_debug_message(id: u32, severity: u32, message: &str) {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => error!(target: "renderer", "[GL {}] {}", id, message),
        glow::DEBUG_SEVERITY_MEDIUM => warn!(target: "renderer", "[GL {}] {}", id, message),
        glow::DEBUG_SEVERITY_LOW => info!(target: "renderer", "[GL {}] {}", id, message),
        _ => trace!(target: "renderer", "[GL {}] {}", id, message),
    }
}

//=== GL Enum Mapping =====================================================

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
    }
}

fn scalar_type(scalar: ScalarType) -> u32 {
    match scalar {
        ScalarType::Float => glow::FLOAT,
        ScalarType::Int => glow::INT,
        ScalarType::Short => glow::SHORT,
        ScalarType::Byte => glow::UNSIGNED_BYTE,
    }
}

fn shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::TessellationControl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessellationEvaluation => glow::TESS_EVALUATION_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

/// (internal format, pixel format) of a texture format.
fn texture_format(format: TextureFormat) -> (u32, u32) {
    match format {
        TextureFormat::R8 => (glow::R8, glow::RED),
        TextureFormat::Rgb8 => (glow::RGB8, glow::RGB),
        TextureFormat::Rgba8 => (glow::RGBA8, glow::RGBA),
    }
}

//=== Handle Conversion ===================================================
//
// glow's native handles wrap a `NonZeroU32`; engine ids are the raw value.
//

fn raw(id: NonZeroU32) -> RenderId {
    id.get()
}

fn handle(id: RenderId) -> Option<NonZeroU32> {
    let handle = NonZeroU32::new(id);
    if handle.is_none() {
        warn!(target: "renderer", "Null resource id used");
    }
    handle
}

fn creation(kind: &str) -> impl FnOnce(String) -> RenderError + '_ {
    move |e| RenderError::ResourceCreation(format!("{}: {}", kind, e))
}

fn context_lost(kind: &str) -> RenderError {
    RenderError::ResourceCreation(format!("{}: context lost", kind))
}

//=== RenderDevice ========================================================

impl RenderDevice for OpenGlDevice {
    //--- Buffers ----------------------------------------------------------

    fn create_buffer(
        &self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<RenderId, RenderError> {
        let gl = self.live("create_buffer").ok_or_else(|| context_lost("buffer"))?;
        unsafe {
            let buffer = gl.create_buffer().map_err(creation("buffer"))?;
            let target = buffer_target(target);
            gl.bind_buffer(target, Some(buffer));
            gl.buffer_data_u8_slice(target, data, buffer_usage(usage));
            Ok(raw(buffer.0))
        }
    }

    fn update_buffer(&self, target: BufferTarget, id: RenderId, offset: usize, data: &[u8]) {
        let Some(gl) = self.live("update_buffer") else { return };
        let Some(id) = handle(id) else { return };
        let target = buffer_target(target);
        unsafe {
            gl.bind_buffer(target, Some(glow::NativeBuffer(id)));
            gl.buffer_sub_data_u8_slice(target, offset as i32, data);
        }
    }

    fn bind_buffer(&self, target: BufferTarget, id: Option<RenderId>) {
        let Some(gl) = self.live("bind_buffer") else { return };
        let buffer = id.and_then(handle).map(glow::NativeBuffer);
        unsafe { gl.bind_buffer(buffer_target(target), buffer) }
    }

    fn delete_buffer(&self, id: RenderId) {
        let Some(gl) = self.live("delete_buffer") else { return };
        if let Some(id) = handle(id) {
            unsafe { gl.delete_buffer(glow::NativeBuffer(id)) }
        }
    }

    //--- Vertex Arrays ----------------------------------------------------

    fn create_vertex_array(&self) -> Result<RenderId, RenderError> {
        let gl = self
            .live("create_vertex_array")
            .ok_or_else(|| context_lost("vertex array"))?;
        unsafe {
            let array = gl.create_vertex_array().map_err(creation("vertex array"))?;
            Ok(raw(array.0))
        }
    }

    fn bind_vertex_array(&self, id: Option<RenderId>) {
        let Some(gl) = self.live("bind_vertex_array") else { return };
        let array = id.and_then(handle).map(glow::NativeVertexArray);
        unsafe { gl.bind_vertex_array(array) }
    }

    fn enable_vertex_attribute(&self, attribute: &VertexAttribute) {
        let Some(gl) = self.live("enable_vertex_attribute") else { return };
        unsafe {
            gl.enable_vertex_attrib_array(attribute.index);
            gl.vertex_attrib_pointer_f32(
                attribute.index,
                attribute.component_count as i32,
                scalar_type(attribute.scalar_type),
                attribute.normalized,
                attribute.stride as i32,
                attribute.offset as i32,
            );
        }
    }

    fn delete_vertex_array(&self, id: RenderId) {
        let Some(gl) = self.live("delete_vertex_array") else { return };
        if let Some(id) = handle(id) {
            unsafe { gl.delete_vertex_array(glow::NativeVertexArray(id)) }
        }
    }

    //--- Shaders ----------------------------------------------------------

    fn create_shader(&self, stage: ShaderStage) -> Result<RenderId, RenderError> {
        let gl = self.live("create_shader").ok_or_else(|| context_lost("shader"))?;
        unsafe {
            let shader = gl
                .create_shader(shader_stage(stage))
                .map_err(creation("shader"))?;
            Ok(raw(shader.0))
        }
    }

    fn compile_shader(&self, id: RenderId, source: &str) -> Result<(), String> {
        let gl = self.live("compile_shader").ok_or("context lost")?;
        let shader = glow::NativeShader(handle(id).ok_or("null shader id")?);
        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&self, id: RenderId) {
        let Some(gl) = self.live("delete_shader") else { return };
        if let Some(id) = handle(id) {
            unsafe { gl.delete_shader(glow::NativeShader(id)) }
        }
    }

    fn create_program(&self) -> Result<RenderId, RenderError> {
        let gl = self.live("create_program").ok_or_else(|| context_lost("program"))?;
        unsafe {
            let program = gl.create_program().map_err(creation("program"))?;
            Ok(raw(program.0))
        }
    }

    fn attach_shader(&self, program: RenderId, shader: RenderId) {
        let Some(gl) = self.live("attach_shader") else { return };
        if let (Some(p), Some(s)) = (handle(program), handle(shader)) {
            unsafe { gl.attach_shader(glow::NativeProgram(p), glow::NativeShader(s)) }
        }
    }

    fn detach_shader(&self, program: RenderId, shader: RenderId) {
        let Some(gl) = self.live("detach_shader") else { return };
        if let (Some(p), Some(s)) = (handle(program), handle(shader)) {
            unsafe { gl.detach_shader(glow::NativeProgram(p), glow::NativeShader(s)) }
        }
    }

    fn link_program(&self, program: RenderId) -> Result<(), String> {
        let gl = self.live("link_program").ok_or("context lost")?;
        let program = glow::NativeProgram(handle(program).ok_or("null program id")?);
        unsafe {
            gl.link_program(program);
            if gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(gl.get_program_info_log(program))
            }
        }
    }

    fn use_program(&self, program: Option<RenderId>) {
        let Some(gl) = self.live("use_program") else { return };
        let program = program.and_then(handle).map(glow::NativeProgram);
        unsafe { gl.use_program(program) }
    }

    fn delete_program(&self, program: RenderId) {
        let Some(gl) = self.live("delete_program") else { return };
        if let Some(id) = handle(program) {
            unsafe { gl.delete_program(glow::NativeProgram(id)) }
        }
    }

    fn uniform_location(&self, program: RenderId, name: &str) -> Option<UniformLocation> {
        let gl = self.live("uniform_location")?;
        let program = glow::NativeProgram(handle(program)?);
        unsafe {
            gl.get_uniform_location(program, name)
                .map(|location| UniformLocation(location.0))
        }
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let Some(gl) = self.live("set_uniform") else { return };
        let location = glow::NativeUniformLocation(location.0);
        let location = Some(&location);
        unsafe {
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => gl.uniform_1_f32(location, v),
                UniformValue::Float2(v) => gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Float3(v) => gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Float4(v) => gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }

    //--- Textures ---------------------------------------------------------

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) -> Result<RenderId, RenderError> {
        let gl = self.live("create_texture").ok_or_else(|| context_lost("texture"))?;
        let (internal, pixel) = texture_format(format);
        unsafe {
            let texture = gl.create_texture().map_err(creation("texture"))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            // Rows of 1- and 3-channel data are not 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal as i32,
                width as i32,
                height as i32,
                0,
                pixel,
                glow::UNSIGNED_BYTE,
                Some(data),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);

            Ok(raw(texture.0))
        }
    }

    fn update_texture(
        &self,
        id: RenderId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) {
        let Some(gl) = self.live("update_texture") else { return };
        let Some(id) = handle(id) else { return };
        let (_, pixel) = texture_format(format);
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(id)));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                x as i32,
                y as i32,
                width as i32,
                height as i32,
                pixel,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(data),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
        }
    }

    fn bind_texture(&self, slot: u32, id: Option<RenderId>) {
        let Some(gl) = self.live("bind_texture") else { return };
        let texture = id.and_then(handle).map(glow::NativeTexture);
        unsafe {
            gl.active_texture(glow::TEXTURE0 + slot);
            gl.bind_texture(glow::TEXTURE_2D, texture);
        }
    }

    fn delete_texture(&self, id: RenderId) {
        let Some(gl) = self.live("delete_texture") else { return };
        if let Some(id) = handle(id) {
            unsafe { gl.delete_texture(glow::NativeTexture(id)) }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types_map_to_gl_enums() {
        assert_eq!(scalar_type(ScalarType::Float), glow::FLOAT);
        assert_eq!(scalar_type(ScalarType::Int), glow::INT);
        assert_eq!(scalar_type(ScalarType::Short), glow::SHORT);
        assert_eq!(scalar_type(ScalarType::Byte), glow::UNSIGNED_BYTE);
    }

    #[test]
    fn stages_map_to_gl_enums() {
        assert_eq!(shader_stage(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(shader_stage(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
        assert_eq!(shader_stage(ShaderStage::Compute), glow::COMPUTE_SHADER);
    }

    #[test]
    fn texture_formats_map_to_gl_enums() {
        assert_eq!(texture_format(TextureFormat::Rgb8), (glow::RGB8, glow::RGB));
        assert_eq!(texture_format(TextureFormat::Rgba8), (glow::RGBA8, glow::RGBA));
        assert_eq!(texture_format(TextureFormat::R8), (glow::R8, glow::RED));
    }

    #[test]
    fn null_id_has_no_handle() {
        assert!(handle(0).is_none());
        assert_eq!(handle(7).map(raw), Some(7));
    }

    //--- Context Loss -----------------------------------------------------

    #[test]
    fn liveness_starts_alive() {
        let liveness = ContextLiveness::new();
        assert!(liveness.check("delete_buffer"));
    }

    #[test]
    fn lost_context_refuses_further_calls() {
        let liveness = ContextLiveness::new();
        liveness.mark_lost();
        liveness.mark_lost();

        assert!(!liveness.check("delete_buffer"));
        assert!(!liveness.check("bind_texture"));
    }

    #[test]
    fn lost_context_creation_error_names_resource() {
        let err = context_lost("buffer");
        assert!(err.to_string().contains("buffer: context lost"));
    }
}
