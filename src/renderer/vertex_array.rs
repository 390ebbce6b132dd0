//=========================================================================
// Vertex Array
//
// Aggregates vertex buffers (and optionally one index buffer) into a
// drawable attribute configuration.
//
// Attribute assembly is append-only: every added buffer's layout is
// walked in declaration order and each element takes the next global
// attribute index.
//
// ```text
//  add A {Float3, Float2}  → attributes 0, 1
//  add B {Float4}          → attribute  2
// ```
//
//=========================================================================

use std::fmt;
use std::rc::Rc;

use log::{trace, warn};

use crate::renderer::{
    IndexBuffer, RenderDevice, RenderError, RenderId, VertexAttribute, VertexBuffer,
};

//=== VertexArray =========================================================

pub struct VertexArray {
    device: Rc<dyn RenderDevice>,
    id: RenderId,
    attribute_index: u32,
    vertex_buffers: Vec<VertexBuffer>,
    index_buffer: Option<IndexBuffer>,
}

impl VertexArray {
    /// Allocates the vertex array and binds it.
    pub fn new(device: &Rc<dyn RenderDevice>) -> Result<Self, RenderError> {
        let id = device.create_vertex_array()?;
        device.bind_vertex_array(Some(id));
        trace!(target: "renderer", "Vertex array {} created", id);

        Ok(Self {
            device: Rc::clone(device),
            id,
            attribute_index: 0,
            vertex_buffers: Vec::new(),
            index_buffer: None,
        })
    }

    //--- Assembly ---------------------------------------------------------

    /// Takes ownership of `buffer` and assigns one attribute slot per
    /// element of its layout.
    pub fn add_vertex_buffer(&mut self, buffer: VertexBuffer) {
        self.bind();
        buffer.bind();

        let layout = buffer.layout();
        if layout.is_empty() {
            warn!(target: "renderer", "Vertex buffer {} has an empty layout", buffer.id());
        }

        for element in layout {
            self.device.enable_vertex_attribute(&VertexAttribute {
                index: self.attribute_index,
                component_count: element.component_count(),
                scalar_type: element.data_type().scalar_type(),
                normalized: element.is_normalized(),
                stride: layout.stride(),
                offset: element.offset(),
            });
            self.attribute_index += 1;
        }

        self.vertex_buffers.push(buffer);
    }

    /// Binds `buffer` to this array, replacing any previous index buffer.
    pub fn set_index_buffer(&mut self, buffer: IndexBuffer) {
        self.bind();
        buffer.bind();
        self.index_buffer = Some(buffer);
    }

    //--- Binding ----------------------------------------------------------

    pub fn bind(&self) {
        self.device.bind_vertex_array(Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_vertex_array(None);
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> RenderId {
        self.id
    }

    /// Number of attribute slots assigned so far.
    pub fn attribute_count(&self) -> u32 {
        self.attribute_index
    }

    pub fn vertex_buffers(&self) -> &[VertexBuffer] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }

    /// Index count of the attached index buffer, `0` without one.
    pub fn draw_count(&self) -> u32 {
        self.index_buffer.as_ref().map_or(0, IndexBuffer::count)
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.id);
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexArray")
            .field("id", &self.id)
            .field("attribute_index", &self.attribute_index)
            .field("vertex_buffers", &self.vertex_buffers)
            .field("index_buffer", &self.index_buffer)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{Call, RecordingDevice};
    use crate::renderer::{BufferLayout, ScalarType, ShaderDataType::*};

    fn setup() -> (Rc<RecordingDevice>, Rc<dyn RenderDevice>) {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        (recorder, device)
    }

    #[test]
    fn first_resource_gets_id_one() {
        let (_, device) = setup();
        let va = VertexArray::new(&device).unwrap();
        assert_eq!(va.id(), 1);
    }

    #[test]
    fn attribute_indices_are_global_and_monotonic() {
        let (recorder, device) = setup();
        let mut va = VertexArray::new(&device).unwrap();

        let a = VertexBuffer::new(&device, &[0u8; 20], BufferLayout::from_elements([Float3, Float2]))
            .unwrap();
        let b = VertexBuffer::new(&device, &[0u8; 16], BufferLayout::from_elements([Float4])).unwrap();

        va.add_vertex_buffer(a);
        va.add_vertex_buffer(b);

        let indices: Vec<u32> = recorder.attributes().iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(va.attribute_count(), 3);
        assert_eq!(va.vertex_buffers().len(), 2);
    }

    #[test]
    fn attributes_carry_layout_description() {
        let (recorder, device) = setup();
        let mut va = VertexArray::new(&device).unwrap();

        let layout = BufferLayout::from_elements([(Float3, false), (Byte4, true)]);
        va.add_vertex_buffer(VertexBuffer::new(&device, &[0u8; 32], layout).unwrap());

        let attributes = recorder.attributes();
        assert_eq!(
            attributes[0],
            VertexAttribute {
                index: 0,
                component_count: 3,
                scalar_type: ScalarType::Float,
                normalized: false,
                stride: 16,
                offset: 0,
            }
        );
        assert_eq!(
            attributes[1],
            VertexAttribute {
                index: 1,
                component_count: 4,
                scalar_type: ScalarType::Byte,
                normalized: true,
                stride: 16,
                offset: 12,
            }
        );
    }

    #[test]
    fn add_binds_array_then_buffer_before_attributes() {
        let (recorder, device) = setup();
        let mut va = VertexArray::new(&device).unwrap();
        let vb = VertexBuffer::new(&device, &[0u8; 12], BufferLayout::from_elements([Float3]))
            .unwrap();
        let vb_id = vb.id();
        recorder.clear_calls();

        va.add_vertex_buffer(vb);

        let calls = recorder.calls();
        assert_eq!(calls[0], Call::BindVertexArray(Some(va.id())));
        assert_eq!(
            calls[1],
            Call::BindBuffer(crate::renderer::BufferTarget::Vertex, Some(vb_id))
        );
        assert!(matches!(calls[2], Call::EnableVertexAttribute(_)));
    }

    #[test]
    fn index_buffer_sets_draw_count() {
        let (_, device) = setup();
        let mut va = VertexArray::new(&device).unwrap();
        assert_eq!(va.draw_count(), 0);

        va.set_index_buffer(IndexBuffer::new(&device, &[0, 1, 2, 2, 3, 0]).unwrap());
        assert_eq!(va.draw_count(), 6);
    }

    #[test]
    fn drop_releases_owned_buffers() {
        let (recorder, device) = setup();
        let mut va = VertexArray::new(&device).unwrap();
        let va_id = va.id();
        va.add_vertex_buffer(
            VertexBuffer::new(&device, &[0u8; 12], BufferLayout::from_elements([Float3])).unwrap(),
        );
        va.set_index_buffer(IndexBuffer::new(&device, &[0]).unwrap());

        drop(va);

        assert!(recorder.contains(&Call::DeleteVertexArray(va_id)));
        assert_eq!(recorder.count(|c| matches!(c, Call::DeleteBuffer(_))), 2);
    }
}
