//=========================================================================
// Vertex Buffer
//
// Owns one GPU array buffer plus the layout describing its records.
// Uploaded with dynamic-draw usage so `edit` can stream new data without
// reallocating.
//
//=========================================================================

use std::fmt;
use std::rc::Rc;

use bytemuck::Pod;
use log::trace;

use crate::renderer::{BufferLayout, BufferTarget, BufferUsage, RenderDevice, RenderError, RenderId};

//=== VertexBuffer ========================================================

pub struct VertexBuffer {
    device: Rc<dyn RenderDevice>,
    id: RenderId,
    size: usize,
    layout: BufferLayout,
}

impl VertexBuffer {
    /// Allocates the buffer and uploads `vertices`.
    pub fn new(
        device: &Rc<dyn RenderDevice>,
        vertices: &[u8],
        layout: BufferLayout,
    ) -> Result<Self, RenderError> {
        let id = device.create_buffer(BufferTarget::Vertex, vertices, BufferUsage::DynamicDraw)?;
        trace!(
            target: "renderer",
            "Vertex buffer {} created ({} bytes, stride {})",
            id,
            vertices.len(),
            layout.stride()
        );

        Ok(Self {
            device: Rc::clone(device),
            id,
            size: vertices.len(),
            layout,
        })
    }

    /// Typed convenience over [`VertexBuffer::new`].
    pub fn from_slice<T: Pod>(
        device: &Rc<dyn RenderDevice>,
        vertices: &[T],
        layout: BufferLayout,
    ) -> Result<Self, RenderError> {
        Self::new(device, bytemuck::cast_slice(vertices), layout)
    }

    //--- Editing ----------------------------------------------------------

    /// Overwrites `data.len()` bytes starting at byte `offset`.
    pub fn edit(&self, data: &[u8], offset: usize) -> Result<(), RenderError> {
        check_bounds(offset, data.len(), self.size)?;
        self.device.update_buffer(BufferTarget::Vertex, self.id, offset, data);
        Ok(())
    }

    pub fn edit_slice<T: Pod>(&self, data: &[T], offset: usize) -> Result<(), RenderError> {
        self.edit(bytemuck::cast_slice(data), offset)
    }

    //--- Binding ----------------------------------------------------------

    pub fn bind(&self) {
        self.device.bind_buffer(BufferTarget::Vertex, Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_buffer(BufferTarget::Vertex, None);
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> RenderId {
        self.id
    }

    /// Allocated size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

impl fmt::Debug for VertexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexBuffer")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("layout", &self.layout)
            .finish()
    }
}

//--- check_bounds() ------------------------------------------------------
//
// Shared by buffer edits: `offset + len` must not pass the allocation.
//
pub(crate) fn check_bounds(offset: usize, len: usize, capacity: usize) -> Result<(), RenderError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(RenderError::OutOfBounds {
            offset,
            len,
            capacity,
        }),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{Call, RecordingDevice};
    use crate::renderer::ShaderDataType::*;

    fn layout() -> BufferLayout {
        BufferLayout::from_elements([Float3, Float2])
    }

    #[test]
    fn creation_uploads_with_dynamic_usage() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();

        let vertices = [0.0f32; 10];
        let vb = VertexBuffer::from_slice(&device, &vertices, layout()).unwrap();

        assert_eq!(vb.id(), 1);
        assert_eq!(vb.size(), 40);
        assert_eq!(vb.layout().stride(), 20);
        assert!(recorder.contains(&Call::CreateBuffer {
            id: 1,
            target: BufferTarget::Vertex,
            len: 40,
            usage: BufferUsage::DynamicDraw,
        }));
    }

    #[test]
    fn edit_within_bounds_updates_range() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        let vb = VertexBuffer::new(&device, &[0u8; 16], layout()).unwrap();

        vb.edit(&[1, 2, 3, 4], 12).unwrap();

        assert!(recorder.contains(&Call::UpdateBuffer {
            id: vb.id(),
            offset: 12,
            data: vec![1, 2, 3, 4],
        }));
    }

    #[test]
    fn edit_past_end_is_rejected() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        let vb = VertexBuffer::new(&device, &[0u8; 16], layout()).unwrap();

        match vb.edit(&[0; 8], 12) {
            Err(RenderError::OutOfBounds { offset, len, capacity }) => {
                assert_eq!((offset, len, capacity), (12, 8, 16));
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
        assert_eq!(recorder.count(|c| matches!(c, Call::UpdateBuffer { .. })), 0);
    }

    #[test]
    fn offset_overflow_is_rejected() {
        assert!(check_bounds(usize::MAX, 1, 16).is_err());
        assert!(check_bounds(16, 0, 16).is_ok());
    }

    #[test]
    fn bind_unbind_and_drop() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        let vb = VertexBuffer::new(&device, &[0u8; 4], layout()).unwrap();
        let id = vb.id();

        vb.bind();
        vb.unbind();
        drop(vb);

        let calls = recorder.calls();
        assert!(calls.contains(&Call::BindBuffer(BufferTarget::Vertex, Some(id))));
        assert!(calls.contains(&Call::BindBuffer(BufferTarget::Vertex, None)));
        assert_eq!(calls.last(), Some(&Call::DeleteBuffer(id)));
    }
}
