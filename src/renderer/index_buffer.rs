//=========================================================================
// Index Buffer
//=========================================================================

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::renderer::vertex_buffer::check_bounds;
use crate::renderer::{BufferTarget, BufferUsage, RenderDevice, RenderError, RenderId};

/// Owns one GPU element buffer of `u32` indices (static-draw usage).
pub struct IndexBuffer {
    device: Rc<dyn RenderDevice>,
    id: RenderId,
    count: u32,
}

impl IndexBuffer {
    pub fn new(device: &Rc<dyn RenderDevice>, indices: &[u32]) -> Result<Self, RenderError> {
        let count = u32::try_from(indices.len())
            .map_err(|_| RenderError::ResourceCreation("too many indices".to_string()))?;
        let id = device.create_buffer(
            BufferTarget::Index,
            bytemuck::cast_slice(indices),
            BufferUsage::StaticDraw,
        )?;
        trace!(target: "renderer", "Index buffer {} created ({} indices)", id, count);

        Ok(Self {
            device: Rc::clone(device),
            id,
            count,
        })
    }

    /// Overwrites indices starting at index `first`.
    pub fn edit(&self, indices: &[u32], first: u32) -> Result<(), RenderError> {
        const INDEX_SIZE: usize = std::mem::size_of::<u32>();
        let offset = first as usize * INDEX_SIZE;
        let data: &[u8] = bytemuck::cast_slice(indices);

        check_bounds(offset, data.len(), self.count as usize * INDEX_SIZE)?;
        self.device.update_buffer(BufferTarget::Index, self.id, offset, data);
        Ok(())
    }

    pub fn bind(&self) {
        self.device.bind_buffer(BufferTarget::Index, Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_buffer(BufferTarget::Index, None);
    }

    pub fn id(&self) -> RenderId {
        self.id
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

impl fmt::Debug for IndexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBuffer")
            .field("id", &self.id)
            .field("count", &self.count)
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

    #[test]
    fn creation_uploads_u32_indices_statically() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();

        let ib = IndexBuffer::new(&device, &[0, 1, 2, 2, 3, 0]).unwrap();

        assert_eq!(ib.count(), 6);
        assert!(recorder.contains(&Call::CreateBuffer {
            id: ib.id(),
            target: BufferTarget::Index,
            len: 24,
            usage: BufferUsage::StaticDraw,
        }));
    }

    #[test]
    fn edit_is_bounds_checked_in_indices() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        let ib = IndexBuffer::new(&device, &[0, 1, 2]).unwrap();

        ib.edit(&[7], 2).unwrap();
        assert!(recorder.contains(&Call::UpdateBuffer {
            id: ib.id(),
            offset: 8,
            data: 7u32.to_ne_bytes().to_vec(),
        }));

        assert!(matches!(ib.edit(&[7, 8], 2), Err(RenderError::OutOfBounds { .. })));
    }

    #[test]
    fn drop_releases_id() {
        let recorder = RecordingDevice::new();
        let device: Rc<dyn RenderDevice> = recorder.clone();
        let ib = IndexBuffer::new(&device, &[0]).unwrap();
        let id = ib.id();

        drop(ib);
        assert_eq!(recorder.calls().last(), Some(&Call::DeleteBuffer(id)));
    }
}
