//=========================================================================
// Texture
//
// Owns one 2D GPU texture created from an image file or raw pixels.
//
// Responsibilities:
// - Decode image files (PNG / JPEG) and flip them to GL's bottom-left origin
// - Validate raw pixel data against its declared size and channel count
// - Partial sub-rectangle edits and slot binding
//
//=========================================================================

use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use image::DynamicImage;
use log::{debug, error};

use crate::renderer::{RenderDevice, RenderError, RenderId, TextureFormat};

//=== Texture =============================================================

pub struct Texture {
    device: Rc<dyn RenderDevice>,
    id: RenderId,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl Texture {
    //--- Construction -----------------------------------------------------

    /// Loads and uploads an image file as RGB or RGBA.
    pub fn from_file(
        device: &Rc<dyn RenderDevice>,
        path: impl AsRef<Path>,
    ) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            error!(target: "renderer", "Could not load texture {}: {}", path.display(), e);
            RenderError::io(path, e)
        })?;
        let image = image::load_from_memory(&bytes)?.flipv();

        let (width, height) = (image.width(), image.height());
        let (channels, pixels) = into_pixels(image);
        debug!(
            target: "renderer",
            "Texture {} decoded ({}x{}, {} channels)",
            path.display(),
            width,
            height,
            channels
        );

        Self::from_raw(device, width, height, channels, &pixels)
    }

    /// Uploads tightly packed 8-bit pixels with 1, 3 or 4 channels.
    pub fn from_raw(
        device: &Rc<dyn RenderDevice>,
        width: u32,
        height: u32,
        channels: u32,
        data: &[u8],
    ) -> Result<Self, RenderError> {
        let format = TextureFormat::from_channels(channels).ok_or_else(|| {
            RenderError::InvalidTextureData(format!("unsupported channel count {}", channels))
        })?;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTextureData(format!(
                "empty texture {}x{}",
                width, height
            )));
        }
        check_data_len(width, height, format, data)?;

        let id = device.create_texture(width, height, format, data)?;
        Ok(Self {
            device: Rc::clone(device),
            id,
            width,
            height,
            format,
        })
    }

    //--- Editing ----------------------------------------------------------

    /// Replaces the `width`×`height` rectangle at (`x`, `y`).
    ///
    /// `data` uses this texture's channel count.
    pub fn edit(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<(), RenderError> {
        let fits = |start: u32, len: u32, limit: u32| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(x, width, self.width) || !fits(y, height, self.height) {
            return Err(RenderError::InvalidTextureData(format!(
                "region {}x{} at ({}, {}) exceeds {}x{} texture",
                width, height, x, y, self.width, self.height
            )));
        }
        check_data_len(width, height, self.format, data)?;

        self.device
            .update_texture(self.id, x, y, width, height, self.format, data);
        Ok(())
    }

    //--- Binding ----------------------------------------------------------

    /// Binds to texture unit `slot`.
    pub fn bind(&self, slot: u32) {
        self.device.bind_texture(slot, Some(self.id));
    }

    pub fn unbind(&self, slot: u32) {
        self.device.bind_texture(slot, None);
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> RenderId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u32 {
        self.format.channels()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.device.delete_texture(self.id);
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

//=== Internal Helpers ====================================================

fn into_pixels(image: DynamicImage) -> (u32, Vec<u8>) {
    if image.color().has_alpha() {
        (4, image.into_rgba8().into_raw())
    } else {
        (3, image.into_rgb8().into_raw())
    }
}

fn check_data_len(
    width: u32,
    height: u32,
    format: TextureFormat,
    data: &[u8],
) -> Result<(), RenderError> {
    let expected = width as usize * height as usize * format.channels() as usize;
    if data.len() != expected {
        return Err(RenderError::InvalidTextureData(format!(
            "expected {} bytes for {}x{} {:?}, got {}",
            expected,
            width,
            height,
            format,
            data.len()
        )));
    }
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
