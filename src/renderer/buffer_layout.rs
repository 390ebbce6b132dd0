//=========================================================================
// Buffer Layout
//
// Byte layout of one vertex record, independent of any GPU API.
//
// Offsets are a left-to-right prefix sum of element sizes in declaration
// order. Stride is either fixed explicitly at construction or the sum of
// all element sizes, recomputed whenever an element is appended.
//
// Example:
// ```text
//  {Float3, Float3, Float2}
//   offset  0        12       24      stride 32
// ```
//
//=========================================================================

use crate::renderer::ShaderDataType;

//=== BufferElement =======================================================

/// One vertex attribute of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferElement {
    data_type: ShaderDataType,
    size: u32,
    offset: u32,
    normalized: bool,
}

impl BufferElement {
    pub fn new(data_type: ShaderDataType) -> Self {
        Self::with_normalized(data_type, false)
    }

    pub fn normalized(data_type: ShaderDataType) -> Self {
        Self::with_normalized(data_type, true)
    }

    pub fn with_normalized(data_type: ShaderDataType, normalized: bool) -> Self {
        Self {
            data_type,
            size: data_type.size(),
            offset: 0,
            normalized,
        }
    }

    pub fn data_type(&self) -> ShaderDataType {
        self.data_type
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Byte offset within the vertex; `0` until placed in a layout.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn component_count(&self) -> u32 {
        self.data_type.component_count()
    }
}

impl From<ShaderDataType> for BufferElement {
    fn from(data_type: ShaderDataType) -> Self {
        Self::new(data_type)
    }
}

impl From<(ShaderDataType, bool)> for BufferElement {
    fn from((data_type, normalized): (ShaderDataType, bool)) -> Self {
        Self::with_normalized(data_type, normalized)
    }
}

//=== BufferLayout ========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
    explicit_stride: Option<u32>,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layout from an ordered element list.
    pub fn from_elements<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BufferElement>,
    {
        let mut layout = Self {
            elements: elements.into_iter().map(Into::into).collect(),
            stride: 0,
            explicit_stride: None,
        };
        layout.calc_stride_and_offsets();
        layout
    }

    /// Builds a layout whose stride is fixed to `stride` regardless of the
    /// element sizes (interleaved data with padding or foreign attributes).
    pub fn with_stride<I, E>(elements: I, stride: u32) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BufferElement>,
    {
        let mut layout = Self::from_elements(elements);
        layout.explicit_stride = Some(stride);
        layout.stride = stride;
        layout
    }

    /// Appends an element and recomputes every offset (and the stride,
    /// unless it was fixed explicitly).
    pub fn add_element(&mut self, element: impl Into<BufferElement>) {
        self.elements.push(element.into());
        self.calc_stride_and_offsets();
    }

    //--- Queries ----------------------------------------------------------

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BufferElement> {
        self.elements.iter()
    }

    //--- Internal Helpers -------------------------------------------------

    fn calc_stride_and_offsets(&mut self) {
        let mut offset = 0;
        for element in &mut self.elements {
            element.offset = offset;
            offset += element.size;
        }
        self.stride = self.explicit_stride.unwrap_or(offset);
    }
}

impl<'a> IntoIterator for &'a BufferLayout {
    type Item = &'a BufferElement;
    type IntoIter = std::slice::Iter<'a, BufferElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E: Into<BufferElement>> FromIterator<E> for BufferLayout {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
