/// Kind of data an attribute describes.
///
/// | type         | components | bytes |
/// |--------------|-----------:|------:|
/// | Position2d   | 2          | 8     |
/// | Position3d   | 3          | 12    |
/// | Normal       | 3          | 12    |
/// | Color        | 4          | 16    |
/// | TextureMap   | 2          | 8     |
/// | Uniform      | 1          | 1     |
/// | Storage      | 1          | 1     |
/// | IndexByte    | 1          | 1     |
/// | IndexShort   | 1          | 2     |
/// | IndexInt     | 1          | 4     |
///
/// `Uniform` and `Storage` blocks are laid out by the shader (std140/std430);
/// their buffers are addressed byte-wise.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttributeType {
    Position2d,
    Position3d,
    Normal,
    Color,
    TextureMap,
    Uniform,
    Storage,
    IndexByte,
    IndexShort,
    IndexInt,
}

impl AttributeType {
    pub const fn component_count(self) -> usize {
        match self {
            AttributeType::Position2d => 2,
            AttributeType::Position3d => 3,
            AttributeType::Normal => 3,
            AttributeType::Color => 4,
            AttributeType::TextureMap => 2,
            _ => 1,
        }
    }

    /// Size of one element of this attribute in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            AttributeType::Position2d => 8,
            AttributeType::Position3d => 12,
            AttributeType::Normal => 12,
            AttributeType::Color => 16,
            AttributeType::TextureMap => 8,
            AttributeType::IndexByte => 1,
            AttributeType::IndexShort => 2,
            AttributeType::IndexInt => 4,
            AttributeType::Uniform | AttributeType::Storage => 1,
        }
    }
}

/// Named attribute inside an interleaved buffer.
///
/// `name` must match the shader input it feeds. `offset` is assigned by
/// `BufferFormat::new`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BufferAttribute {
    pub ty: AttributeType,
    pub name: String,
    pub offset: usize,
}

impl BufferAttribute {
    pub fn new(ty: AttributeType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            offset: 0,
        }
    }

    pub fn component_count(&self) -> usize {
        self.ty.component_count()
    }

    pub fn size(&self) -> usize {
        self.ty.bytes()
    }
}

/// Ordered attribute list with byte offsets and a total stride.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct BufferFormat {
    attributes: Vec<BufferAttribute>,
    stride: usize,
}

impl BufferFormat {
    /// Builds a format, assigning each attribute the sum of the sizes before it.
    pub fn new(attributes: impl IntoIterator<Item = BufferAttribute>) -> Self {
        let mut offset = 0;
        let attributes: Vec<_> = attributes
            .into_iter()
            .map(|mut a| {
                a.offset = offset;
                offset += a.size();
                a
            })
            .collect();

        Self {
            attributes,
            stride: offset,
        }
    }

    pub fn attributes(&self) -> &[BufferAttribute] {
        &self.attributes
    }

    /// Distance in bytes between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Host access granted to a buffer's memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BufferAccess {
    /// Written once at creation; not mapped.
    #[default]
    Static,
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl BufferAccess {
    /// Non-static buffers stay persistently mapped.
    pub fn is_mapped(self) -> bool {
        !matches!(self, BufferAccess::Static)
    }

    pub fn is_readable(self) -> bool {
        matches!(self, BufferAccess::ReadOnly | BufferAccess::ReadWrite)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, BufferAccess::WriteOnly | BufferAccess::ReadWrite)
    }
}

/// Element type of an index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum IndexType {
    /// No index buffer; draws consume vertices in order.
    #[default]
    None,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
}

impl IndexType {
    pub fn attribute_type(self) -> Option<AttributeType> {
        match self {
            IndexType::None => None,
            IndexType::UnsignedByte => Some(AttributeType::IndexByte),
            IndexType::UnsignedShort => Some(AttributeType::IndexShort),
            IndexType::UnsignedInt => Some(AttributeType::IndexInt),
        }
    }

    /// Single-attribute format for an index buffer of this type.
    pub fn format(self) -> Option<BufferFormat> {
        self.attribute_type()
            .map(|ty| BufferFormat::new([BufferAttribute::new(ty, "index")]))
    }
}

/// Primitive assembly mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DrawMethod {
    /// Nothing is drawn.
    None,
    Points,
    Lines,
    LineStrip,
    LineLoop,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── attribute sizes ──────────────────────────────────────────────────

    #[test]
    fn attribute_byte_sizes() {
        assert_eq!(AttributeType::Position2d.bytes(), 8);
        assert_eq!(AttributeType::Position3d.bytes(), 12);
        assert_eq!(AttributeType::Normal.bytes(), 12);
        assert_eq!(AttributeType::Color.bytes(), 16);
        assert_eq!(AttributeType::TextureMap.bytes(), 8);
        assert_eq!(AttributeType::Storage.bytes(), 1);
        assert_eq!(AttributeType::IndexShort.bytes(), 2);
        assert_eq!(AttributeType::IndexInt.bytes(), 4);
    }

    #[test]
    fn component_counts() {
        assert_eq!(AttributeType::Color.component_count(), 4);
        assert_eq!(AttributeType::TextureMap.component_count(), 2);
        assert_eq!(AttributeType::Uniform.component_count(), 1);
    }

    // ── format layout ────────────────────────────────────────────────────

    #[test]
    fn interleaved_format_offsets_and_stride() {
        let f = BufferFormat::new([
            BufferAttribute::new(AttributeType::Position3d, "a_position"),
            BufferAttribute::new(AttributeType::Normal, "a_normal"),
            BufferAttribute::new(AttributeType::TextureMap, "a_uv"),
        ]);

        let offsets: Vec<usize> = f.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
        assert_eq!(f.stride(), 32);
    }

    #[test]
    fn empty_format_has_zero_stride() {
        let f = BufferFormat::new([]);
        assert_eq!(f.stride(), 0);
        assert!(f.attributes().is_empty());
    }

    #[test]
    fn attribute_lookup_by_name() {
        let f = BufferFormat::new([
            BufferAttribute::new(AttributeType::Position2d, "a_position"),
            BufferAttribute::new(AttributeType::Color, "a_color"),
        ]);
        assert_eq!(f.attribute("a_color").map(|a| a.offset), Some(8));
        assert!(f.attribute("a_normal").is_none());
    }

    #[test]
    fn index_formats_match_index_width() {
        assert!(IndexType::None.format().is_none());
        assert_eq!(IndexType::UnsignedShort.format().map(|f| f.stride()), Some(2));
        assert_eq!(IndexType::UnsignedInt.format().map(|f| f.stride()), Some(4));
    }

    #[test]
    fn access_modes() {
        assert!(!BufferAccess::Static.is_mapped());
        assert!(BufferAccess::ReadOnly.is_readable());
        assert!(!BufferAccess::ReadOnly.is_writable());
        assert!(BufferAccess::WriteOnly.is_writable());
        assert!(!BufferAccess::WriteOnly.is_readable());
        assert!(BufferAccess::ReadWrite.is_readable() && BufferAccess::ReadWrite.is_writable());
    }
}
