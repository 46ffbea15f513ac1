/// Texel layout of a texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    R32f,
    Rg32f,
    Rgb32f,
    Rgba32f,
    /// Single 32-bit float channel holding framebuffer depth.
    Depth,
}

impl TextureFormat {
    pub const fn channels(self) -> usize {
        match self {
            TextureFormat::R8 | TextureFormat::R32f | TextureFormat::Depth => 1,
            TextureFormat::Rg8 | TextureFormat::Rg32f => 2,
            TextureFormat::Rgb8 | TextureFormat::Rgb32f => 3,
            TextureFormat::Rgba8 | TextureFormat::Rgba32f => 4,
        }
    }
}

/// Backend-owned 2D texture. Dropping the value releases the handle.
pub trait Texture {
    fn id(&self) -> u32;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> TextureFormat;
}
