//! Traits for backends.
//!
//! The tree never talks to a GPU or a font file directly. Drawing, texture uploads and glyph
//! lookups go through the three traits in this module, which the host implements (or, for
//! fonts, takes from [`crate::font`]).

use crate::color::Color;
use crate::component::ComponentId;
use crate::rect::{Coord, Extent, TexelExtent};
use thiserror::Error;

macro_rules! handle {
    ($($(#[$attr:meta])* $name:ident;)+) => {
        $(
            $(#[$attr])*
            #[repr(transparent)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            pub struct $name(pub u64);
        )+
    }
}

handle! {
    /// A backend image.
    ImageHandle;
    /// Backend memory bound to an image.
    MemoryHandle;
    /// A backend view onto an image.
    ViewHandle;
    /// Binds a node’s resources (e.g. its texture) for drawing.
    DescriptorHandle;
    /// Whatever the backend records draw commands into; not owned by the tree.
    RenderTarget;
}

/// Opaque description of how a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelineStyle {
    pub pipeline: u64,
    pub layout: u64,
    pub descriptor_layout: u64,
}

/// Layout state of a backend image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayout {
    Undefined,
    TransferDst,
    ShaderReadOnly,
}

impl Default for ImageLayout {
    fn default() -> Self {
        ImageLayout::Undefined
    }
}

/// A reference to a texture owned by the texture backend.
///
/// `image` is `None` for "no texture"; such references are never reference-counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureInfo {
    pub image: Option<ImageHandle>,
    pub memory: Option<MemoryHandle>,
    pub view: Option<ViewHandle>,
    pub extent: TexelExtent,
    pub layout: ImageLayout,
}

impl TextureInfo {
    pub fn is_null(&self) -> bool {
        self.image.is_none()
    }
}

/// Per-draw flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PushFlags(u32);

impl PushFlags {
    pub const NONE: u32 = 0;
    /// Blend the coverage texture over the background.
    pub const BLEND: u32 = 1 << 0;
    /// Sample the node’s texture.
    pub const TEXTURE: u32 = 1 << 1;

    pub const fn new(bits: u32) -> Self {
        PushFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }
}

/// Per-draw data handed to the render backend.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushConstants {
    pub color: Color,
    pub position: Coord,
    pub extent: Extent,
    pub flags: PushFlags,
}

/// Everything the render backend needs to draw one node.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub id: ComponentId,
    pub push: PushConstants,
    pub style: &'a PipelineStyle,
    pub descriptor: DescriptorHandle,
    pub texture: Option<&'a TextureInfo>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("draw failed: {0}")]
    Draw(String),

    #[error("pipeline unavailable: {0:?}")]
    Pipeline(PipelineStyle),
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture of {0:?} texels could not be allocated")]
    Allocation(TexelExtent),

    #[error("coverage buffer holds {actual} texels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("texture upload failed: {0}")]
    Upload(String),
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("no glyph for {0:?}")]
    GlyphNotFound(char),

    #[error("font has no horizontal line metrics")]
    NoLineMetrics,

    #[error("failed to load font: {0}")]
    Load(String),
}

/// Draws nodes.
pub trait RenderBackend {
    /// Draws a single node into the target.
    fn draw(&mut self, call: &DrawCall<'_>, target: RenderTarget) -> Result<(), RenderError>;
}

/// Uploads and frees textures.
pub trait TextureBackend: Send {
    /// Uploads a single-channel coverage buffer of `extent` texels, row 0 at the bottom.
    fn load(&mut self, extent: TexelExtent, coverage: &[u8]) -> Result<TextureInfo, TextureError>;

    /// Frees a texture. Called once the last node using it lets go of it.
    fn destroy(&mut self, texture: &TextureInfo);
}

/// Font-wide metrics at the current pixel size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line.
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the line (usually negative).
    pub descender: f32,
    /// Distance between two consecutive baselines.
    pub height: f32,
}

/// Metrics of a single glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Horizontal distance from this glyph’s origin to the next one’s.
    pub advance: f32,
    /// Horizontal distance from the origin to the bitmap’s left edge.
    pub bearing_x: f32,
    /// Vertical distance from the baseline to the bitmap’s top edge.
    pub bearing_y: f32,
}

/// A rendered glyph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphBitmap {
    pub metrics: GlyphMetrics,
    pub width: usize,
    pub rows: usize,
    /// Coverage, `rows` rows of `width` texels, top row first.
    pub coverage: Vec<u8>,
}

/// Looks up and renders glyphs.
pub trait FontBackend: Send {
    /// Sets the size subsequent queries are answered at.
    fn set_pixel_size(&mut self, pixel_size: u32) -> Result<(), FontError>;

    fn line_metrics(&self) -> Result<LineMetrics, FontError>;

    fn glyph_metrics(&mut self, c: char) -> Result<GlyphMetrics, FontError>;

    fn rasterize(&mut self, c: char) -> Result<GlyphBitmap, FontError>;
}
