//! Backends for tests.

use crate::backend::{
    DrawCall, FontBackend, FontError, GlyphBitmap, GlyphMetrics, ImageHandle, ImageLayout,
    LineMetrics, MemoryHandle, PushConstants, RenderBackend, RenderError, RenderTarget,
    TextureBackend, TextureError, TextureInfo, ViewHandle,
};
use crate::component::ComponentId;
use crate::config::Theme;
use crate::context::Context;
use crate::rect::TexelExtent;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Installs a test logger once; later calls do nothing.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A context on an 800×600 screen with block glyphs and counted textures.
pub fn context() -> Context {
    context_with_textures().0
}

pub fn context_with_textures() -> (Context, CountingTextures) {
    let textures = CountingTextures::new();
    (context_with(textures.clone()), textures)
}

pub fn context_with(textures: CountingTextures) -> Context {
    init_logging();
    Context::new(
        Theme::default().with_screen(800., 600.),
        Box::new(textures),
        Box::new(BlockFont::new()),
    )
}

/// A font whose glyphs are solid 10×20 blocks.
///
/// Line metrics are fixed at ascender 24, descender -8 and height 32 regardless of pixel size.
/// `'A'` has coverage 255, other glyphs 100. Spaces are blank, non-ASCII characters are missing.
#[derive(Debug, Clone)]
pub struct BlockFont {
    pub pixel_size: u32,
    advance: f32,
}

impl BlockFont {
    pub fn new() -> BlockFont {
        BlockFont {
            pixel_size: 0,
            advance: 12.,
        }
    }

    /// Glyphs advance by 6, so neighbors overlap by four columns.
    pub fn overlapping() -> BlockFont {
        BlockFont {
            advance: 6.,
            ..BlockFont::new()
        }
    }
}

impl FontBackend for BlockFont {
    fn set_pixel_size(&mut self, pixel_size: u32) -> Result<(), FontError> {
        self.pixel_size = pixel_size;
        Ok(())
    }

    fn line_metrics(&self) -> Result<LineMetrics, FontError> {
        Ok(LineMetrics {
            ascender: 24.,
            descender: -8.,
            height: 32.,
        })
    }

    fn glyph_metrics(&mut self, c: char) -> Result<GlyphMetrics, FontError> {
        if !c.is_ascii() {
            return Err(FontError::GlyphNotFound(c));
        }
        if c == ' ' {
            return Ok(GlyphMetrics {
                advance: 8.,
                bearing_x: 0.,
                bearing_y: 0.,
            });
        }
        Ok(GlyphMetrics {
            advance: self.advance,
            bearing_x: 1.,
            bearing_y: 20.,
        })
    }

    fn rasterize(&mut self, c: char) -> Result<GlyphBitmap, FontError> {
        let metrics = self.glyph_metrics(c)?;
        if c == ' ' {
            return Ok(GlyphBitmap {
                metrics,
                ..GlyphBitmap::default()
            });
        }
        let value = if c == 'A' { 255 } else { 100 };
        Ok(GlyphBitmap {
            metrics,
            width: 10,
            rows: 20,
            coverage: vec![value; 200],
        })
    }
}

#[derive(Debug, Default)]
struct TextureLog {
    next: u64,
    loads: usize,
    destroyed: HashMap<ImageHandle, usize>,
    failing: bool,
}

/// Hands out fresh handles and counts destroys. Clones share their counts.
#[derive(Debug, Clone, Default)]
pub struct CountingTextures(Arc<Mutex<TextureLog>>);

impl CountingTextures {
    pub fn new() -> CountingTextures {
        CountingTextures::default()
    }

    /// Fails every upload.
    pub fn failing() -> CountingTextures {
        let textures = CountingTextures::new();
        textures.0.lock().failing = true;
        textures
    }

    pub fn loads(&self) -> usize {
        self.0.lock().loads
    }

    pub fn destroyed(&self, image: ImageHandle) -> usize {
        self.0.lock().destroyed.get(&image).copied().unwrap_or(0)
    }

    pub fn total_destroyed(&self) -> usize {
        self.0.lock().destroyed.values().sum()
    }
}

impl TextureBackend for CountingTextures {
    fn load(&mut self, extent: TexelExtent, _: &[u8]) -> Result<TextureInfo, TextureError> {
        let mut log = self.0.lock();
        if log.failing {
            return Err(TextureError::Upload("refused by test backend".into()));
        }
        log.next += 1;
        log.loads += 1;
        Ok(TextureInfo {
            image: Some(ImageHandle(log.next)),
            memory: Some(MemoryHandle(log.next)),
            view: Some(ViewHandle(log.next)),
            extent,
            layout: ImageLayout::ShaderReadOnly,
        })
    }

    fn destroy(&mut self, texture: &TextureInfo) {
        if let Some(image) = texture.image {
            *self.0.lock().destroyed.entry(image).or_insert(0) += 1;
        }
    }
}

/// One recorded draw.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    pub id: ComponentId,
    pub push: PushConstants,
    pub texture: Option<TextureInfo>,
    pub target: RenderTarget,
}

/// Records every draw call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RecordedDraw>,
}

impl RecordingRenderer {
    pub fn ids(&self) -> Vec<ComponentId> {
        self.calls.iter().map(|call| call.id).collect()
    }
}

impl RenderBackend for RecordingRenderer {
    fn draw(&mut self, call: &DrawCall<'_>, target: RenderTarget) -> Result<(), RenderError> {
        self.calls.push(RecordedDraw {
            id: call.id,
            push: call.push,
            texture: call.texture.copied(),
            target,
        });
        Ok(())
    }
}
