//! Text rendered into a coverage texture.

use crate::backend::{
    DescriptorHandle, DrawCall, FontBackend, FontError, GlyphBitmap, PushFlags, TextureInfo,
};
use crate::component::Component;
use crate::context::Context;
use crate::error::Error;
use crate::image::Image;
use crate::impl_component;
use crate::rect::{Coord, TexelExtent};
use cgmath::{Point2, Vector2};

/// A string rendered into a texture.
///
/// The texture is regenerated from scratch whenever the string or the descriptor changes, and the
/// extent follows the rendered size.
#[derive(Debug, Clone)]
pub struct Text {
    image: Image,
    text: String,
    context: Context,
}

impl Text {
    pub fn new(ctx: &Context, text: &str) -> Result<Text, Error> {
        Text::at(ctx, text, Point2::new(0., 0.))
    }

    pub fn at(ctx: &Context, text: &str, pos: Coord) -> Result<Text, Error> {
        let mut node = Text {
            image: Image::at(ctx, pos),
            text: text.to_string(),
            context: ctx.clone(),
        };
        node.regenerate()?;
        Ok(node)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), Error> {
        self.text.clear();
        self.text.push_str(text);
        self.regenerate()
    }

    pub fn tex(&self) -> &TextureInfo {
        self.image.tex()
    }

    fn regenerate(&mut self) -> Result<(), Error> {
        let text_config = self.context.theme().text;
        let raster = {
            let mut font = self.context.fonts().lock();
            rasterize(&mut **font, &self.text, text_config.pixel_size)?
        };
        log::debug!("rasterized {:?} into {:?}", self.text, raster.extent);

        if raster.extent.is_empty() {
            self.image.set_tex(self.context.no_texture());
        } else {
            let tex = self
                .context
                .textures()
                .load(raster.extent, &raster.coverage)?;
            self.image.set_tex(tex);
        }
        self.image.base.ext = raster.extent.to_extent() * text_config.display_scale;
        Ok(())
    }
}

impl_component! {
    Text => image.base;

    fn set_descriptor(&mut self, descriptor: DescriptorHandle) -> Result<(), Error> {
        self.image.base.descriptor = descriptor;
        self.regenerate()
    }

    fn draw_call(&self) -> DrawCall<'_> {
        let mut call = self.image.draw_call();
        call.push.flags.set(PushFlags::BLEND);
        call
    }
}

/// A rendered coverage buffer, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub extent: TexelExtent,
    pub coverage: Vec<u8>,
}

/// Renders a string into a single-channel coverage buffer.
///
/// Lines are split at `'\n'`. The buffer is as wide as the widest line and one line height tall
/// per line. Advances and bearings stay fractional; each glyph is placed at its rounded position
/// and overlapping glyphs keep the brighter texel. Glyphs the font lacks take half the pixel size
/// and draw nothing.
pub fn rasterize(
    font: &mut dyn FontBackend,
    text: &str,
    pixel_size: u32,
) -> Result<Raster, FontError> {
    font.set_pixel_size(pixel_size)?;
    let line = font.line_metrics()?;
    let placeholder = pixel_size as f32 / 2.;

    let mut widest: f32 = 0.;
    let mut width: f32 = 0.;
    let mut lines = 1;
    for c in text.chars() {
        if c == '\n' {
            widest = widest.max(width);
            width = 0.;
            lines += 1;
            continue;
        }
        width += match font.glyph_metrics(c) {
            Ok(metrics) => metrics.advance,
            Err(FontError::GlyphNotFound(_)) => placeholder,
            Err(err) => return Err(err),
        };
    }
    widest = widest.max(width);

    let extent = TexelExtent::new(
        widest.ceil() as u32,
        (lines as f32 * line.height).ceil() as u32,
    );
    let mut coverage = vec![0; extent.area()];

    let mut pen = Point2::new(0., extent.height as f32 - line.ascender);
    for c in text.chars() {
        if c == '\n' {
            pen.y -= line.height;
            pen.x = 0.;
            continue;
        }
        let glyph = match font.rasterize(c) {
            Ok(glyph) => glyph,
            Err(FontError::GlyphNotFound(c)) => {
                log::warn!("no glyph for {:?}, leaving a gap", c);
                pen.x += placeholder;
                continue;
            }
            Err(err) => return Err(err),
        };
        let metrics = glyph.metrics;
        pen += Vector2::new(metrics.bearing_x, metrics.bearing_y);
        stamp(&mut coverage, extent, &glyph, pen);
        pen += Vector2::new(metrics.advance - metrics.bearing_x, -metrics.bearing_y);
    }

    Ok(Raster { extent, coverage })
}

/// Max-blends a glyph into the buffer with its top left corner at `corner`, clipping at the edges.
fn stamp(coverage: &mut [u8], extent: TexelExtent, glyph: &GlyphBitmap, corner: Coord) {
    if glyph.width == 0 {
        return;
    }
    let (width, height) = (extent.width as i64, extent.height as i64);
    let left = corner.x.round() as i64;
    let top = corner.y.round() as i64 - 1;

    for (row, texels) in glyph
        .coverage
        .chunks_exact(glyph.width)
        .take(glyph.rows)
        .enumerate()
    {
        let y = top - row as i64;
        if y < 0 || y >= height {
            continue;
        }
        for (col, &value) in texels.iter().enumerate() {
            let x = left + col as i64;
            if x < 0 || x >= width {
                continue;
            }
            let texel = &mut coverage[(y * width + x) as usize];
            *texel = (*texel).max(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{PushFlags, RenderTarget};
    use crate::testing::{self, BlockFont, CountingTextures, RecordingRenderer};

    fn texel(raster: &Raster, x: u32, y: u32) -> u8 {
        raster.coverage[(y * raster.extent.width + x) as usize]
    }

    #[test]
    fn single_glyph_sits_on_the_baseline() {
        let raster = rasterize(&mut BlockFont::new(), "A", 32).unwrap();
        assert_eq!(raster.extent, TexelExtent::new(12, 32));

        // baseline at 32 - 24 = 8, glyph top at 8 + 20 = 28
        assert_eq!(texel(&raster, 1, 27), 255);
        assert_eq!(texel(&raster, 10, 8), 255);
        assert_eq!(texel(&raster, 0, 27), 0);
        assert_eq!(texel(&raster, 11, 27), 0);
        assert_eq!(texel(&raster, 1, 28), 0);
        assert_eq!(texel(&raster, 1, 7), 0);
    }

    #[test]
    fn lines_stack_downwards() {
        let raster = rasterize(&mut BlockFont::new(), "AB\nA", 32).unwrap();
        assert_eq!(raster.extent, TexelExtent::new(24, 64));

        // first line's baseline at 64 - 24 = 40, second one at 8
        assert_eq!(texel(&raster, 1, 59), 255);
        assert_eq!(texel(&raster, 13, 59), 100);
        assert_eq!(texel(&raster, 1, 27), 255);
        assert_eq!(texel(&raster, 13, 27), 0);
    }

    #[test]
    fn overlapping_glyphs_keep_the_brighter_texel() {
        let mut font = BlockFont::overlapping();
        let ab = rasterize(&mut font, "AB", 32).unwrap();
        let ba = rasterize(&mut font, "BA", 32).unwrap();
        assert_eq!(ab.extent, TexelExtent::new(12, 32));

        // the glyphs overlap in columns 7..=10
        assert_eq!(texel(&ab, 8, 27), 255);
        assert_eq!(texel(&ba, 8, 27), 255);
        assert_eq!(texel(&ba, 2, 27), 100);
        // the second glyph is clipped at the right edge
        assert_eq!(texel(&ab, 11, 27), 100);
    }

    #[test]
    fn missing_glyphs_leave_a_gap() {
        let raster = rasterize(&mut BlockFont::new(), "A\u{1F600}A", 32).unwrap();
        assert_eq!(raster.extent, TexelExtent::new(40, 32));
        assert_eq!(texel(&raster, 20, 20), 0);
        assert_eq!(texel(&raster, 28, 27), 0);
        assert_eq!(texel(&raster, 29, 27), 255);
    }

    #[test]
    fn blank_glyphs_only_advance() {
        let raster = rasterize(&mut BlockFont::new(), "A A", 32).unwrap();
        assert_eq!(raster.extent, TexelExtent::new(32, 32));
        assert!((12..21).all(|x| texel(&raster, x, 20) == 0));
        assert_eq!(texel(&raster, 21, 20), 255);
    }

    #[test]
    fn text_regenerates_on_change() {
        let (ctx, textures) = testing::context_with_textures();
        let mut text = Text::new(&ctx, "").unwrap();
        assert!(text.tex().is_null());
        assert_eq!(text.ext(), Vector2::new(0., 32.));
        assert_eq!(textures.loads(), 0);

        text.set_text("A").unwrap();
        assert!(text.ext().x >= 12. && text.ext().y >= 32.);
        let first = *text.tex();

        text.set_text("A").unwrap();
        assert_eq!(text.ext(), Vector2::new(12., 32.));
        assert_eq!(textures.loads(), 2);
        assert_eq!(text.tex().extent, first.extent);
        assert_eq!(textures.destroyed(first.image.unwrap()), 1);

        text.set_descriptor(DescriptorHandle(3)).unwrap();
        assert_eq!(text.descriptor(), DescriptorHandle(3));
        assert_eq!(textures.loads(), 3);
        assert_eq!(textures.total_destroyed(), 2);

        text.set_text("").unwrap();
        assert!(text.tex().is_null());
        assert_eq!(textures.total_destroyed(), 3);
    }

    #[test]
    fn copies_share_the_texture() {
        let (ctx, textures) = testing::context_with_textures();
        let text = Text::new(&ctx, "hello").unwrap();
        let copy = text.clone();
        assert_eq!(copy.tex(), text.tex());
        assert_eq!(copy.text(), "hello");
        drop(text);
        assert_eq!(textures.total_destroyed(), 0);
        drop(copy);
        assert_eq!(textures.total_destroyed(), 1);
    }

    #[test]
    fn display_scale_applies_to_the_extent() {
        let mut theme = crate::Theme::default().with_screen(800., 600.);
        theme.text.display_scale = 0.5;
        let ctx = Context::new(
            theme,
            Box::new(CountingTextures::new()),
            Box::new(BlockFont::new()),
        );
        let text = Text::new(&ctx, "AB").unwrap();
        assert_eq!(text.ext(), Vector2::new(12., 16.));
        assert_eq!(text.tex().extent, TexelExtent::new(24, 32));
    }

    #[test]
    fn upload_failures_surface() {
        let ctx = testing::context_with(CountingTextures::failing());
        match Text::new(&ctx, "A") {
            Err(Error::Texture(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn draws_blended() {
        let ctx = testing::context();
        let mut renderer = RecordingRenderer::default();
        Text::new(&ctx, "A")
            .unwrap()
            .draw(&mut renderer, RenderTarget(0))
            .unwrap();
        let flags = renderer.calls[0].push.flags;
        assert!(flags.has(PushFlags::BLEND) && flags.has(PushFlags::TEXTURE));
    }
}
