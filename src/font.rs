//! Font backend built on fontdue.

use crate::backend::{FontBackend, FontError, GlyphBitmap, GlyphMetrics, LineMetrics};
use fontdue::{Font, FontSettings};

/// Rasterizes glyphs from a single font face.
pub struct FontdueBackend {
    font: Font,
    pixel_size: f32,
}

impl FontdueBackend {
    /// Parses a font file (TTF/OTF bytes).
    ///
    /// - `collection_index`: face index inside a font collection, 0 otherwise
    pub fn from_bytes(bytes: &[u8], collection_index: u32) -> Result<FontdueBackend, FontError> {
        let settings = FontSettings {
            collection_index,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|err| FontError::Load(err.to_string()))?;
        Ok(FontdueBackend {
            font,
            pixel_size: 32.,
        })
    }

    fn lookup(&self, c: char) -> Result<(), FontError> {
        if self.font.lookup_glyph_index(c) == 0 {
            Err(FontError::GlyphNotFound(c))
        } else {
            Ok(())
        }
    }

    fn convert(metrics: &fontdue::Metrics) -> GlyphMetrics {
        GlyphMetrics {
            advance: metrics.advance_width,
            bearing_x: metrics.xmin as f32,
            // ymin is the bottom edge relative to the baseline
            bearing_y: (metrics.ymin + metrics.height as i32) as f32,
        }
    }
}

impl FontBackend for FontdueBackend {
    fn set_pixel_size(&mut self, pixel_size: u32) -> Result<(), FontError> {
        self.pixel_size = pixel_size as f32;
        Ok(())
    }

    fn line_metrics(&self) -> Result<LineMetrics, FontError> {
        let metrics = self
            .font
            .horizontal_line_metrics(self.pixel_size)
            .ok_or(FontError::NoLineMetrics)?;
        Ok(LineMetrics {
            ascender: metrics.ascent,
            descender: metrics.descent,
            height: metrics.new_line_size,
        })
    }

    fn glyph_metrics(&mut self, c: char) -> Result<GlyphMetrics, FontError> {
        self.lookup(c)?;
        Ok(Self::convert(&self.font.metrics(c, self.pixel_size)))
    }

    fn rasterize(&mut self, c: char) -> Result<GlyphBitmap, FontError> {
        self.lookup(c)?;
        let (metrics, coverage) = self.font.rasterize(c, self.pixel_size);
        Ok(GlyphBitmap {
            metrics: Self::convert(&metrics),
            width: metrics.width,
            rows: metrics.height,
            coverage,
        })
    }
}
