//! Font descriptions and the glyph rendering seam used by the probe

use crate::Result;
use crate::constants::DEFAULT_FONT_SIZE;
use tiny_skia::Pixmap;

/// Face variant requested from the font source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// A resolved font: family name, size in points and style
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub point_size: f32,
    pub style: FontStyle,
}

impl FontSpec {
    /// Create a regular font spec of the given size
    pub fn new<S: Into<String>>(family: S, point_size: f32) -> Self {
        Self {
            family: family.into(),
            point_size,
            style: FontStyle::Regular,
        }
    }

    /// Theme body font: the family at the default 11pt size
    pub fn body<S: Into<String>>(family: S) -> Self {
        Self::new(family, DEFAULT_FONT_SIZE)
    }

    /// Set the style
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Size of an em in device pixels for a given horizontal resolution
    pub fn pixel_size(&self, horizontal_dpi: f32) -> f32 {
        self.point_size * horizontal_dpi / 72.0
    }
}

/// Renders and measures glyphs for one font at one pixel size.
///
/// This is the "platform" side of the probe: `text_width` plays the role of
/// the text measurement API and `draw_char` puts ink onto the probe raster.
pub trait GlyphRasterizer {
    /// Em size in device pixels this rasterizer was opened at
    fn pixel_size(&self) -> f32;

    /// Advance width of `text` in fractional device pixels
    fn text_width(&self, text: &str) -> f32;

    /// Draw `ch` in opaque black with its baseline origin at `origin`
    fn draw_char(&self, canvas: &mut Pixmap, ch: char, origin: (f32, f32)) -> Result<()>;
}

#[cfg(feature = "ttf-parser")]
pub use ttf::TtfFont;

#[cfg(feature = "ttf-parser")]
mod ttf {
    use super::GlyphRasterizer;
    use crate::Result;
    use crate::error::SizingError;
    use std::sync::Arc;
    use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};
    use tracing::trace;

    /// Collects `ttf_parser` outline commands into a tiny-skia path
    struct OutlinePathBuilder(PathBuilder);

    impl ttf_parser::OutlineBuilder for OutlinePathBuilder {
        fn move_to(&mut self, x: f32, y: f32) {
            self.0.move_to(x, y);
        }

        fn line_to(&mut self, x: f32, y: f32) {
            self.0.line_to(x, y);
        }

        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            self.0.quad_to(x1, y1, x, y);
        }

        fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
            self.0.cubic_to(x1, y1, x2, y2, x, y);
        }

        fn close(&mut self) {
            self.0.close();
        }
    }

    /// TrueType/OpenType glyph rasterizer built on ttf-parser and tiny-skia.
    ///
    /// Shares the font data and parses it on demand; advances come from the
    /// `hmtx` table without shaping or kerning.
    pub struct TtfFont {
        font_data: Arc<[u8]>,
        face_index: u32,
        units_per_em: f32,
        pixel_size: f32,
    }

    impl TtfFont {
        /// Parse TTF/OTF/TTC data and prepare it for rendering at `pixel_size`
        pub fn new(
            font_data: impl Into<Arc<[u8]>>,
            face_index: u32,
            pixel_size: f32,
        ) -> Result<Self> {
            let font_data = font_data.into();
            if !pixel_size.is_finite() || pixel_size <= 0.0 {
                return Err(SizingError::InvalidArgument(format!(
                    "pixel size must be positive, got {pixel_size}"
                )));
            }
            let face = ttf_parser::Face::parse(&font_data, face_index)
                .map_err(|e| SizingError::MetricProbe(format!("Failed to parse font: {e}")))?;
            let units_per_em = face.units_per_em() as f32;
            Ok(Self {
                font_data,
                face_index,
                units_per_em,
                pixel_size,
            })
        }

        fn face(&self) -> Result<ttf_parser::Face<'_>> {
            ttf_parser::Face::parse(&self.font_data, self.face_index)
                .map_err(|e| SizingError::MetricProbe(format!("Failed to parse font: {e}")))
        }

        fn scale(&self) -> f32 {
            self.pixel_size / self.units_per_em
        }

        fn glyph_path(&self, face: &ttf_parser::Face<'_>, ch: char) -> Result<Option<Path>> {
            let glyph = face.glyph_index(ch).ok_or_else(|| {
                SizingError::MetricProbe(format!("Font has no glyph for {ch:?}"))
            })?;
            let mut builder = OutlinePathBuilder(PathBuilder::new());
            if face.outline_glyph(glyph, &mut builder).is_none() {
                return Ok(None);
            }
            Ok(builder.0.finish())
        }
    }

    impl GlyphRasterizer for TtfFont {
        fn pixel_size(&self) -> f32 {
            self.pixel_size
        }

        fn text_width(&self, text: &str) -> f32 {
            let Ok(face) = self.face() else {
                return 0.0;
            };
            let units: f32 = text
                .chars()
                .filter_map(|ch| face.glyph_index(ch))
                .filter_map(|gid| face.glyph_hor_advance(gid))
                .map(f32::from)
                .sum();
            units * self.scale()
        }

        fn draw_char(&self, canvas: &mut Pixmap, ch: char, origin: (f32, f32)) -> Result<()> {
            let face = self.face()?;
            let Some(path) = self.glyph_path(&face, ch)? else {
                trace!("Glyph {:?} has no outline", ch);
                return Ok(());
            };

            let mut paint = Paint::default();
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.anti_alias = true;

            // Font units are Y-up; flip into the raster's Y-down space.
            let scale = self.scale();
            let transform = Transform::from_row(scale, 0.0, 0.0, -scale, origin.0, origin.1);
            canvas.fill_path(&path, &paint, FillRule::Winding, transform, None);
            Ok(())
        }
    }

    impl std::fmt::Debug for TtfFont {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TtfFont")
                .field("units_per_em", &self.units_per_em)
                .field("pixel_size", &self.pixel_size)
                .field("font_data_len", &self.font_data.len())
                .finish()
        }
    }
}
