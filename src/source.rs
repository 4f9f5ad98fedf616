//! Font sources: resolving a `FontSpec` into a glyph rasterizer

use crate::Result;
use crate::font::{FontSpec, GlyphRasterizer};
use crate::units::DeviceContext;

/// Opens fonts for probing.
///
/// Implementations fail with `SizingError::MetricProbe` when the family cannot
/// be found or loaded; callers may retry with a substitute family.
pub trait FontSource {
    fn open(&self, font: &FontSpec, ctx: &DeviceContext) -> Result<Box<dyn GlyphRasterizer>>;
}

impl<S: FontSource + ?Sized> FontSource for &S {
    fn open(&self, font: &FontSpec, ctx: &DeviceContext) -> Result<Box<dyn GlyphRasterizer>> {
        (**self).open(font, ctx)
    }
}

#[cfg(feature = "ttf-parser")]
pub use memory::MemoryFontSource;

#[cfg(feature = "ttf-parser")]
mod memory {
    use super::FontSource;
    use crate::Result;
    use crate::error::SizingError;
    use crate::font::{FontSpec, FontStyle, GlyphRasterizer, TtfFont};
    use crate::units::DeviceContext;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tracing::debug;

    /// Font files supplied directly by the caller, keyed by family and style.
    ///
    /// A missing style falls back to the family's regular face.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryFontSource {
        faces: HashMap<(String, FontStyle), (Arc<[u8]>, u32)>,
    }

    impl MemoryFontSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register the regular face of a family
        pub fn with_font<S: Into<String>>(self, family: S, font_data: Vec<u8>) -> Self {
            self.with_face(family, FontStyle::Regular, font_data, 0)
        }

        /// Register a specific face (collection index for TTC data)
        pub fn with_face<S: Into<String>>(
            mut self,
            family: S,
            style: FontStyle,
            font_data: Vec<u8>,
            face_index: u32,
        ) -> Self {
            let key = (family.into().to_ascii_lowercase(), style);
            self.faces.insert(key, (font_data.into(), face_index));
            self
        }
    }

    impl FontSource for MemoryFontSource {
        fn open(
            &self,
            font: &FontSpec,
            ctx: &DeviceContext,
        ) -> Result<Box<dyn GlyphRasterizer>> {
            let family = font.family.to_ascii_lowercase();
            let (data, index) = self
                .faces
                .get(&(family.clone(), font.style))
                .or_else(|| self.faces.get(&(family, FontStyle::Regular)))
                .ok_or_else(|| {
                    SizingError::MetricProbe(format!("Font family '{}' not registered", font.family))
                })?;
            debug!("Opening in-memory face for '{}'", font.family);
            let pixel_size = font.pixel_size(ctx.horizontal_dpi);
            Ok(Box::new(TtfFont::new(Arc::clone(data), *index, pixel_size)?))
        }
    }
}

#[cfg(feature = "system-fonts")]
pub use system::SystemFontSource;

#[cfg(feature = "system-fonts")]
mod system {
    use super::FontSource;
    use crate::Result;
    use crate::error::SizingError;
    use crate::font::{FontSpec, FontStyle, GlyphRasterizer, TtfFont};
    use crate::units::DeviceContext;
    use fontdb::{Database, Family, ID, Query, Stretch, Style, Weight};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tracing::{debug, instrument, trace};

    impl From<FontStyle> for Style {
        fn from(style: FontStyle) -> Self {
            if style.is_italic() {
                Style::Italic
            } else {
                Style::Normal
            }
        }
    }

    fn weight_for(style: FontStyle) -> Weight {
        if style.is_bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        }
    }

    /// Resolves families against installed fonts through fontdb.
    ///
    /// Face bytes are read once per face and shared by later opens.
    pub struct SystemFontSource {
        db: Database,
        loaded: Mutex<HashMap<ID, (Arc<[u8]>, u32)>>,
    }

    impl SystemFontSource {
        /// Scan the platform font directories
        pub fn new() -> Self {
            let mut db = Database::new();
            db.load_system_fonts();
            debug!("Loaded {} system font faces", db.len());
            Self::from_database(db)
        }

        /// Wrap a pre-populated database
        pub fn from_database(db: Database) -> Self {
            Self {
                db,
                loaded: Mutex::new(HashMap::new()),
            }
        }

        /// Add font data (e.g. fonts embedded in a document) to the database
        pub fn load_font_data(&mut self, font_data: Vec<u8>) {
            self.db.load_font_data(font_data);
        }

        pub fn database(&self) -> &Database {
            &self.db
        }

        /// Number of faces whose bytes have been read so far
        pub fn cached_faces(&self) -> usize {
            self.loaded.lock().map(|loaded| loaded.len()).unwrap_or(0)
        }

        fn face_data(&self, id: ID, family: &str) -> Result<(Arc<[u8]>, u32)> {
            let mut loaded = self
                .loaded
                .lock()
                .map_err(|_| SizingError::MetricProbe("font cache lock poisoned".to_string()))?;
            if let Some((data, index)) = loaded.get(&id) {
                trace!("Reusing loaded face for '{}'", family);
                return Ok((Arc::clone(data), *index));
            }
            let (data, index) = self
                .db
                .with_face_data(id, |data, index| (Arc::<[u8]>::from(data), index))
                .ok_or_else(|| {
                    SizingError::MetricProbe(format!("Font family '{family}' could not be read"))
                })?;
            loaded.insert(id, (Arc::clone(&data), index));
            Ok((data, index))
        }
    }

    impl Default for SystemFontSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FontSource for SystemFontSource {
        #[instrument(skip(self), fields(family = %font.family))]
        fn open(
            &self,
            font: &FontSpec,
            ctx: &DeviceContext,
        ) -> Result<Box<dyn GlyphRasterizer>> {
            let families = [Family::Name(&font.family)];
            let query = Query {
                families: &families,
                weight: weight_for(font.style),
                stretch: Stretch::Normal,
                style: font.style.into(),
            };
            let id = self.db.query(&query).ok_or_else(|| {
                SizingError::MetricProbe(format!("Font family '{}' is not installed", font.family))
            })?;
            let (data, index) = self.face_data(id, &font.family)?;
            let pixel_size = font.pixel_size(ctx.horizontal_dpi);
            Ok(Box::new(TtfFont::new(data, index, pixel_size)?))
        }
    }

    impl std::fmt::Debug for SystemFontSource {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SystemFontSource")
                .field("faces", &self.db.len())
                .field("cached_faces", &self.cached_faces())
                .finish()
        }
    }
}
