//! Default row height lookup and conversion

use crate::Result;
use crate::constants::*;
use crate::error::SizingError;
use crate::font::FontSpec;
use crate::units::{DeviceContext, points_to_emu};
use std::collections::HashMap;
use tracing::debug;

/// Default row heights in points for the 11pt body size
const DEFAULT_ROW_HEIGHTS: &[(&str, f64)] = &[
    ("Aptos", 15.0),
    ("Aptos Display", 15.0),
    ("Aptos Narrow", 14.5),
    ("Arial", 14.25),
    ("Arial Narrow", 14.25),
    ("Book Antiqua", 14.25),
    ("Bookman Old Style", 15.0),
    ("Calibri", 15.0),
    ("Calibri Light", 15.0),
    ("Cambria", 15.0),
    ("Candara", 15.0),
    ("Century Gothic", 15.0),
    ("Century Schoolbook", 15.0),
    ("Consolas", 15.0),
    ("Constantia", 15.0),
    ("Corbel", 15.0),
    ("Franklin Gothic Book", 15.0),
    ("Franklin Gothic Medium", 15.0),
    ("Garamond", 15.0),
    ("Georgia", 14.25),
    ("Gill Sans MT", 15.0),
    ("Impact", 15.75),
    ("Lucida Sans", 15.0),
    ("Lucida Sans Unicode", 15.75),
    ("Palatino Linotype", 15.0),
    ("Perpetua", 15.0),
    ("Rockwell", 15.0),
    ("Segoe UI", 15.0),
    ("Tahoma", 14.25),
    ("Times New Roman", 15.0),
    ("Trebuchet MS", 15.0),
    ("Tw Cen MT", 15.0),
    ("Verdana", 14.25),
];

/// Row height for one font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSizing {
    pub height_points: f64,
    pub height_emu: u64,
    /// Height in vertical device pixels
    pub height_pixels: f64,
}

/// Family to default row height (points at 11pt) lookup
#[derive(Debug, Clone)]
pub struct RowHeightTable {
    heights: HashMap<String, f64>,
    fallback: f64,
}

impl RowHeightTable {
    /// Build a table from (family, points at 11pt) pairs
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let heights = entries
            .into_iter()
            .map(|(family, points)| (family.as_ref().to_ascii_lowercase(), points))
            .collect();
        Self {
            heights,
            fallback: DEFAULT_ROW_HEIGHT_POINTS,
        }
    }

    /// Height used for families not in the table
    pub fn with_fallback(mut self, points: f64) -> Self {
        self.fallback = points;
        self
    }

    /// Row height in points for `font`, scaled from the 11pt entry and
    /// rounded to a quarter point
    pub fn height_points(&self, font: &FontSpec) -> f64 {
        let base = self
            .heights
            .get(&font.family.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.fallback);
        if font.point_size == DEFAULT_FONT_SIZE {
            return base;
        }
        let scaled = base * font.point_size as f64 / DEFAULT_FONT_SIZE as f64;
        (scaled / ROW_HEIGHT_INCREMENT).round() * ROW_HEIGHT_INCREMENT
    }
}

impl Default for RowHeightTable {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHTS.iter().copied())
    }
}

/// Look up the default row height for `font` and convert it to EMUs
pub fn derive_row_sizing(
    font: &FontSpec,
    ctx: &DeviceContext,
    table: &RowHeightTable,
) -> Result<RowSizing> {
    if !font.point_size.is_finite() || font.point_size <= 0.0 {
        return Err(SizingError::InvalidArgument(format!(
            "font size must be positive, got {}",
            font.point_size
        )));
    }
    let height_points = table.height_points(font);
    let height_emu = points_to_emu(height_points)?;
    let height_pixels = height_points * ctx.vertical_dpi as f64 / POINTS_PER_INCH;
    debug!(
        "Row height for '{}' {}pt: {}pt, {} EMU",
        font.family, font.point_size, height_points, height_emu
    );
    Ok(RowSizing {
        height_points,
        height_emu,
        height_pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibri_body_row() {
        let row = derive_row_sizing(
            &FontSpec::body("Calibri"),
            &DeviceContext::default(),
            &RowHeightTable::default(),
        )
        .unwrap();
        assert_eq!(row.height_points, 15.0);
        assert_eq!(row.height_emu, 190_500);
        assert_eq!(row.height_pixels, 20.0);
    }

    #[test]
    fn test_emu_independent_of_resolution() {
        let table = RowHeightTable::default();
        let font = FontSpec::body("Arial");
        let low = derive_row_sizing(&font, &DeviceContext::default(), &table).unwrap();
        let high = derive_row_sizing(&font, &DeviceContext::uniform(144.0).unwrap(), &table)
            .unwrap();
        assert_eq!(low.height_emu, high.height_emu);
        assert_eq!(low.height_points, 14.25);
    }

    #[test]
    fn test_unknown_family_uses_fallback() {
        let table = RowHeightTable::default();
        assert_eq!(table.height_points(&FontSpec::body("Nonexistent")), 15.0);
        let table = table.with_fallback(16.5);
        assert_eq!(table.height_points(&FontSpec::body("Nonexistent")), 16.5);
    }

    #[test]
    fn test_scaled_sizes_round_to_quarter_points() {
        let table = RowHeightTable::default();
        // 15 * 10 / 11 = 13.636..., nearest quarter point is 13.75
        assert_eq!(table.height_points(&FontSpec::new("calibri", 10.0)), 13.75);
        assert_eq!(table.height_points(&FontSpec::new("Calibri", 22.0)), 30.0);
    }

    #[test]
    fn test_custom_table() {
        let table = RowHeightTable::new([("House Font", 18.0)]);
        assert_eq!(table.height_points(&FontSpec::body("HOUSE FONT")), 18.0);
    }

    #[test]
    fn test_rejects_bad_font_size() {
        let result = derive_row_sizing(
            &FontSpec::new("Calibri", f32::NAN),
            &DeviceContext::default(),
            &RowHeightTable::default(),
        );
        assert!(matches!(result, Err(SizingError::InvalidArgument(_))));
    }
}
