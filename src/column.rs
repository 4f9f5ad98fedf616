//! Default column width derived from the maximum digit width

use crate::Result;
use crate::constants::*;
use crate::error::SizingError;
use crate::units::{DeviceContext, emu_per_pixel};
use tracing::{debug, trace};

/// Column sizing constants for one digit width and device
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSizing {
    pub max_digit_width: u32,
    /// Default column width in characters, quantized to 1/256
    pub width_characters: f64,
    /// Fraction of a character for each leftover pixel, indexed by pixel count
    pub step_table: Vec<f64>,
    /// Default column width in EMUs
    pub width_emu: u64,
}

impl ColumnSizing {
    /// Default column width in pixels
    pub fn width_pixels(&self) -> u32 {
        self.max_digit_width.saturating_mul(DEFAULT_COLUMN_CHARACTERS)
    }

    /// Convert a pixel width to characters, rounding down to the nearest step
    pub fn pixels_to_characters(&self, pixels: u32) -> f64 {
        quantize(pixels, self.max_digit_width, &self.step_table)
    }
}

/// Build the 1/256 step table for `max_digit_width` pixels.
///
/// Slot 0 is zero; slot `i` holds `(i - 1) / (mdw - 1)` truncated to 1/256, so
/// every entry lies in [0, 1) and never overshoots the linear fraction.
pub fn step_table(max_digit_width: u32) -> Result<Vec<f64>> {
    check_width(max_digit_width)?;
    let span = (max_digit_width - 1) as u64;
    let steps = CHARACTER_STEPS as u64;
    Ok((0..max_digit_width as u64)
        .map(|i| {
            let numerator = i.saturating_sub(1) * steps / span;
            numerator as f64 / steps as f64
        })
        .collect())
}

/// Derive the default column width for a measured digit width
pub fn derive_column_sizing(max_digit_width: u32, ctx: &DeviceContext) -> Result<ColumnSizing> {
    let step_table = step_table(max_digit_width)?;
    let width_pixels = max_digit_width
        .checked_mul(DEFAULT_COLUMN_CHARACTERS)
        .ok_or_else(|| {
            SizingError::InvalidMetric(format!("column of {max_digit_width}px digits overflows"))
        })?;
    let width_characters = quantize(width_pixels, max_digit_width, &step_table);
    let width_emu = width_pixels as u64 * emu_per_pixel(ctx)?;

    trace!("Column step table: {:?}", step_table);
    debug!(
        "Column width for {}px digits: {} chars, {} EMU",
        max_digit_width, width_characters, width_emu
    );

    Ok(ColumnSizing {
        max_digit_width,
        width_characters,
        step_table,
        width_emu,
    })
}

fn quantize(pixels: u32, max_digit_width: u32, step_table: &[f64]) -> f64 {
    let span = max_digit_width - 1;
    let whole = pixels / span;
    let remainder = (pixels % span) as usize;
    whole as f64 + step_table[remainder]
}

/// Reject digit widths of one pixel or less, or above `MAX_DIGIT_WIDTH`
pub fn check_width(max_digit_width: u32) -> Result<()> {
    if max_digit_width <= 1 || max_digit_width > MAX_DIGIT_WIDTH {
        return Err(SizingError::InvalidMetric(format!(
            "max digit width of {max_digit_width}px is not a usable metric"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_table_seven_pixels() {
        let table = step_table(7).unwrap();
        let expected = [0.0, 0.0, 42.0, 85.0, 128.0, 170.0, 213.0].map(|n| n / 256.0);
        assert_eq!(table, expected.to_vec());
    }

    #[test]
    fn test_seven_pixel_column() {
        let sizing = derive_column_sizing(7, &DeviceContext::default()).unwrap();
        assert_eq!(sizing.width_pixels(), 56);
        // floor(56 / 6) = 9 whole characters, 2 pixels left over
        assert_eq!(sizing.width_characters, 9.0 + sizing.step_table[2]);
        assert_eq!(sizing.width_characters, 9.0 + 42.0 / 256.0);
        assert_eq!(sizing.width_emu, 56 * 9525);
    }

    #[test]
    fn test_step_table_bounds() {
        for mdw in 2..=64u32 {
            let table = step_table(mdw).unwrap();
            assert_eq!(table.len(), mdw as usize);
            assert_eq!(table[0], 0.0);
            let last = table[mdw as usize - 1];
            assert!(last <= (mdw - 2) as f64 / (mdw - 1) as f64);
            for pair in table.windows(2) {
                assert!(pair[0] <= pair[1]);
            }
            for step in &table {
                assert!((0.0..1.0).contains(step));
                assert_eq!((step * 256.0).fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_degenerate_widths_fail() {
        let ctx = DeviceContext::default();
        assert!(matches!(
            derive_column_sizing(1, &ctx),
            Err(SizingError::InvalidMetric(_))
        ));
        assert!(matches!(
            derive_column_sizing(0, &ctx),
            Err(SizingError::InvalidMetric(_))
        ));
    }

    #[test]
    fn test_implausible_widths_fail() {
        let ctx = DeviceContext::default();
        assert!(matches!(
            derive_column_sizing(600_000_000, &ctx),
            Err(SizingError::InvalidMetric(_))
        ));
        assert!(matches!(
            step_table(MAX_DIGIT_WIDTH + 1),
            Err(SizingError::InvalidMetric(_))
        ));
        let widest = derive_column_sizing(MAX_DIGIT_WIDTH, &ctx).unwrap();
        assert_eq!(widest.step_table.len(), MAX_DIGIT_WIDTH as usize);
    }

    #[test]
    fn test_derivation_is_pure() {
        let ctx = DeviceContext::uniform(120.0).unwrap();
        let first = derive_column_sizing(9, &ctx).unwrap();
        let second = derive_column_sizing(9, &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_emu_round_trip() {
        for dpi in [72.0, 96.0, 120.0, 144.0, 150.0] {
            let ctx = DeviceContext::uniform(dpi).unwrap();
            let ratio = emu_per_pixel(&ctx).unwrap();
            for mdw in [5, 7, 8, 9, 12] {
                let sizing = derive_column_sizing(mdw, &ctx).unwrap();
                assert_eq!(sizing.width_emu % ratio, 0);
                assert_eq!(sizing.width_emu / ratio, (mdw * 8) as u64);
            }
        }
    }

    #[test]
    fn test_pixels_to_characters() {
        let sizing = derive_column_sizing(7, &DeviceContext::default()).unwrap();
        assert_eq!(sizing.pixels_to_characters(0), 0.0);
        assert_eq!(sizing.pixels_to_characters(6), 1.0);
        assert_eq!(sizing.pixels_to_characters(64), 10.5);
        assert_eq!(sizing.pixels_to_characters(63), 10.0 + 85.0 / 256.0);
    }
}
