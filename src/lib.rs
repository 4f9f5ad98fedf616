//! Theme-driven default column width and row height for spreadsheet documents
//!
//! Spreadsheet applications derive a sheet's default column width from the
//! widest digit of the theme's body font, measured on the display device. This
//! crate reproduces that measurement without access to authoritative font
//! metrics: it renders the digits into an offscreen raster, cross-checks the
//! ink extent against reported advance widths, and turns the result into the
//! column and row defaults written to a sheet's format properties.

use tracing::{debug, instrument, warn};

pub mod column;
pub mod constants;
pub mod error;
pub mod font;
pub mod overrides;
pub mod probe;
pub mod row;
pub mod sizing;
pub mod source;
pub mod theme;
pub mod units;

pub use column::{ColumnSizing, derive_column_sizing};
pub use error::{Result, SizingError};
pub use font::{FontSpec, FontStyle, GlyphRasterizer};
pub use overrides::{OverrideEntry, OverrideTable};
pub use probe::{FontProbe, ProbeConfig, ProbeMethod, ProbeOutcome};
pub use row::{RowHeightTable, RowSizing, derive_row_sizing};
pub use sizing::{SheetFormatDefaults, SizingResult};
pub use source::FontSource;
pub use theme::ThemeFonts;
pub use units::DeviceContext;

#[cfg(feature = "ttf-parser")]
pub use font::TtfFont;
#[cfg(feature = "ttf-parser")]
pub use source::MemoryFontSource;
#[cfg(feature = "system-fonts")]
pub use source::SystemFontSource;

/// Probe, column model and row model wired together.
///
/// Each call measures afresh; cache the returned `SizingResult` per
/// (font, device) pair.
pub struct SizingCalculator<S: FontSource> {
    probe: FontProbe<S>,
    row_heights: RowHeightTable,
}

impl<S: FontSource> SizingCalculator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ProbeConfig::default())
    }

    pub fn with_config(source: S, config: ProbeConfig) -> Self {
        Self {
            probe: FontProbe::with_config(source, config),
            row_heights: RowHeightTable::default(),
        }
    }

    /// Replace the default row height table
    pub fn with_row_heights(mut self, row_heights: RowHeightTable) -> Self {
        self.row_heights = row_heights;
        self
    }

    pub fn probe(&self) -> &FontProbe<S> {
        &self.probe
    }

    /// Derive all sizing defaults for `font` on `ctx`
    #[instrument(skip(self), fields(family = %font.family))]
    pub fn compute(&self, font: &FontSpec, ctx: &DeviceContext) -> Result<SizingResult> {
        let max_digit_width = self.probe.probe(font, ctx)? as u32;
        let column = derive_column_sizing(max_digit_width, ctx)?;
        let row = derive_row_sizing(font, ctx, &self.row_heights)?;
        let result = SizingResult::from_parts(column, row);
        debug!("Sizing result: {:?}", result);
        Ok(result)
    }

    /// Derive defaults for a theme's body font
    pub fn compute_for_theme(&self, theme: &ThemeFonts, ctx: &DeviceContext) -> Result<SizingResult> {
        self.compute(&theme.minor_font_spec(), ctx)
    }

    /// Derive defaults for `font`, retrying once with `fallback_family` at the
    /// same size and style if the font cannot be measured
    pub fn compute_with_fallback(
        &self,
        font: &FontSpec,
        fallback_family: &str,
        ctx: &DeviceContext,
    ) -> Result<SizingResult> {
        match self.compute(font, ctx) {
            Err(err @ (SizingError::MetricProbe(_) | SizingError::InvalidMetric(_))) => {
                warn!(
                    "Could not size '{}' ({}), falling back to '{}'",
                    font.family, err, fallback_family
                );
                let fallback = FontSpec {
                    family: fallback_family.to_string(),
                    ..font.clone()
                };
                self.compute(&fallback, ctx)
            }
            other => other,
        }
    }
}

#[cfg(feature = "system-fonts")]
impl SizingCalculator<SystemFontSource> {
    /// Calculator over the fonts installed on this machine
    pub fn system() -> Self {
        Self::new(SystemFontSource::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::tests::BlockSource;

    #[test]
    fn test_calibri_low_resolution_defaults() {
        let calculator = SizingCalculator::new(BlockSource(Some(([20.0; 10], [20.0; 10]))));
        let ctx = DeviceContext::default();
        let result = calculator
            .compute_for_theme(&ThemeFonts::builtin("Office").unwrap(), &ctx)
            .unwrap();

        // Calibri is pinned to 7 pixels below 108 dpi
        assert_eq!(result.max_digit_width, 7);
        assert_eq!(result.column_step_table.len(), 7);
        assert_eq!(result.column_width_characters, 9.0 + 42.0 / 256.0);
        assert_eq!(result.column_width_emu, 56 * 9525);
        assert_eq!(result.row_height_points, 15.0);
        assert_eq!(result.row_height_emu, 190_500);
    }

    #[test]
    fn test_measured_font() {
        let calculator = SizingCalculator::new(BlockSource(Some(([6.0; 10], [5.0; 10]))));
        let ctx = DeviceContext::uniform(120.0).unwrap();
        let result = calculator.compute(&FontSpec::body("Arial"), &ctx).unwrap();
        assert_eq!(result.max_digit_width, 7);
        assert_eq!(result.column_width_emu, 56 * 7620);
        assert_eq!(result.row_height_points, 14.25);
    }

    #[test]
    fn test_degenerate_measurement_is_invalid_metric() {
        let calculator = SizingCalculator::new(BlockSource(Some(([0.0; 10], [0.5; 10]))));
        let result = calculator.compute(&FontSpec::body("Arial"), &DeviceContext::default());
        assert!(matches!(result, Err(SizingError::InvalidMetric(_))));
    }

    #[test]
    fn test_fallback_used_when_probe_fails() {
        let calculator = SizingCalculator::new(BlockSource(None));
        let ctx = DeviceContext::default();
        // Calibri resolves through the override table, no font needed
        let result = calculator
            .compute_with_fallback(&FontSpec::body("Missing Sans"), "Calibri", &ctx)
            .unwrap();
        assert_eq!(result.max_digit_width, 7);

        let result = calculator.compute_with_fallback(&FontSpec::body("Missing Sans"), "Arial", &ctx);
        assert!(matches!(result, Err(SizingError::MetricProbe(_))));
    }

    #[test]
    fn test_compute_is_repeatable() {
        let calculator = SizingCalculator::new(BlockSource(Some(([8.0; 10], [7.2; 10]))));
        let ctx = DeviceContext::default();
        let font = FontSpec::body("Verdana");
        assert_eq!(
            calculator.compute(&font, &ctx).unwrap(),
            calculator.compute(&font, &ctx).unwrap()
        );
    }
}
