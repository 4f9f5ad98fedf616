//! Empirical measurement of the widest digit glyph.
//!
//! No single method is reliable for every typeface and resolution, so the
//! probe runs a short chain of strategies and takes the first answer:
//!
//! 1. [`OverrideLookup`]: a fixed width for fonts known to defeat measurement.
//! 2. [`InkAndAdvance`]: renders the ten digits into an offscreen raster,
//!    scans the ink extent, and cross-checks it against advance widths from the
//!    rasterizer. The larger of the two wins.

use crate::Result;
use crate::constants::*;
use crate::error::SizingError;
use crate::font::{FontSpec, GlyphRasterizer};
use crate::overrides::OverrideTable;
use crate::source::FontSource;
use crate::units::DeviceContext;
use tiny_skia::{Color, Pixmap};
use tracing::{debug, instrument, trace};

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Tunables for the probe. The defaults reproduce the reference measurements;
/// change them only when re-validating against the same typefaces.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Channel sum (of 765) below which a pixel is ink
    pub ink_threshold: u16,
    /// Pixels added to the scanned ink span
    pub ink_padding: u32,
    /// Minimum raster side in device pixels
    pub min_raster_size: u32,
    /// Fonts needing a larger raster fail instead of allocating one
    pub max_raster_size: u32,
    /// Horizontal resolutions below this use the low-resolution overrides
    pub low_resolution_dpi: f32,
    pub overrides: OverrideTable,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ink_threshold: INK_THRESHOLD,
            ink_padding: INK_PADDING,
            min_raster_size: MIN_RASTER_SIZE,
            max_raster_size: MAX_RASTER_SIZE,
            low_resolution_dpi: LOW_RESOLUTION_DPI,
            overrides: OverrideTable::builtin(),
        }
    }
}

impl ProbeConfig {
    pub fn with_ink_threshold(mut self, threshold: u16) -> Self {
        self.ink_threshold = threshold;
        self
    }

    pub fn with_ink_padding(mut self, padding: u32) -> Self {
        self.ink_padding = padding;
        self
    }

    pub fn with_min_raster_size(mut self, size: u32) -> Self {
        self.min_raster_size = size;
        self
    }

    pub fn with_max_raster_size(mut self, size: u32) -> Self {
        self.max_raster_size = size;
        self
    }

    pub fn with_low_resolution_dpi(mut self, dpi: f32) -> Self {
        self.low_resolution_dpi = dpi;
        self
    }

    /// Replace the override table
    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    /// Measure every font, including those with a built-in override
    pub fn without_overrides(self) -> Self {
        self.with_overrides(OverrideTable::new())
    }
}

/// Reported advance of one digit, with the control pair cancelled out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitMeasurement {
    pub digit: char,
    pub width: f32,
}

/// Which measurement produced the final width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Override,
    InkExtent,
    Advance,
}

/// Full result of a probe call
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// Max digit width in pixels, rounded up
    pub width: f32,
    pub method: ProbeMethod,
    /// Per-digit advances; empty when an override answered
    pub digits: Vec<DigitMeasurement>,
    /// Width of the scanned ink span including padding, if any ink was found
    pub ink_width: Option<u32>,
}

impl ProbeOutcome {
    pub fn max_digit_width(&self) -> u32 {
        self.width as u32
    }
}

/// One link in the probe chain; `Ok(None)` passes to the next strategy
pub trait DigitWidthStrategy {
    fn measure(
        &self,
        font: &FontSpec,
        ctx: &DeviceContext,
        config: &ProbeConfig,
    ) -> Result<Option<ProbeOutcome>>;
}

/// Answers from the override table when the font has an entry.
///
/// Table widths were taken at the theme body size, so other sizes are measured.
pub struct OverrideLookup;

impl DigitWidthStrategy for OverrideLookup {
    fn measure(
        &self,
        font: &FontSpec,
        ctx: &DeviceContext,
        config: &ProbeConfig,
    ) -> Result<Option<ProbeOutcome>> {
        if font.point_size != DEFAULT_FONT_SIZE {
            return Ok(None);
        }
        let low_resolution = ctx.is_low_resolution(config.low_resolution_dpi);
        Ok(config
            .overrides
            .get(&font.family, low_resolution)
            .map(|width| ProbeOutcome {
                width: width as f32,
                method: ProbeMethod::Override,
                digits: Vec::new(),
                ink_width: None,
            }))
    }
}

/// Renders digits and takes the larger of ink extent and reported advance
pub struct InkAndAdvance<'a> {
    source: &'a dyn FontSource,
}

impl<'a> InkAndAdvance<'a> {
    pub fn new(source: &'a dyn FontSource) -> Self {
        Self { source }
    }
}

impl DigitWidthStrategy for InkAndAdvance<'_> {
    fn measure(
        &self,
        font: &FontSpec,
        ctx: &DeviceContext,
        config: &ProbeConfig,
    ) -> Result<Option<ProbeOutcome>> {
        let rasterizer = self.source.open(font, ctx)?;
        measure_digits(rasterizer.as_ref(), config).map(Some)
    }
}

/// Digit probe over a font source
pub struct FontProbe<S: FontSource> {
    source: S,
    config: ProbeConfig,
}

impl<S: FontSource> FontProbe<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ProbeConfig::default())
    }

    pub fn with_config(source: S, config: ProbeConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Maximum digit width in pixels, rounded up to a whole pixel
    pub fn probe(&self, font: &FontSpec, ctx: &DeviceContext) -> Result<f32> {
        self.probe_detailed(font, ctx).map(|outcome| outcome.width)
    }

    /// Run the strategy chain and report how the width was obtained
    #[instrument(skip(self), fields(family = %font.family))]
    pub fn probe_detailed(&self, font: &FontSpec, ctx: &DeviceContext) -> Result<ProbeOutcome> {
        if !font.point_size.is_finite() || font.point_size <= 0.0 {
            return Err(SizingError::InvalidArgument(format!(
                "font size must be positive, got {}",
                font.point_size
            )));
        }

        let ink_and_advance = InkAndAdvance::new(&self.source);
        let chain: [&dyn DigitWidthStrategy; 2] = [&OverrideLookup, &ink_and_advance];

        for strategy in chain {
            if let Some(outcome) = strategy.measure(font, ctx, &self.config)? {
                debug!(
                    "Max digit width for '{}' at {} dpi: {} ({:?})",
                    font.family, ctx.horizontal_dpi, outcome.width, outcome.method
                );
                return Ok(outcome);
            }
        }

        Err(SizingError::MetricProbe(format!(
            "no strategy could measure '{}'",
            font.family
        )))
    }
}

/// Draw all ten digits into a fresh raster and measure them.
///
/// The raster lives only for this call.
pub fn measure_digits(rasterizer: &dyn GlyphRasterizer, config: &ProbeConfig) -> Result<ProbeOutcome> {
    let wanted = (rasterizer.pixel_size() * 4.0).ceil();
    if !wanted.is_finite() || wanted > config.max_raster_size as f32 {
        return Err(SizingError::MetricProbe(format!(
            "a {}px font needs a raster wider than {} pixels",
            rasterizer.pixel_size(),
            config.max_raster_size
        )));
    }
    let side = config.min_raster_size.max(wanted as u32);
    let mut canvas = Pixmap::new(side, side).ok_or_else(|| {
        SizingError::MetricProbe(format!("could not allocate a {side}x{side} raster"))
    })?;
    canvas.fill(Color::WHITE);

    let origin = (side as f32 / 4.0, side as f32 * 3.0 / 4.0);
    let pad_width = rasterizer.text_width(MEASURE_PAD);
    let mut digits = Vec::with_capacity(DIGITS.len());
    let mut max_reported: f32 = 0.0;

    for digit in DIGITS {
        rasterizer.draw_char(&mut canvas, digit, origin)?;

        let padded = format!("_{digit}_");
        let width = rasterizer.text_width(&padded) - pad_width;
        trace!("Digit {} reported width {}", digit, width);
        if width.is_finite() {
            max_reported = max_reported.max(width);
        }
        digits.push(DigitMeasurement { digit, width });
    }

    let ink_width = ink_columns(&canvas, config.ink_threshold)
        .map(|(first, last)| last - first + config.ink_padding);
    let rendered = ink_width.unwrap_or(0) as f32;
    trace!("Ink width {:?}, max reported {}", ink_width, max_reported);

    let method = if rendered >= max_reported {
        ProbeMethod::InkExtent
    } else {
        ProbeMethod::Advance
    };

    Ok(ProbeOutcome {
        width: rendered.max(max_reported).ceil(),
        method,
        digits,
        ink_width,
    })
}

fn is_ink(canvas: &Pixmap, x: u32, y: u32, threshold: u16) -> bool {
    canvas.pixel(x, y).is_some_and(|pixel| {
        let color = pixel.demultiply();
        let sum = color.red() as u16 + color.green() as u16 + color.blue() as u16;
        sum < threshold
    })
}

fn column_has_ink(canvas: &Pixmap, x: u32, threshold: u16) -> bool {
    (0..canvas.height()).any(|y| is_ink(canvas, x, y, threshold))
}

/// First and last raster columns containing ink, scanning in from each edge
pub fn ink_columns(canvas: &Pixmap, threshold: u16) -> Option<(u32, u32)> {
    let first = (0..canvas.width()).find(|&x| column_has_ink(canvas, x, threshold))?;
    let last = (first..canvas.width())
        .rev()
        .find(|&x| column_has_ink(canvas, x, threshold))?;
    Some((first, last))
}
