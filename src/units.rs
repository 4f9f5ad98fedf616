//! Conversions between device pixels, points and EMUs

use crate::Result;
use crate::constants::*;
use crate::error::SizingError;

/// Resolution of the device the defaults are computed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceContext {
    pub horizontal_dpi: f32,
    pub vertical_dpi: f32,
}

impl DeviceContext {
    /// Create a device context, rejecting non-positive or non-finite resolutions
    pub fn new(horizontal_dpi: f32, vertical_dpi: f32) -> Result<Self> {
        check_dpi(horizontal_dpi)?;
        check_dpi(vertical_dpi)?;
        Ok(Self {
            horizontal_dpi,
            vertical_dpi,
        })
    }

    /// Square device with the same resolution on both axes
    pub fn uniform(dpi: f32) -> Result<Self> {
        Self::new(dpi, dpi)
    }

    /// Whether the horizontal resolution falls below `cutoff_dpi`
    pub fn is_low_resolution(&self, cutoff_dpi: f32) -> bool {
        self.horizontal_dpi < cutoff_dpi
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            horizontal_dpi: DEFAULT_DPI,
            vertical_dpi: DEFAULT_DPI,
        }
    }
}

fn check_dpi(dpi: f32) -> Result<()> {
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(SizingError::InvalidArgument(format!(
            "resolution must be positive and finite, got {dpi}"
        )));
    }
    Ok(())
}

fn check_length(value: f64, what: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SizingError::InvalidArgument(format!(
            "{what} must be non-negative and finite, got {value}"
        )));
    }
    Ok(())
}

/// Whole EMUs covered by one horizontal device pixel.
///
/// Exact for the common resolutions (72, 96, 120, 144, 192); rounded otherwise
/// so pixel-derived lengths stay integer multiples of the ratio. Resolutions so
/// fine that a pixel rounds to zero EMUs are rejected.
pub fn emu_per_pixel(ctx: &DeviceContext) -> Result<u64> {
    check_dpi(ctx.horizontal_dpi)?;
    let ratio = (EMU_PER_INCH / ctx.horizontal_dpi as f64).round() as u64;
    if ratio == 0 {
        return Err(SizingError::InvalidArgument(format!(
            "{} dpi is finer than one EMU per pixel",
            ctx.horizontal_dpi
        )));
    }
    Ok(ratio)
}

/// Convert a horizontal pixel length to EMUs
pub fn pixels_to_emu(pixels: f64, ctx: &DeviceContext) -> Result<u64> {
    check_length(pixels, "pixel length")?;
    let ratio = emu_per_pixel(ctx)?;
    Ok((pixels * ratio as f64).round() as u64)
}

/// Convert an EMU length to horizontal pixels
pub fn emu_to_pixels(emu: u64, ctx: &DeviceContext) -> Result<f64> {
    let ratio = emu_per_pixel(ctx)?;
    Ok(emu as f64 / ratio as f64)
}

/// Convert points to EMUs; independent of the device
pub fn points_to_emu(points: f64) -> Result<u64> {
    check_length(points, "point length")?;
    Ok((points * EMU_PER_POINT).round() as u64)
}

/// Convert EMUs to points
pub fn emu_to_points(emu: u64) -> f64 {
    emu as f64 / EMU_PER_POINT
}

/// Convert points to horizontal device pixels
pub fn points_to_pixels(points: f64, ctx: &DeviceContext) -> Result<f64> {
    check_length(points, "point length")?;
    check_dpi(ctx.horizontal_dpi)?;
    Ok(points * ctx.horizontal_dpi as f64 / POINTS_PER_INCH)
}

/// Convert horizontal device pixels to points
pub fn pixels_to_points(pixels: f64, ctx: &DeviceContext) -> Result<f64> {
    check_length(pixels, "pixel length")?;
    check_dpi(ctx.horizontal_dpi)?;
    Ok(pixels * POINTS_PER_INCH / ctx.horizontal_dpi as f64)
}
