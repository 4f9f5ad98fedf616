//! Constants for unit conversion and digit probing

/// English Metric Units per inch
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per typographic point
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Typographic points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Resolution assumed when the rendering subsystem supplies none
pub const DEFAULT_DPI: f32 = 96.0;

/// Devices below this horizontal resolution are "low resolution" for overrides
pub const LOW_RESOLUTION_DPI: f32 = 108.0;

/// Sum of the three colour channels below which a pixel counts as ink
/// (out of a 765 maximum). Tuned so antialiasing fringe is ignored.
pub const INK_THRESHOLD: u16 = 610;

/// Pixels added to the ink span: one for inclusive counting, one of buffer
pub const INK_PADDING: u32 = 2;

/// Minimum side of the square probe raster in device pixels
pub const MIN_RASTER_SIZE: u32 = 64;

/// Control pair used to cancel side bearings when measuring a digit
pub const MEASURE_PAD: &str = "__";

/// Default column width in characters before quantization
pub const DEFAULT_COLUMN_CHARACTERS: u32 = 8;

/// Denominator of the character-width quantization
pub const CHARACTER_STEPS: u32 = 256;

/// Theme body font size in points
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Row height used for families missing from the row height table (11pt body)
pub const DEFAULT_ROW_HEIGHT_POINTS: f64 = 15.0;

/// Row heights are rounded to this many points when scaled
pub const ROW_HEIGHT_INCREMENT: f64 = 0.25;

/// Largest max digit width accepted from a probe or override table
pub const MAX_DIGIT_WIDTH: u32 = 1024;

/// Largest side of the square probe raster in device pixels
pub const MAX_RASTER_SIZE: u32 = 4096;
