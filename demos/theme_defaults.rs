//! Print sheet-format defaults for a stock theme on this machine's fonts
//!
//! Usage: cargo run --example theme_defaults -- [theme] [dpi]

use theme_sizing::{DeviceContext, SizingCalculator, ThemeFonts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with debug level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let theme_name = args.next().unwrap_or_else(|| "Office".to_string());
    let dpi: f32 = match args.next() {
        Some(dpi) => dpi.parse()?,
        None => 96.0,
    };

    let theme = ThemeFonts::builtin(&theme_name)
        .ok_or_else(|| format!("unknown theme '{theme_name}'"))?;
    let ctx = DeviceContext::uniform(dpi)?;
    let calculator = SizingCalculator::system();

    let result = calculator.compute_with_fallback(&theme.minor_font_spec(), "Calibri", &ctx)?;
    let format = result.sheet_format();

    println!("Theme:              {}", theme_name);
    println!("Body font:          {}", theme.minor);
    println!("Max digit width:    {} px", result.max_digit_width);
    println!("Default col width:  {} chars", format.default_col_width);
    println!("Column width:       {} EMU", result.column_width_emu);
    println!("Default row height: {} pt", format.default_row_height);
    println!("Row height:         {} EMU", result.row_height_emu);

    Ok(())
}
