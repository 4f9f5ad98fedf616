//! Probe a font with and without a loaded override table
//!
//! Usage: cargo run --example override_table -- <family> [overrides.json]

use theme_sizing::{
    DeviceContext, FontProbe, FontSpec, OverrideTable, ProbeConfig, SystemFontSource,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let family = args.next().unwrap_or_else(|| "Calibri".to_string());
    let overrides = match args.next() {
        Some(path) => {
            let loaded = OverrideTable::from_json(&std::fs::read_to_string(path)?)?;
            OverrideTable::builtin().merge(loaded)
        }
        None => OverrideTable::builtin(),
    };

    let source = SystemFontSource::new();
    let font = FontSpec::body(family);

    for dpi in [96.0, 120.0, 144.0] {
        let ctx = DeviceContext::uniform(dpi)?;
        let with_table = FontProbe::with_config(
            &source,
            ProbeConfig::default().with_overrides(overrides.clone()),
        );
        let measured = FontProbe::with_config(&source, ProbeConfig::default().without_overrides());

        let chosen = with_table.probe_detailed(&font, &ctx)?;
        match measured.probe_detailed(&font, &ctx) {
            Ok(raw) => println!(
                "{dpi:>5} dpi: {} px via {:?} (measured {} px, ink {:?})",
                chosen.width, chosen.method, raw.width, raw.ink_width
            ),
            Err(e) => println!("{dpi:>5} dpi: {} px via {:?} ({e})", chosen.width, chosen.method),
        }
    }

    println!("{}", overrides.to_json()?);
    Ok(())
}
