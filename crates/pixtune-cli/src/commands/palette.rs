//! Palette command
//!
//! Extracts dominant colors with median cut and prints them as text or JSON.

use crate::PaletteArgs;
use anyhow::{Context, Result};
use pixtune_palette::{extract_palette_with, Palette, PaletteOptions};
use serde::Serialize;

/// One palette color in JSON output.
#[derive(Debug, Serialize)]
pub struct SwatchEntry {
    pub hex: String,
    pub rgb: [u8; 3],
    pub population: u64,
    pub share: f64,
}

/// JSON-friendly view of a palette.
pub fn entries(palette: &Palette) -> Vec<SwatchEntry> {
    let total = palette.total_population();
    palette
        .iter()
        .map(|s| SwatchEntry {
            hex: s.hex(),
            rgb: s.color.to_array(),
            population: s.population,
            share: s.share(total),
        })
        .collect()
}

/// Prints one line per color, most populated first.
pub fn print_text(palette: &Palette) {
    for (i, e) in entries(palette).iter().enumerate() {
        let [r, g, b] = e.rgb;
        println!(
            "{:>2}. {}  rgb({r:>3}, {g:>3}, {b:>3})  {:>5.1}%  {} px",
            i + 1,
            e.hex,
            e.share * 100.0,
            e.population
        );
    }
}

pub fn run(args: PaletteArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let options = PaletteOptions::new(args.colors).with_bits(args.bits);
    let palette = extract_palette_with(&image, &options)
        .with_context(|| format!("Palette extraction failed: {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries(&palette))?);
    } else {
        print_text(&palette);
    }
    Ok(())
}
