//! Apply command
//!
//! Builds a pipeline from flags or a recipe file, runs it and writes the
//! result. Flag steps always run in the order resize, contrast, invert, HSV,
//! tone curve; use a recipe for any other order.

use crate::recipe::Recipe;
use crate::ApplyArgs;
use anyhow::{bail, Context, Result};
use pixtune_ops::{CurveSet, HsvAdjust, Pipeline};
use pixtune_palette::extract_palette;
use tracing::{debug, info};

/// Parses `in:out` pairs separated by commas, e.g. `0:0,128:200,255:255`.
pub fn parse_points(spec: &str) -> Result<Vec<(u8, u8)>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| -> Result<(u8, u8)> {
            let (x, y) = pair
                .split_once(':')
                .with_context(|| format!("Expected `in:out`, got `{pair}`"))?;
            let x = x.trim().parse::<u8>().with_context(|| format!("Bad input value in `{pair}`"))?;
            let y = y.trim().parse::<u8>().with_context(|| format!("Bad output value in `{pair}`"))?;
            Ok((x, y))
        })
        .collect()
}

/// Builds the pipeline described by the step flags.
fn pipeline_from_flags(args: &ApplyArgs) -> Result<Pipeline> {
    let mut pipeline = Pipeline::new();
    if let Some(scale) = args.resize {
        pipeline = pipeline.resize(scale);
    }
    if let Some(factor) = args.contrast {
        pipeline = pipeline.contrast(factor);
    }
    if args.invert {
        pipeline = pipeline.invert();
    }
    if args.hue.is_some() || args.saturation.is_some() || args.value.is_some() {
        pipeline = pipeline.hsv(HsvAdjust::new(
            args.hue.unwrap_or(1.0),
            args.saturation.unwrap_or(1.0),
            args.value.unwrap_or(1.0),
        ));
    }
    if let Some(spec) = &args.curve {
        pipeline = pipeline.tone_curve(CurveSet::Shared(parse_points(spec)?));
    }
    if let (Some(r), Some(g), Some(b)) = (&args.curve_red, &args.curve_green, &args.curve_blue) {
        pipeline = pipeline.tone_curve(CurveSet::per_channel(
            parse_points(r)?,
            parse_points(g)?,
            parse_points(b)?,
        ));
    }
    Ok(pipeline)
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let pipeline = match &args.recipe {
        Some(path) => Recipe::load(path)?.pipeline(),
        None => pipeline_from_flags(&args)?,
    };
    if pipeline.is_empty() {
        bail!("No adjustments given; pass step flags or --recipe");
    }
    debug!(?pipeline, "built pipeline");

    let image = super::load_image(&args.input)?;
    let output = pipeline
        .run(&image)
        .with_context(|| format!("Processing failed: {}", args.input.display()))?;
    info!(
        before = ?image.dimensions(),
        after = ?output.dimensions(),
        steps = pipeline.len(),
        "pipeline finished"
    );

    super::save_image(&args.output, &output)?;

    if let Some(k) = args.palette {
        let palette = extract_palette(&output, k).context("Palette extraction failed")?;
        super::palette::print_text(&palette);
    }
    Ok(())
}
