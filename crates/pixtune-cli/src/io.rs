//! PNG decode/encode into [`PixelBuffer`]s.
//!
//! Every PNG color type is normalized to 8 bits per sample: palettes are
//! expanded, 16-bit samples are truncated and alpha is dropped, leaving a
//! grayscale or RGB buffer.

use anyhow::{bail, Context, Result};
use pixtune_core::{Channels, PixelBuffer};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file as an 8-bit gray or RGB buffer.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("Cannot determine PNG output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    buf.truncate(info.buffer_size());

    debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        "decoded png"
    );

    let (channels, data) = match info.color_type {
        png::ColorType::Grayscale => (Channels::Gray, buf),
        png::ColorType::GrayscaleAlpha => (Channels::Gray, strip_alpha(&buf, 2)),
        png::ColorType::Rgb => (Channels::Rgb, buf),
        png::ColorType::Rgba => (Channels::Rgb, strip_alpha(&buf, 4)),
        other => bail!("Unsupported PNG color type after expansion: {other:?}"),
    };

    Ok(PixelBuffer::from_raw(info.width, info.height, channels, data)?)
}

/// Drops the trailing alpha sample of every `stride`-sample pixel.
fn strip_alpha(data: &[u8], stride: usize) -> Vec<u8> {
    data.chunks_exact(stride)
        .flat_map(|px| px[..stride - 1].iter().copied())
        .collect()
}

/// Writes `buffer` as an 8-bit PNG.
pub fn write_png(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    if buffer.is_empty() {
        bail!(
            "Cannot write an empty {}x{} image to {}",
            buffer.width(),
            buffer.height(),
            path.display()
        );
    }
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let color_type = match buffer.channels() {
        Channels::Gray => png::ColorType::Grayscale,
        Channels::Rgb => png::ColorType::Rgb,
    };
    let mut encoder = png::Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    png_writer
        .write_image_data(buffer.data())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    png_writer
        .finish()
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(())
}
