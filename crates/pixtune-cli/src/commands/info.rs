//! Info command
//!
//! Prints dimensions and channel layout of each input.

use crate::InfoArgs;
use anyhow::Result;
use pixtune_core::Channels;

pub fn run(args: InfoArgs) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        let layout = match image.channels() {
            Channels::Gray => "gray",
            Channels::Rgb => "rgb",
        };
        println!("{}", path.display());
        println!("  size:     {}x{}", image.width(), image.height());
        println!("  channels: {} ({layout})", image.channel_count());
        println!("  pixels:   {}", image.pixel_count());
    }
    Ok(())
}
