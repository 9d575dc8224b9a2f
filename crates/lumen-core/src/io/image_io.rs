use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

use crate::channel::Channel;
use crate::color::hsv::HsvImage;
use crate::error::{LumenError, Result};
use crate::histogram::Histogram;

/// An input image reduced to what the enhancement transforms need.
#[derive(Clone, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum SourceImage {
    Gray(Channel),
    Color(HsvImage),
}

impl SourceImage {
    /// The intensity channel: the image itself, or the HSV value plane.
    pub fn intensity(&self) -> &Channel {
        match self {
            Self::Gray(ch) => ch,
            Self::Color(hsv) => hsv.value_channel(),
        }
    }

    /// Same image with its intensity channel replaced.
    pub fn with_intensity(&self, channel: Channel) -> Result<SourceImage> {
        match self {
            Self::Gray(_) => Ok(Self::Gray(channel)),
            Self::Color(hsv) => Ok(Self::Color(hsv.with_value(channel)?)),
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// Render as 8-bit RGB (gray is replicated into all three channels).
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            Self::Gray(ch) => DynamicImage::ImageLuma8(channel_to_gray(ch)).to_rgb8(),
            Self::Color(hsv) => hsv.to_rgb(),
        }
    }
}

fn format_for(path: &Path) -> ImageFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => ImageFormat::Tiff,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("bmp") => ImageFormat::Bmp,
        _ => ImageFormat::Png,
    }
}

/// Load any decodable image as an 8-bit grayscale channel.
pub fn load_gray(path: &Path) -> Result<Channel> {
    let img = image::open(path)?.to_luma8();
    channel_from_gray(&img)
}

/// Load any decodable image as 8-bit RGB.
pub fn load_color(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Load an image, keeping color (as HSV) unless `gray` is set.
pub fn load_source(path: &Path, gray: bool) -> Result<SourceImage> {
    if gray {
        Ok(SourceImage::Gray(load_gray(path)?))
    } else {
        Ok(SourceImage::Color(HsvImage::from_rgb(&load_color(path)?)?))
    }
}

pub fn channel_from_gray(img: &GrayImage) -> Result<Channel> {
    let (w, h) = img.dimensions();
    Channel::from_raw(w as usize, h as usize, img.as_raw().clone())
}

pub fn channel_to_gray(channel: &Channel) -> GrayImage {
    let (h, w) = channel.data.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        image::Luma([channel.data[[y as usize, x as usize]]])
    })
}

/// Save a channel as 8-bit grayscale, format chosen from the extension.
pub fn save_channel(channel: &Channel, path: &Path) -> Result<()> {
    channel_to_gray(channel).save_with_format(path, format_for(path))?;
    Ok(())
}

/// Save an RGB image, format chosen from the extension.
pub fn save_color(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, format_for(path))?;
    Ok(())
}

/// Save a source image, converting HSV back to RGB.
pub fn save_source(source: &SourceImage, path: &Path) -> Result<()> {
    match source {
        SourceImage::Gray(ch) => save_channel(ch, path),
        SourceImage::Color(hsv) => save_color(&hsv.to_rgb(), path),
    }
}

/// Write a histogram as `level,count` CSV lines under a header.
pub fn write_histogram_csv(hist: &Histogram, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "level,count")?;
    for (level, count) in hist.counts().iter().enumerate() {
        writeln!(out, "{level},{count}")?;
    }
    out.flush().map_err(LumenError::from)
}
