//! Representative color of an image
//!
//! Every distinct color of a thumbnail is weighted by its saturation, pixel
//! count and alpha, so vivid areas dominate washed-out backgrounds.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::http::read_url;

/// Weight given to colors with no saturation, so grey images still average.
const MIN_COEFFICIENT: f64 = 0.01;

/// Output format of [`main_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Triplet {
    #[default]
    Rgb,
    Hex,
}

impl FromStr for Triplet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(Triplet::Rgb),
            "hex" => Ok(Triplet::Hex),
            _ => Err(Error::InvalidTriplet(s.to_string())),
        }
    }
}

/// A color as an RGB triplet or a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Hex(String),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "({}, {}, {})", r, g, b),
            Color::Hex(hex) => write!(f, "{}", hex),
        }
    }
}

/// Where the image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    File(&'a str),
    Url(&'a str),
}

/// Representative color of the image at `source`, computed on a thumbnail
/// no larger than `scale` pixels on either side.
///
/// An empty source gives `None`.
pub fn main_color(
    source: ImageSource<'_>,
    scale: u32,
    triplet: Triplet,
) -> Result<Option<Color>> {
    let img = match source {
        ImageSource::File("") | ImageSource::Url("") => return Ok(None),
        ImageSource::File(path) => image::open(path)?,
        ImageSource::Url(url) => image::load_from_memory(&read_url(url)?)?,
    };
    let (r, g, b) = dominant_color(&shrink(img, scale));
    Ok(Some(match triplet {
        Triplet::Rgb => Color::Rgb(r, g, b),
        Triplet::Hex => Color::Hex(format!("#{:02X}{:02X}{:02X}", r, g, b)),
    }))
}

/// Scale down to fit in `scale` x `scale`. Smaller images are left alone.
fn shrink(img: DynamicImage, scale: u32) -> DynamicImage {
    let scale = scale.max(1);
    if img.width() > scale || img.height() > scale {
        img.thumbnail(scale, scale)
    } else {
        img
    }
}

fn dominant_color(img: &DynamicImage) -> (u8, u8, u8) {
    let mut counts: HashMap<[u8; 4], u64> = HashMap::new();
    for pixel in img.to_rgba8().pixels() {
        *counts.entry(pixel.0).or_insert(0) += 1;
    }

    let (mut r_sum, mut g_sum, mut b_sum, mut total) = (0.0, 0.0, 0.0, 0.0);
    for ([r, g, b, a], count) in counts {
        let weight = saturation(r, g, b) * 255.0 * count as f64 * f64::from(a);
        let weight = if weight == 0.0 { MIN_COEFFICIENT } else { weight };
        r_sum += weight * f64::from(r);
        g_sum += weight * f64::from(g);
        b_sum += weight * f64::from(b);
        total += weight;
    }
    if total == 0.0 {
        return (0, 0, 0);
    }
    let channel = |sum: f64| (sum / total).round().clamp(0.0, 255.0) as u8;
    (channel(r_sum), channel(g_sum), channel(b_sum))
}

/// HSV saturation in `0.0..=1.0`.
fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        0.0
    } else {
        f64::from(max - min) / f64::from(max)
    }
}
