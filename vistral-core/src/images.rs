//! Image loading and preparation for generation requests.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::ClientError;

/// Upper bound on the resized longest edge, in pixels.
const MAX_LEN: f64 = 800.0;
/// Upper bound on the resized shortest edge, in pixels.
const MIN_LEN: f64 = 400.0;

/// Whether [`get_images`] returns decoded bitmaps or base64 PNG strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReturn {
    Decoded,
    Base64Png,
}

/// One prepared image, in the representation selected by [`ImageReturn`].
#[derive(Debug, Clone)]
pub enum ImageData {
    Decoded(DynamicImage),
    Base64Png(String),
}

impl ImageData {
    pub fn as_base64(&self) -> Option<&str> {
        match self {
            Self::Base64Png(s) => Some(s),
            Self::Decoded(_) => None,
        }
    }
}

/// Decode an image from disk. Missing files and undecodable data are errors.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, ClientError> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let (width, height) = image.dimensions();
    debug!(
        path = %path.display(),
        width,
        height,
        mode = ?image.color(),
        "loaded image"
    );
    Ok(image)
}

/// Downscale an image to at most 800px on the long edge and 400px on the
/// short edge, preserving aspect ratio under integer truncation.
///
/// The target shortest edge is `min(800/aspect_ratio, 400, min_hw)` and the
/// longest edge is `shortest_edge * aspect_ratio`, both truncated. When the
/// computed longest edge already equals the current maximum dimension, the
/// image is returned unchanged.
pub fn resize_image(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (max_hw, min_hw) = (width.max(height), width.min(height));
    let aspect_ratio = f64::from(max_hw) / f64::from(min_hw);
    let shortest_edge = (MAX_LEN / aspect_ratio).min(MIN_LEN).min(f64::from(min_hw)) as u32;
    let longest_edge = (f64::from(shortest_edge) * aspect_ratio) as u32;
    if longest_edge == max_hw {
        return image.clone();
    }
    // The originally longer physical dimension maps to the new longest edge.
    let (new_width, new_height) = if height > width {
        (shortest_edge, longest_edge)
    } else {
        (longest_edge, shortest_edge)
    };
    image.resize_exact(new_width, new_height, FilterType::CatmullRom)
}

/// Encode an image as a base64 PNG string.
pub fn encode_png_base64(image: &DynamicImage) -> Result<String, ClientError> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
    Ok(STANDARD.encode(&buffer))
}

/// Load every image in `paths`, returning either the decoded bitmaps or
/// resized base64 PNG strings ready to be attached to a generation request.
pub fn get_images(
    paths: &[impl AsRef<Path>],
    format: ImageReturn,
) -> Result<Vec<ImageData>, ClientError> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let image = load_image(path)?;
        let prepared = match format {
            ImageReturn::Decoded => ImageData::Decoded(image),
            ImageReturn::Base64Png => {
                ImageData::Base64Png(encode_png_base64(&resize_image(&image))?)
            }
        };
        images.push(prepared);
    }
    Ok(images)
}
