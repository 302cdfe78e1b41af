//! Image decoding and cell rasterization.

use crate::models::{HalfBlock, ImageArt};
use image::GenericImageView;
use std::io;
use std::path::Path;

/// Every inserted image is first fitted into this box, aspect preserved.
pub const THUMBNAIL_MAX: u32 = 200;

/// Pixels with alpha below this render as transparent cells.
const ALPHA_CUTOFF: u8 = 128;

pub type Result<T> = std::result::Result<T, ImageError>;

#[derive(Debug)]
pub enum ImageError {
    Io(io::Error),
    Decode(String),
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "IO error: {}", e),
            ImageError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<io::Error> for ImageError {
    fn from(e: io::Error) -> Self {
        ImageError::Io(e)
    }
}

impl From<image::ImageError> for ImageError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io_err) => ImageError::Io(io_err),
            other => ImageError::Decode(other.to_string()),
        }
    }
}

pub struct ImageService;

impl ImageService {
    /// Decodes a raster file and rasterizes it for inline display.
    pub fn load_art(path: &Path, max_cols: u32) -> Result<ImageArt> {
        let img = image::open(path)?;
        let art = Self::rasterize(&img, max_cols);
        tracing::info!(
            path = %path.display(),
            width = art.source_width,
            height = art.source_height,
            rows = art.cell_rows(),
            "image rasterized"
        );
        Ok(art)
    }

    /// Downscales into the thumbnail box (never upscaling), then re-fits the
    /// pixel grid to the column budget. One cell is one pixel wide and two
    /// pixel rows tall, which keeps the on-screen aspect close to square.
    pub fn rasterize(img: &image::DynamicImage, max_cols: u32) -> ImageArt {
        let (w, h) = img.dimensions();
        let thumb = if w > THUMBNAIL_MAX || h > THUMBNAIL_MAX {
            img.thumbnail(THUMBNAIL_MAX, THUMBNAIL_MAX)
        } else {
            img.clone()
        };

        let (tw, th) = thumb.dimensions();
        let max_cols = max_cols.max(1);
        let fitted = if tw > max_cols {
            thumb.thumbnail(max_cols, THUMBNAIL_MAX)
        } else {
            thumb
        };

        let rgba = fitted.to_rgba8();
        let (fw, fh) = rgba.dimensions();
        let mut rows = Vec::with_capacity(fh.div_ceil(2) as usize);
        let mut y = 0;
        while y < fh {
            let mut row = Vec::with_capacity(fw as usize);
            for x in 0..fw {
                let top = pixel(&rgba, x, y);
                let bottom = if y + 1 < fh {
                    pixel(&rgba, x, y + 1)
                } else {
                    None
                };
                row.push(HalfBlock { top, bottom });
            }
            rows.push(row);
            y += 2;
        }

        ImageArt {
            source_width: tw,
            source_height: th,
            rows,
        }
    }
}

fn pixel(img: &image::RgbaImage, x: u32, y: u32) -> Option<(u8, u8, u8)> {
    let p = img.get_pixel(x, y).0;
    if p[3] < ALPHA_CUTOFF {
        None
    } else {
        Some((p[0], p[1], p[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn solid(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
    }

    #[test]
    fn test_thumbnail_bounds_and_aspect() {
        let art = ImageService::rasterize(&solid(400, 100, [255, 0, 0, 255]), 1000);
        assert_eq!(art.source_width, 200);
        assert_eq!(art.source_height, 50);
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let art = ImageService::rasterize(&solid(8, 8, [0, 255, 0, 255]), 1000);
        assert_eq!(art.source_width, 8);
        assert_eq!(art.source_height, 8);
        assert_eq!(art.cell_cols(), 8);
        assert_eq!(art.cell_rows(), 4);
    }

    #[test]
    fn test_column_budget_refit() {
        let art = ImageService::rasterize(&solid(100, 100, [0, 0, 255, 255]), 10);
        assert!(art.cell_cols() <= 10);
        // The stored thumbnail dimensions reflect the 200x200 fit, not the
        // display refit.
        assert_eq!(art.source_width, 100);
    }

    #[test]
    fn test_odd_height_leaves_bottom_transparent() {
        let art = ImageService::rasterize(&solid(2, 3, [1, 2, 3, 255]), 1000);
        assert_eq!(art.cell_rows(), 2);
        let last = &art.rows[1][0];
        assert!(last.top.is_some());
        assert!(last.bottom.is_none());
    }

    #[test]
    fn test_transparent_pixels() {
        let art = ImageService::rasterize(&solid(2, 2, [9, 9, 9, 0]), 1000);
        let cell = &art.rows[0][0];
        assert!(cell.top.is_none());
        assert!(cell.bottom.is_none());
    }

    #[test]
    fn test_load_art_missing_file() {
        let err = ImageService::load_art(Path::new("/no/such/image.png"), 40).unwrap_err();
        assert!(matches!(err, ImageError::Io(_)));
    }
}
