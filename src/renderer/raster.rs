use std::path::Path;

use egui::{Pos2, pos2};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use super::Surface;
use crate::config::{LineCap, LineStyle};
use crate::error::BoardResult;
use crate::export::{self, ExportFormat};

/// File name used by `download` when the caller passes an empty one
pub const DEFAULT_DOWNLOAD_NAME: &str = "handwriting.png";

/// In-memory RGBA surface, transparent when clear.
///
/// Segments are filled without anti-aliasing: a pixel is painted when its
/// centre lies inside the stroked segment.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// True when no pixel has been painted
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Encode the current picture
    pub fn encode(&self, format: ExportFormat, quality: f32) -> BoardResult<Vec<u8>> {
        let (width, height) = self.image.dimensions();
        let mut bytes = Vec::new();
        match format {
            ExportFormat::Png => {
                PngEncoder::new(&mut bytes).write_image(
                    self.image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                )?;
            }
            ExportFormat::Jpeg => {
                // JPEG has no alpha channel, transparent pixels end up black.
                let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut bytes, export::jpeg_quality(quality))
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)?;
            }
        }
        Ok(bytes)
    }

    /// Encode the picture into a base64 data URL
    pub fn export_image(&self, format: ExportFormat, quality: f32) -> BoardResult<String> {
        let bytes = self.encode(format, quality)?;
        Ok(export::data_url(format, &bytes))
    }

    /// Encode the picture into raw bytes, failing if the encoder yields nothing
    pub async fn export_image_async(
        &self,
        format: ExportFormat,
        quality: f32,
    ) -> BoardResult<Vec<u8>> {
        let bytes = self.encode(format, quality)?;
        export::require_data(Some(bytes))
    }

    /// Save the picture as a PNG file
    pub fn download(&self, path: impl AsRef<Path>) -> BoardResult<()> {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            Path::new(DEFAULT_DOWNLOAD_NAME)
        } else {
            path
        };
        let bytes = self.encode(ExportFormat::Png, export::DEFAULT_QUALITY)?;
        std::fs::write(path, bytes)?;
        log::info!("Saved board image to {}", path.display());
        Ok(())
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        self.image.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    fn draw_segment(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let half_width = style.width / 2.0;
        let reach = match style.cap {
            LineCap::Butt => half_width,
            // The square cap's corner sticks out diagonally.
            LineCap::Round | LineCap::Square => half_width * std::f32::consts::SQRT_2,
        };

        let (width, height) = self.image.dimensions();
        let min_x = (from.x.min(to.x) - reach).floor().max(0.0);
        let min_y = (from.y.min(to.y) - reach).floor().max(0.0);
        let max_x = (from.x.max(to.x) + reach).ceil().min(width as f32 - 1.0);
        let max_y = (from.y.max(to.y) + reach).ceil().min(height as f32 - 1.0);
        if max_x < min_x || max_y < min_y {
            return;
        }

        let color = Rgba(style.color.to_srgba_unmultiplied());
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                if covers(center, from, to, half_width, style.cap) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }
}

/// Whether `p` lies inside the segment `a`-`b` stroked with the given cap
fn covers(p: Pos2, a: Pos2, b: Pos2, half_width: f32, cap: LineCap) -> bool {
    let ab = b - a;
    let length_sq = ab.length_sq();

    if length_sq <= f32::EPSILON {
        // A zero-length segment only leaves a mark when the cap has extent.
        let d = p - a;
        return match cap {
            LineCap::Butt => false,
            LineCap::Round => d.length() <= half_width,
            LineCap::Square => d.x.abs() <= half_width && d.y.abs() <= half_width,
        };
    }

    let t = (p - a).dot(ab) / length_sq;
    match cap {
        LineCap::Round => {
            let closest = a + ab * t.clamp(0.0, 1.0);
            (p - closest).length() <= half_width
        }
        LineCap::Butt | LineCap::Square => {
            let extension = if cap == LineCap::Square {
                half_width / length_sq.sqrt()
            } else {
                0.0
            };
            if t < -extension || t > 1.0 + extension {
                return false;
            }
            let projected = a + ab * t;
            (p - projected).length() <= half_width
        }
    }
}
