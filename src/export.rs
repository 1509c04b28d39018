use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{BoardError, BoardResult};

/// Encoder quality used when none (or an unusable one) is given
pub const DEFAULT_QUALITY: f32 = 0.92;

/// Raster formats the board can export to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Unsupported MIME types fall back to PNG, the same way `toDataURL` does
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Clamp a caller supplied quality into `[0, 1]`, using the default otherwise
pub fn normalize_quality(quality: Option<f32>) -> f32 {
    match quality {
        Some(q) if q.is_finite() && (0.0..=1.0).contains(&q) => q,
        _ => DEFAULT_QUALITY,
    }
}

/// Map `[0, 1]` onto the 1..=100 scale of the JPEG encoder
pub fn jpeg_quality(quality: f32) -> u8 {
    (normalize_quality(Some(quality)) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Output of an image encoder that may have come back empty
pub trait Encoded {
    fn encoded_len(&self) -> usize;
}

impl Encoded for Vec<u8> {
    fn encoded_len(&self) -> usize {
        self.len()
    }
}

/// Reject encoder output that is missing or holds no data
pub fn require_data<T: Encoded>(data: Option<T>) -> BoardResult<T> {
    match data {
        Some(data) if data.encoded_len() > 0 => Ok(data),
        _ => Err(BoardError::EmptyEncoding),
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(format: ExportFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes))
}

/// Split a base64 data URL back into its format and decoded bytes
pub fn decode_data_url(url: &str) -> Option<(ExportFormat, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((ExportFormat::from_mime(mime), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mime_falls_back_to_png() {
        assert_eq!(ExportFormat::from_mime("image/webp"), ExportFormat::Png);
        assert_eq!(ExportFormat::from_mime(""), ExportFormat::Png);
        assert_eq!(ExportFormat::from_mime("image/JPEG"), ExportFormat::Jpeg);
    }

    #[test]
    fn test_quality_out_of_range_uses_default() {
        assert_eq!(normalize_quality(None), DEFAULT_QUALITY);
        assert_eq!(normalize_quality(Some(1.5)), DEFAULT_QUALITY);
        assert_eq!(normalize_quality(Some(f32::NAN)), DEFAULT_QUALITY);
        assert_eq!(normalize_quality(Some(0.5)), 0.5);
        assert_eq!(jpeg_quality(0.92), 92);
        assert_eq!(jpeg_quality(0.0), 1);
    }

    #[test]
    fn test_empty_encoder_output_is_an_error() {
        assert!(matches!(
            require_data(Some(Vec::new())),
            Err(BoardError::EmptyEncoding)
        ));
        assert!(matches!(
            require_data::<Vec<u8>>(None),
            Err(BoardError::EmptyEncoding)
        ));
        assert_eq!(require_data(Some(vec![0x89, 0x50])).unwrap(), vec![0x89, 0x50]);
    }

    #[test]
    fn test_data_url_decodes() {
        let url = data_url(ExportFormat::Png, &[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
        let (format, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(format, ExportFormat::Png);
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
