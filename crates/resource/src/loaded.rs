use crate::sniff::{ImageFormat, sniff_format};
use folio_traits::{ResourceError, SharedBytes};
use folio_types::SourceKey;
use std::io::Cursor;

/// An encoded image whose format and pixel dimensions are known.
///
/// The bytes stay encoded; decoding to pixels happens in the PDF writer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub key: SourceKey,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: SharedBytes,
}

impl LoadedImage {
    /// Sniffs the format and reads the dimensions from the image header.
    pub fn from_bytes(key: SourceKey, bytes: SharedBytes) -> Result<Self, ResourceError> {
        let format = sniff_format(&bytes).ok_or_else(|| {
            ResourceError::InvalidFormat(format!("'{}' is not a PNG, JPEG, GIF or WebP image", key))
        })?;
        let (width, height) = ::image::ImageReader::with_format(
            Cursor::new(bytes.as_slice()),
            format.to_image_format(),
        )
        .into_dimensions()
        .map_err(|e| ResourceError::InvalidFormat(format!("'{}': {}", key, e)))?;

        Ok(Self {
            key,
            format,
            width,
            height,
            bytes,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = ::image::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ::image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_reads_png_dimensions() {
        let loaded = LoadedImage::from_bytes(SourceKey::new("a.png"), Arc::new(png(30, 10))).unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!((loaded.width, loaded.height), (30, 10));
        assert_eq!(loaded.aspect_ratio(), 3.0);
    }

    #[test]
    fn test_rejects_unknown_bytes() {
        let err = LoadedImage::from_bytes(SourceKey::new("x"), Arc::new(b"hello".to_vec()));
        assert!(matches!(err, Err(ResourceError::InvalidFormat(_))));
    }
}
