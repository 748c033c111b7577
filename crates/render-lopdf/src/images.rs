//! Image XObjects: decoded to 8-bit RGB with the alpha channel split into
//! a soft mask, both Flate-compressed.

use folio_render_core::RenderError;
use folio_resource::{LoadedImage, ResourceError};
use lopdf::{Document, ObjectId, Stream, dictionary};

pub(crate) fn embed(document: &mut Document, image: &LoadedImage) -> Result<ObjectId, RenderError> {
    let decoded = ::image::load_from_memory(&image.bytes).map_err(|e| {
        RenderError::Resource(ResourceError::InvalidFormat(format!("'{}': {}", image.key, e)))
    })?;
    let (width, height) = (decoded.width() as i64, decoded.height() as i64);
    log::debug!("Embedding image '{}' ({}x{})", image.key, width, height);

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width,
        "Height" => height,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if decoded.color().has_alpha() {
        let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
        let mut mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        );
        mask.compress()?;
        dict.set("SMask", document.add_object(mask));
    }

    let mut stream = Stream::new(dict, decoded.to_rgb8().into_raw());
    stream.compress()?;
    Ok(document.add_object(stream))
}
