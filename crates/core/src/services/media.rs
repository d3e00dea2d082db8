//! Upload validation for image payloads.

use image::ImageFormat;
use lokamap_common::AppError;

/// Maximum accepted upload size (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// An image file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// Original file name as sent by the client.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
}

/// Validate a location photo. Accepts JPEG and PNG up to 2 MiB.
pub fn validate_photo(field: &'static str, upload: &UploadedImage) -> Result<(), AppError> {
    validate(field, upload, &[ImageFormat::Jpeg, ImageFormat::Png])
}

/// Validate a site logo. Accepts JPEG, PNG and GIF up to 2 MiB.
pub fn validate_logo(field: &'static str, upload: &UploadedImage) -> Result<(), AppError> {
    validate(
        field,
        upload,
        &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif],
    )
}

fn validate(
    field: &'static str,
    upload: &UploadedImage,
    allowed: &[ImageFormat],
) -> Result<(), AppError> {
    if upload.data.is_empty() {
        return Err(AppError::validation(field, "required", "file is empty"));
    }
    if upload.data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation(
            field,
            "max_size",
            "file exceeds the 2 MB limit",
        ));
    }

    // Sniff the actual bytes rather than trusting the declared content type.
    let format = image::guess_format(&upload.data)
        .map_err(|_| AppError::validation(field, "image", "file is not a recognized image"))?;

    if !allowed.contains(&format) {
        return Err(AppError::validation(
            field,
            "mimes",
            "unsupported image format",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Minimal valid 1x1 PNG.
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";

    fn upload(data: &[u8], name: &str) -> UploadedImage {
        UploadedImage {
            data: data.to_vec(),
            file_name: name.to_string(),
            content_type: None,
        }
    }

    #[test]
    fn accepts_png_photo() {
        let up = upload(PNG_BYTES, "photo.png");
        assert!(validate_photo("images", &up).is_ok());
    }

    #[test]
    fn rejects_empty_upload() {
        let up = upload(&[], "photo.png");
        assert!(validate_photo("images", &up).is_err());
    }

    #[test]
    fn rejects_oversized_upload() {
        let mut data = PNG_BYTES.to_vec();
        data.resize(MAX_IMAGE_BYTES + 1, 0);
        let up = upload(&data, "photo.png");
        assert!(validate_photo("images", &up).is_err());
    }

    #[test]
    fn rejects_non_image_bytes() {
        let up = upload(b"definitely not an image", "photo.png");
        assert!(validate_photo("images", &up).is_err());
    }

    #[test]
    fn gif_rejected_for_photo_but_allowed_for_logo() {
        let up = upload(GIF_HEADER, "logo.gif");
        assert!(validate_photo("images", &up).is_err());
        assert!(validate_logo("logo", &up).is_ok());
    }
}
