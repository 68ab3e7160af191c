use std::path::Path;

use image::ImageReader;
use mars_photos_application::{ApplicationError, Thumbnail, ThumbnailRenderer};

#[derive(Debug, Default)]
pub struct ImageCrateThumbnailer;

impl ThumbnailRenderer for ImageCrateThumbnailer {
    fn render_thumbnail(&self, path: &Path, max_edge: u32) -> Result<Thumbnail, ApplicationError> {
        if max_edge == 0 {
            return Err(ApplicationError::InvalidInput(
                "thumbnail edge must be positive".to_string(),
            ));
        }

        let image = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let thumb = image.thumbnail(max_edge, max_edge).to_rgba8();
        Ok(Thumbnail {
            source_path: path.to_path_buf(),
            width: thumb.width(),
            height: thumb.height(),
            rgba: thumb.into_raw(),
        })
    }
}
