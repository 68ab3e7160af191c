use std::path::PathBuf;

use mars_photos_domain::{CalendarDate, CameraId, FetchRequest, PhotoRecord};

/// What a batch does when one image download fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed image. Files already written stay on disk.
    #[default]
    FailFast,
    /// Record the failure and move on to the next image.
    Continue,
}

#[derive(Clone)]
pub struct BuildRequestCommand {
    pub earth_date: String,
    pub camera: String,
    pub api_key: String,
}

impl std::fmt::Debug for BuildRequestCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildRequestCommand")
            .field("earth_date", &self.earth_date)
            .field("camera", &self.camera)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FetchPhotosCommand {
    pub request: FetchRequest,
}

#[derive(Debug, Clone)]
pub struct DownloadedPhoto {
    pub record: PhotoRecord,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PersistPhotosCommand {
    pub photos: Vec<DownloadedPhoto>,
    pub output_dir: PathBuf,
    pub earth_date: CalendarDate,
    pub camera: CameraId,
}

#[derive(Debug, Clone)]
pub struct DownloadPhotosCommand {
    pub request: FetchRequest,
    pub output_dir: PathBuf,
    pub policy: FailurePolicy,
}

#[derive(Debug, Clone)]
pub struct RenderThumbnailsCommand {
    pub paths: Vec<PathBuf>,
    pub max_edge: u32,
}
