use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mars_photos_domain::{FetchRequest, PhotoRecord};

use crate::{ApplicationError, FetchError};

pub trait PhotoSource {
    /// Metadata query. An empty listing is `Ok(vec![])`, never an error.
    fn list_photos(&self, request: &FetchRequest) -> Result<Vec<PhotoRecord>, FetchError>;

    fn download_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub trait PhotoStorage {
    /// Creates `dir` and any missing parent. Existing directories are fine.
    fn ensure_directory(&self, dir: &Path) -> Result<(), ApplicationError>;

    /// Replaces any existing file at `path`.
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), ApplicationError>;
}

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub source_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait ThumbnailRenderer {
    fn render_thumbnail(&self, path: &Path, max_edge: u32) -> Result<Thumbnail, ApplicationError>;
}
