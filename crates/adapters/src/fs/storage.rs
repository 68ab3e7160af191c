use std::fs;
use std::path::Path;

use mars_photos_application::{ApplicationError, PhotoStorage};

#[derive(Debug, Default)]
pub struct FsPhotoStorage;

impl PhotoStorage for FsPhotoStorage {
    fn ensure_directory(&self, dir: &Path) -> Result<(), ApplicationError> {
        fs::create_dir_all(dir).map_err(|error| {
            ApplicationError::Io(format!("cannot create {}: {error}", dir.display()))
        })
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<(), ApplicationError> {
        fs::write(path, bytes).map_err(|error| {
            ApplicationError::Io(format!("cannot write {}: {error}", path.display()))
        })
    }
}
