mod clock;
mod storage;
mod thumbs;

pub use clock::SystemClock;
pub use storage::FsPhotoStorage;
pub use thumbs::ImageCrateThumbnailer;
