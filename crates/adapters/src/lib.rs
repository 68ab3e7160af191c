pub mod fs;
pub mod http;
pub mod presenters;

pub use fs::{FsPhotoStorage, ImageCrateThumbnailer, SystemClock};
pub use http::{parse_photo_listing, NasaPhotoSource, DEFAULT_ENDPOINT};
pub use presenters::{present_available_cameras, present_download_report, present_no_photos};
