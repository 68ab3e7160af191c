mod error;
mod ports;
mod report;
mod service;
mod use_cases;

pub use error::{ApplicationError, FetchError};
pub use ports::{Clock, PhotoSource, PhotoStorage, Thumbnail, ThumbnailRenderer};
pub use report::{DownloadReport, FailedImage};
pub use service::ApplicationService;
pub use use_cases::{
    BuildRequestCommand, DownloadPhotosCommand, DownloadedPhoto, FailurePolicy,
    FetchPhotosCommand, PersistPhotosCommand, RenderThumbnailsCommand,
};
