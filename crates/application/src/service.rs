use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use mars_photos_domain::{
    destination_folder_name, CalendarDate, CameraId, FetchRequest, PhotoRecord,
};

use crate::{
    ApplicationError, BuildRequestCommand, Clock, DownloadPhotosCommand, DownloadReport,
    FailedImage, FailurePolicy, FetchPhotosCommand, PersistPhotosCommand, PhotoSource,
    PhotoStorage, RenderThumbnailsCommand, Thumbnail, ThumbnailRenderer,
};

pub struct ApplicationService {
    source: Box<dyn PhotoSource>,
    storage: Box<dyn PhotoStorage>,
    clock: Box<dyn Clock>,
    thumbnails: Box<dyn ThumbnailRenderer>,
}

impl ApplicationService {
    pub fn new(
        source: Box<dyn PhotoSource>,
        storage: Box<dyn PhotoStorage>,
        clock: Box<dyn Clock>,
        thumbnails: Box<dyn ThumbnailRenderer>,
    ) -> Self {
        Self {
            source,
            storage,
            clock,
            thumbnails,
        }
    }

    /// Checks `text` against the landing day and today's date, read at call time.
    pub fn validate_date(&self, text: &str) -> Result<CalendarDate, ApplicationError> {
        Ok(CalendarDate::validate(text, self.clock.today())?)
    }

    pub fn resolve_camera(&self, text: &str) -> Result<CameraId, ApplicationError> {
        Ok(CameraId::from_user_input(text)?)
    }

    pub fn build_request(
        &self,
        command: BuildRequestCommand,
    ) -> Result<FetchRequest, ApplicationError> {
        let earth_date = self.validate_date(&command.earth_date)?;
        let camera = self.resolve_camera(&command.camera)?;

        Ok(FetchRequest {
            earth_date,
            camera,
            api_key: command.api_key,
        })
    }

    pub fn fetch_photos(
        &self,
        command: FetchPhotosCommand,
    ) -> Result<Vec<PhotoRecord>, ApplicationError> {
        Ok(self.source.list_photos(&command.request)?)
    }

    pub fn persist_photos(
        &self,
        command: PersistPhotosCommand,
    ) -> Result<Vec<PathBuf>, ApplicationError> {
        let records: Vec<PhotoRecord> = command
            .photos
            .iter()
            .map(|photo| photo.record.clone())
            .collect();
        let Some(destination) = destination_for(
            &records,
            &command.output_dir,
            command.earth_date,
            command.camera,
        )?
        else {
            return Ok(Vec::new());
        };

        self.storage.ensure_directory(&destination)?;
        command
            .photos
            .iter()
            .map(|photo| self.write_photo(&destination, &photo.record, &photo.bytes))
            .collect()
    }

    /// Queries the API, then downloads and writes each image in listing order.
    pub fn download_photos(
        &self,
        command: DownloadPhotosCommand,
    ) -> Result<DownloadReport, ApplicationError> {
        let request = command.request;
        let records = self.source.list_photos(&request)?;
        if records.is_empty() {
            info!(
                "No photos found for the date {} and camera {}.",
                request.earth_date, request.camera
            );
            return Ok(DownloadReport::default());
        }

        let Some(destination) = destination_for(
            &records,
            &command.output_dir,
            request.earth_date,
            request.camera,
        )?
        else {
            return Ok(DownloadReport::default());
        };
        self.storage.ensure_directory(&destination)?;

        let mut report = DownloadReport {
            destination: Some(destination.clone()),
            photos_found: records.len(),
            saved: Vec::with_capacity(records.len()),
            failed: Vec::new(),
        };

        info!("Downloading {} photos...", records.len());
        for record in &records {
            debug!("Downloading: {}", record.image_url);
            let written = self
                .source
                .download_image(&record.image_url)
                .map_err(ApplicationError::from)
                .and_then(|bytes| self.write_photo(&destination, record, &bytes));

            match written {
                Ok(path) => report.saved.push(path),
                Err(error) => match command.policy {
                    FailurePolicy::FailFast => return Err(error),
                    FailurePolicy::Continue => {
                        warn!("skipping {}: {error}", record.image_url);
                        report.failed.push(FailedImage {
                            url: record.image_url.clone(),
                            reason: error.to_string(),
                        });
                    }
                },
            }
        }

        info!("Photos saved in the directory: {}", destination.display());
        Ok(report)
    }

    /// Files that cannot be decoded are left out of the result.
    pub fn render_thumbnails(&self, command: RenderThumbnailsCommand) -> Vec<Thumbnail> {
        command
            .paths
            .iter()
            .filter_map(|path| {
                match self.thumbnails.render_thumbnail(path, command.max_edge) {
                    Ok(thumbnail) => Some(thumbnail),
                    Err(error) => {
                        warn!("cannot show {}: {error}", path.display());
                        None
                    }
                }
            })
            .collect()
    }

    fn write_photo(
        &self,
        destination: &Path,
        record: &PhotoRecord,
        bytes: &[u8],
    ) -> Result<PathBuf, ApplicationError> {
        let file_name = record.file_name().ok_or_else(|| {
            ApplicationError::InvalidInput(format!(
                "image url has no file name: {}",
                record.image_url
            ))
        })?;
        let path = destination.join(file_name);
        self.storage.write_file(&path, bytes)?;
        Ok(path)
    }
}

/// Folder for a batch, named after the first record's rover. `None` for an empty batch.
fn destination_for(
    records: &[PhotoRecord],
    output_dir: &Path,
    earth_date: CalendarDate,
    camera: CameraId,
) -> Result<Option<PathBuf>, ApplicationError> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    if records
        .iter()
        .any(|record| record.rover_name != first.rover_name)
    {
        warn!(
            "batch mixes rovers; saving everything under {}",
            first.rover_name
        );
    }
    let folder = destination_folder_name(earth_date, &first.rover_name, camera).ok_or_else(|| {
        ApplicationError::InvalidInput(format!(
            "rover name is not a valid folder name: {:?}",
            first.rover_name
        ))
    })?;
    Ok(Some(output_dir.join(folder)))
}
