mod camera;
mod date;
mod error;
mod photo;

pub use camera::{camera_help_text, camera_list, is_valid_camera, CameraId};
pub use date::{min_earth_date, CalendarDate, DATE_FORMAT, MIN_EARTH_DATE};
pub use error::{CameraError, DateError};
pub use photo::{
    destination_folder_name, file_name_from_url, is_plain_path_segment, FetchRequest, PhotoRecord,
};
