use crate::{CalendarDate, CameraId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub image_url: String,
    pub rover_name: String,
}

impl PhotoRecord {
    pub fn file_name(&self) -> Option<&str> {
        file_name_from_url(&self.image_url)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub earth_date: CalendarDate,
    pub camera: CameraId,
    pub api_key: String,
}

// Keeps the api key out of logs.
impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("earth_date", &self.earth_date)
            .field("camera", &self.camera)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// `{earth_date}_{rover_name}_{camera}`, or `None` when the rover name would not stay a
/// single path component.
pub fn destination_folder_name(
    earth_date: CalendarDate,
    rover_name: &str,
    camera: CameraId,
) -> Option<String> {
    if !is_plain_path_segment(rover_name) {
        return None;
    }
    Some(format!("{earth_date}_{rover_name}_{camera}"))
}

/// True for a non-empty name with no separators that is not `.` or `..`.
pub fn is_plain_path_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Last path segment of `url`, ignoring any query string or fragment.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let path = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);
    match path.rsplit('/').next() {
        Some(name) if is_plain_path_segment(name) => Some(name),
        _ => None,
    }
}
