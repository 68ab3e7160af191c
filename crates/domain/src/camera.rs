use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraId {
    Fhaz,
    Rhaz,
    Mast,
    Chemcam,
    Mahli,
    Mardi,
    Navcam,
    Pancam,
    Minites,
}

impl CameraId {
    pub const ALL: [CameraId; 9] = [
        Self::Fhaz,
        Self::Rhaz,
        Self::Mast,
        Self::Chemcam,
        Self::Mahli,
        Self::Mardi,
        Self::Navcam,
        Self::Pancam,
        Self::Minites,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fhaz => "FHAZ",
            Self::Rhaz => "RHAZ",
            Self::Mast => "MAST",
            Self::Chemcam => "CHEMCAM",
            Self::Mahli => "MAHLI",
            Self::Mardi => "MARDI",
            Self::Navcam => "NAVCAM",
            Self::Pancam => "PANCAM",
            Self::Minites => "MINITES",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Fhaz => "Front Hazard Avoidance Camera",
            Self::Rhaz => "Rear Hazard Avoidance Camera",
            Self::Mast => "Mast Camera",
            Self::Chemcam => "Chemistry and Camera Complex",
            Self::Mahli => "Mars Hand Lens Imager",
            Self::Mardi => "Mars Descent Imager",
            Self::Navcam => "Navigation Camera",
            Self::Pancam => "Panoramic Camera",
            Self::Minites => "Miniature Thermal Emission Spectrometer",
        }
    }

    /// Case-insensitive parse for values typed by a user.
    pub fn from_user_input(value: &str) -> Result<Self, CameraError> {
        value
            .trim()
            .to_ascii_uppercase()
            .parse()
            .map_err(|_| CameraError::Unknown(value.to_string()))
    }
}

impl FromStr for CameraId {
    type Err = CameraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|camera| camera.as_str() == value)
            .ok_or_else(|| CameraError::Unknown(value.to_string()))
    }
}

impl Display for CameraId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match against the canonical uppercase identifiers.
pub fn is_valid_camera(id: &str) -> bool {
    id.parse::<CameraId>().is_ok()
}

pub fn camera_help_text() -> String {
    CameraId::ALL
        .iter()
        .map(|camera| format!("  {}: {}", camera.as_str(), camera.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn camera_list() -> String {
    CameraId::ALL
        .iter()
        .map(|camera| camera.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
