use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    Format(String),
    #[error("The date must not be earlier than {min}.")]
    TooEarly { date: String, min: String },
    #[error("The date cannot be in the future.")]
    Future { date: String, today: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Camera '{0}' is not available.")]
    Unknown(String),
}
