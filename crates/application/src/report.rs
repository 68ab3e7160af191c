use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedImage {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// `None` when the query matched nothing and no folder was created.
    pub destination: Option<PathBuf>,
    pub photos_found: usize,
    /// Written files, in the order the API listed them.
    pub saved: Vec<PathBuf>,
    pub failed: Vec<FailedImage>,
}

impl DownloadReport {
    pub fn is_empty(&self) -> bool {
        self.photos_found == 0
    }
}
