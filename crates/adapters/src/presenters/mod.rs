use mars_photos_application::DownloadReport;
use mars_photos_domain::{camera_list, FetchRequest};

pub fn present_no_photos(request: &FetchRequest) -> String {
    format!(
        "No photos found for the date {} and camera {}.",
        request.earth_date, request.camera
    )
}

pub fn present_download_report(report: &DownloadReport) -> String {
    let mut lines = Vec::new();
    if let Some(destination) = &report.destination {
        lines.push(format!(
            "saved {} of {} photos in {}",
            report.saved.len(),
            report.photos_found,
            destination.display()
        ));
    }
    for failure in &report.failed {
        lines.push(format!("failed: {} ({})", failure.url, failure.reason));
    }
    lines.join("\n")
}

pub fn present_available_cameras() -> String {
    format!("Available cameras: {}", camera_list())
}
