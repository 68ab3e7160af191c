mod config;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use config::{resolve_output_dir, AppConfig};
use mars_photos_adapters::{
    present_available_cameras, present_download_report, present_no_photos, FsPhotoStorage,
    ImageCrateThumbnailer, NasaPhotoSource, SystemClock,
};
use mars_photos_application::{
    ApplicationError, ApplicationService, BuildRequestCommand, DownloadPhotosCommand,
    FailurePolicy, RenderThumbnailsCommand,
};
use mars_photos_domain::camera_help_text;

fn camera_arg_help() -> String {
    format!(
        "Camera (case-insensitive), one of:\n{}",
        camera_help_text()
    )
}

/// Download Mars surface photos from the NASA Mars Rover Photos API.
#[derive(Parser, Debug)]
#[command(name = "mars-photos", version, about, long_about = None)]
struct Args {
    /// Date in the format YYYY-MM-DD. Minimum date: 2012-08-06.
    #[arg(long, required_unless_present = "gui")]
    earth_date: Option<String>,

    #[arg(long, required_unless_present = "gui", help = camera_arg_help())]
    camera: Option<String>,

    /// NASA API key (default is DEMO_KEY, or NASA_API_KEY when set).
    #[arg(long)]
    key: Option<String>,

    /// Display photos after downloading.
    #[arg(long)]
    show: bool,

    /// Directory to save the downloaded photos (default: current directory).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Keep downloading the rest of the batch when one image fails.
    #[arg(long)]
    keep_going: bool,

    /// Open the download form window instead of downloading from the command line.
    #[arg(long, conflicts_with_all = ["earth_date", "camera", "show"])]
    gui: bool,
}

fn main() -> ExitCode {
    logging::init_logging();
    let args = Args::parse();
    let config = AppConfig::from_env();

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("Error: {msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> Result<ApplicationService, ApplicationError> {
    Ok(ApplicationService::new(
        Box::new(NasaPhotoSource::new(
            config.endpoint.clone(),
            config.request_timeout,
        )?),
        Box::new(FsPhotoStorage),
        Box::new(SystemClock),
        Box::new(ImageCrateThumbnailer),
    ))
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match &error {
            ApplicationError::Camera(_) => {
                Self::Usage(format!("{error}\n{}", present_available_cameras()))
            }
            _ if error.is_validation() => Self::Usage(error.to_string()),
            _ => Self::Runtime(format!("download failed: {error}")),
        }
    }
}

fn run(args: Args, config: &AppConfig) -> Result<(), CommandError> {
    if args.gui {
        let seed = ui::FormSeed {
            api_key: args.key,
            output_dir: args.output_dir,
        };
        return ui::launch_download_window(config.clone(), seed).map_err(CommandError::Runtime);
    }

    let service = build_application_service(config)?;
    let request = service.build_request(BuildRequestCommand {
        earth_date: args.earth_date.unwrap_or_default(),
        camera: args.camera.unwrap_or_default(),
        api_key: args.key.unwrap_or_else(|| config.api_key.clone()),
    })?;

    let output_dir = resolve_output_dir(args.output_dir.as_deref());
    let report = service.download_photos(DownloadPhotosCommand {
        request: request.clone(),
        output_dir,
        policy: failure_policy(args.keep_going, config),
    })?;

    if report.is_empty() {
        println!("{}", present_no_photos(&request));
        return Ok(());
    }
    println!("{}", present_download_report(&report));

    if args.show && !report.saved.is_empty() {
        let thumbnails = service.render_thumbnails(RenderThumbnailsCommand {
            paths: report.saved.clone(),
            max_edge: config.thumbnail_edge,
        });
        let title = format!("{} / {}", request.earth_date, request.camera);
        ui::launch_gallery_window(title, thumbnails).map_err(CommandError::Runtime)?;
    }

    if !report.failed.is_empty() {
        return Err(CommandError::Runtime(format!(
            "{} of {} photos could not be downloaded",
            report.failed.len(),
            report.photos_found
        )));
    }
    Ok(())
}

fn failure_policy(keep_going: bool, config: &AppConfig) -> FailurePolicy {
    if keep_going {
        FailurePolicy::Continue
    } else {
        config.failure_policy
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use mars_photos_domain::{CameraError, DateError};

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_download_flags() {
        let args = Args::try_parse_from([
            "mars-photos",
            "--earth-date",
            "2015-06-03",
            "--camera",
            "fhaz",
            "--show",
            "--output-dir",
            "photos",
        ])
        .expect("flags should parse");

        assert_eq!(args.earth_date.as_deref(), Some("2015-06-03"));
        assert_eq!(args.camera.as_deref(), Some("fhaz"));
        assert!(args.show);
        assert_eq!(args.output_dir, Some(PathBuf::from("photos")));
        assert_eq!(args.key, None);
        assert!(!args.gui);
    }

    #[test]
    fn date_and_camera_are_required_without_gui() {
        assert!(Args::try_parse_from(["mars-photos", "--camera", "FHAZ"]).is_err());
        assert!(Args::try_parse_from(["mars-photos", "--earth-date", "2015-06-03"]).is_err());
        assert!(Args::try_parse_from(["mars-photos", "--gui"]).is_ok());
    }

    #[test]
    fn gui_accepts_key_and_output_dir() {
        let args = Args::try_parse_from([
            "mars-photos",
            "--gui",
            "--key",
            "my-key",
            "--output-dir",
            "photos",
        ])
        .expect("flags should parse");

        assert!(args.gui);
        assert_eq!(args.key.as_deref(), Some("my-key"));
        assert_eq!(args.output_dir, Some(PathBuf::from("photos")));
    }

    #[test]
    fn validation_errors_are_usage_errors() {
        let date = CommandError::from(ApplicationError::Date(DateError::Format(
            "x".to_string(),
        )));
        assert!(matches!(date, CommandError::Usage(msg) if msg.contains("YYYY-MM-DD")));

        let camera = CommandError::from(ApplicationError::Camera(CameraError::Unknown(
            "HUBBLE".to_string(),
        )));
        assert!(matches!(
            camera,
            CommandError::Usage(msg) if msg.contains("HUBBLE") && msg.contains("Available cameras: FHAZ")
        ));

        let io = CommandError::from(ApplicationError::Io("disk full".to_string()));
        assert!(matches!(io, CommandError::Runtime(_)));
    }

    #[test]
    fn keep_going_flag_selects_continue_policy() {
        let config = AppConfig::default();
        assert_eq!(failure_policy(true, &config), FailurePolicy::Continue);
        assert_eq!(failure_policy(false, &config), FailurePolicy::FailFast);
    }
}
